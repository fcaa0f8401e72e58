//! Running and best score tracking
//!
//! The board holds the running total for the current run and the best total
//! seen. Persisting the best across sessions is an outer-shell concern; the
//! board is serde-serializable so a shell can stash it wherever it likes.

use serde::{Deserialize, Serialize};

use crate::sim::ScoreSink;

/// Score state for a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    score: u64,
    best: u64,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a board with a previously persisted best
    pub fn with_best(best: u64) -> Self {
        Self { score: 0, best }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Clear the running total for a new run, keeping the best
    pub fn reset_run(&mut self) {
        self.score = 0;
    }
}

impl ScoreSink for ScoreBoard {
    fn add_score(&mut self, points: u32) {
        self.score += points as u64;
        if self.score > self.best {
            self.best = self.score;
        }
    }
}
