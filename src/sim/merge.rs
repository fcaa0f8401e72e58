//! The merge rule
//!
//! Consumes contact notifications and applies the progression: two fruit of
//! the same level combine into the next level at the contact midpoint; two of
//! the top level pop for double points. All population changes go through the
//! engine's create/remove contract, so removals land at the next step
//! boundary and a body never merges twice in one frame.

use glam::Vec2;

use super::body::{BodyId, SpawnOptions};
use super::world::{Bodies, ContactSink};
use crate::consts::MERGE_POP_VY;
use crate::fruits::{self, FRUITS};

/// Particles requested when two top-level fruit pop
const TOP_POP_PARTICLES: u32 = 20;
/// Particles requested for an ordinary merge
const MERGE_PARTICLES: u32 = 12;

/// Receiver for awarded points
pub trait ScoreSink {
    fn add_score(&mut self, points: u32);
}

/// Receiver for decorative burst requests; fire-and-forget, no effect on
/// simulation state
pub trait EffectSink {
    fn emit_burst(&mut self, pos: Vec2, color: &'static str, count: u32);
}

/// A queued decorative burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub pos: Vec2,
    pub color: &'static str,
    pub count: u32,
}

/// Default [`EffectSink`]: buffers bursts for a rendering collaborator to
/// drain each frame
#[derive(Debug, Default)]
pub struct BurstQueue {
    bursts: Vec<Burst>,
}

impl BurstQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Burst> {
        std::mem::take(&mut self.bursts)
    }

    pub fn len(&self) -> usize {
        self.bursts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }
}

impl EffectSink for BurstQueue {
    fn emit_burst(&mut self, pos: Vec2, color: &'static str, count: u32) {
        self.bursts.push(Burst { pos, color, count });
    }
}

/// Stateless progression rule over the fruit table; everything it owns is
/// the pair of sinks it reports to
#[derive(Debug)]
pub struct MergeController<S, E> {
    score: S,
    effects: E,
}

impl<S: ScoreSink, E: EffectSink> MergeController<S, E> {
    pub fn new(score: S, effects: E) -> Self {
        Self { score, effects }
    }

    pub fn score(&self) -> &S {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut S {
        &mut self.score
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }
}

impl<S: ScoreSink, E: EffectSink> ContactSink for MergeController<S, E> {
    fn on_contact(&mut self, bodies: &mut Bodies, a: BodyId, b: BodyId) {
        let (Some(a), Some(b)) = (bodies.get(a), bodies.get(b)) else {
            return;
        };
        // Different levels just bounce
        if a.level != b.level {
            return;
        }
        // First notification wins: a body that touched two partners in the
        // same pass merges exactly once
        if a.marked_for_removal || b.marked_for_removal {
            return;
        }

        let level = a.level;
        debug_assert!(level < FRUITS.len(), "body level out of table range");
        let midpoint = (a.pos + b.pos) / 2.0;
        let (id_a, id_b) = (a.id, b.id);

        if level == fruits::top_level() {
            // Terminal sink: both pop, double points, nothing spawns
            let fruit = &FRUITS[level];
            bodies.mark_removed(id_a);
            bodies.mark_removed(id_b);
            self.score.add_score(fruit.points * 2);
            self.effects.emit_burst(midpoint, fruit.color, TOP_POP_PARTICLES);
            log::info!("Two {}s popped (+{} pts)", fruit.name, fruit.points * 2);
            return;
        }

        let next_level = level + 1;
        let fruit = &FRUITS[next_level];
        bodies.mark_removed(id_a);
        bodies.mark_removed(id_b);
        // Slight upward pop keeps the merged fruit from re-settling flush
        // with its neighbors
        bodies.spawn(
            midpoint,
            fruit.radius,
            next_level,
            SpawnOptions { velocity: Vec2::new(0.0, MERGE_POP_VY), ..Default::default() },
        );
        self.score.add_score(fruit.points);
        self.effects.emit_burst(midpoint, fruit.color, MERGE_PARTICLES);
        log::info!(
            "Merged two {}s into {} (+{} pts)",
            FRUITS[level].name,
            fruit.name,
            fruit.points
        );
    }
}
