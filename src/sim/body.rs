//! Circular rigid body state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Opaque body identity, stable for the body's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub(crate) u32);

/// Optional spawn parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnOptions {
    pub velocity: Vec2,
    pub is_static: bool,
    /// Wall-bounce restitution; `None` uses [`BODY_RESTITUTION`]
    pub restitution: Option<f32>,
}

/// A circular rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Derived from radius; keeps bigger fruit visually dominant, not used
    /// for momentum-conserving response
    pub mass: f32,
    /// Immovable scenery; excluded from integration and constraint writes
    pub is_static: bool,
    pub restitution: f32,
    /// Index into the fruit progression table
    pub level: usize,
    /// Terminal: set once, purged at the next step boundary
    pub marked_for_removal: bool,
    /// True once speed has stayed below the settle threshold long enough
    pub settled: bool,
    /// Consecutive slow ticks (internal to settling classification)
    pub settled_ticks: u32,
    /// Ticks spent settled above the danger line. Owned by the session
    /// layer; the engine never reads or writes it.
    pub danger_ticks: u32,
}

impl Body {
    pub(crate) fn new(id: BodyId, pos: Vec2, radius: f32, level: usize, opts: SpawnOptions) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            id,
            pos,
            vel: opts.velocity,
            radius,
            mass: std::f32::consts::PI * radius * radius * MASS_DENSITY,
            is_static: opts.is_static,
            restitution: opts.restitution.unwrap_or(BODY_RESTITUTION),
            level,
            marked_for_removal: false,
            settled: false,
            settled_ticks: 0,
            danger_ticks: 0,
        }
    }

    /// Current speed magnitude
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
