//! Fruitfall - the physics-and-merge core of a falling-fruit stacking game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (circle physics, contacts, merge rule)
//! - `fruits`: The fixed fruit progression table
//! - `game`: Session layer (drops, danger line, resize, restart)
//! - `score`: Running/best score tracking

pub mod fruits;
pub mod game;
pub mod score;
pub mod sim;

pub use fruits::{FRUITS, Fruit, MAX_DROP_LEVEL};
pub use game::Game;
pub use score::ScoreBoard;

/// Simulation tuning constants
///
/// Units are pixels and frames: `step(1.0)` advances one 60 Hz frame, so
/// accelerations are px/frame² and tick counts assume 60 ticks per second.
pub mod consts {
    /// Downward acceleration applied every tick (px/frame²)
    pub const GRAVITY: f32 = 0.4;
    /// Per-tick velocity damping factor
    pub const DAMPING: f32 = 0.995;
    /// Default wall-bounce restitution for spawned bodies
    pub const BODY_RESTITUTION: f32 = 0.6;
    /// Constraint solver passes per step
    pub const SOLVER_ITERATIONS: usize = 2;

    /// Vertical bounce speeds below this are zeroed at the floor
    pub const FLOOR_STOP_EPSILON: f32 = 0.15;
    /// Extra separation past exact contact when pushing overlapping bodies apart
    pub const SEPARATION_SLOP: f32 = 0.01;
    /// Velocity impulse applied along the contact normal on every resolved overlap
    pub const CONTACT_REPULSION: f32 = 0.3;
    /// Offset applied to break exactly coincident centers
    pub const COINCIDENT_NUDGE: f32 = 0.1;

    /// Mass per unit area (mass = π·r²·density)
    pub const MASS_DENSITY: f32 = 0.01;

    /// Speed below which a body counts as resting
    pub const SETTLE_SPEED: f32 = 0.5;
    /// Consecutive slow ticks before a body is classified settled
    pub const SETTLE_TICKS: u32 = 30;

    /// Upward velocity bias given to a freshly merged body
    pub const MERGE_POP_VY: f32 = -1.0;

    /// Y coordinate of the game-over line
    pub const DANGER_LINE_Y: f32 = 80.0;
    /// Minimum ticks between successive drops (~500 ms at 60 Hz)
    pub const DROP_COOLDOWN_TICKS: u32 = 30;
    /// Ticks a settled body may linger above the danger line (~3 s at 60 Hz)
    pub const GAME_OVER_GRACE_TICKS: u32 = 180;
    /// Gap between a dropped fruit's top edge and the world ceiling
    pub const DROP_SPAWN_CLEARANCE: f32 = 10.0;
}
