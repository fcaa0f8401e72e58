//! Deterministic simulation module
//!
//! All mechanical logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one `step` per external tick
//! - Seeded RNG only (injected by the session layer)
//! - Stable iteration order (bodies keep their slot for the whole step)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod merge;
pub mod world;

pub use body::{Body, BodyId, SpawnOptions};
pub use merge::{Burst, BurstQueue, EffectSink, MergeController, ScoreSink};
pub use world::{Bodies, ContactSink, PhysicsWorld};
