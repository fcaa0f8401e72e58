//! The simulation engine
//!
//! Owns the live body set and advances it one fixed step at a time:
//! compaction, integration, iterative constraint solving, settling
//! classification. Contact notifications fire synchronously mid-step through
//! the injected [`ContactSink`].

use glam::Vec2;

use super::body::{Body, BodyId, SpawnOptions};
use super::collision::{constrain_to_walls, resolve_circle_overlap};
use crate::consts::*;

/// Consumer of first-iteration resolved contacts.
///
/// Invoked synchronously during [`PhysicsWorld::step`]; runs to completion
/// before the remaining pairs of the pass are checked. All population
/// mutations go through the `Bodies` handle, so marks made here are visible
/// to later pairs in the same pass.
pub trait ContactSink {
    fn on_contact(&mut self, bodies: &mut Bodies, a: BodyId, b: BodyId);
}

/// No-op sink for pure-physics use
impl ContactSink for () {
    fn on_contact(&mut self, _bodies: &mut Bodies, _a: BodyId, _b: BodyId) {}
}

/// The live body set: an index-stable arena.
///
/// Slots are compacted only at the start of a step and creation appends, so
/// slot indices stay valid for the whole step even while a notification
/// callback mutates the population.
#[derive(Debug)]
pub struct Bodies {
    slots: Vec<Body>,
    next_id: u32,
}

impl Bodies {
    fn new() -> Self {
        Self { slots: Vec::new(), next_id: 1 }
    }

    /// Allocate a new body. Overlapping spawn points are accepted; the next
    /// step's collision pass separates them.
    pub fn spawn(&mut self, pos: Vec2, radius: f32, level: usize, opts: SpawnOptions) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.slots.push(Body::new(id, pos, radius, level, opts));
        log::debug!("Spawned body {:?} level {} r{} at {:?}", id, level, radius, pos);
        id
    }

    /// Idempotently mark a body for removal. Unknown ids are a silent no-op.
    /// The slot is purged at the next step boundary, never mid-step.
    pub fn mark_removed(&mut self, id: BodyId) {
        if let Some(body) = self.slots.iter_mut().find(|b| b.id == id) {
            body.marked_for_removal = true;
        }
    }

    /// Look up a body, including ones already marked for removal (the merge
    /// rule inspects the mark to ignore stale contacts)
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots.iter_mut().find(|b| b.id == id)
    }

    /// Live (not marked) bodies, the set renderers and game logic see
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.slots.iter().filter(|b| !b.marked_for_removal)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.slots.iter_mut().filter(|b| !b.marked_for_removal)
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn compact(&mut self) {
        self.slots.retain(|b| !b.marked_for_removal);
    }
}

/// The physics world: bounds, tuning, the body arena, and the contact sink
/// injected at construction
#[derive(Debug)]
pub struct PhysicsWorld<S> {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub damping: f32,
    pub iterations: usize,
    bodies: Bodies,
    sink: S,
}

impl<S: ContactSink> PhysicsWorld<S> {
    pub fn new(width: f32, height: f32, sink: S) -> Self {
        Self {
            width,
            height,
            gravity: GRAVITY,
            damping: DAMPING,
            iterations: SOLVER_ITERATIONS,
            bodies: Bodies::new(),
            sink,
        }
    }

    pub fn bodies(&self) -> &Bodies {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut Bodies {
        &mut self.bodies
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Allocate a new body (see [`Bodies::spawn`])
    pub fn spawn_body(&mut self, pos: Vec2, radius: f32, level: usize, opts: SpawnOptions) -> BodyId {
        self.bodies.spawn(pos, radius, level, opts)
    }

    /// Idempotently request removal; applied at the next step boundary
    pub fn remove_body(&mut self, id: BodyId) {
        self.bodies.mark_removed(id);
    }

    /// Update world bounds. Existing bodies are left untouched; rescaling
    /// positions is the caller's responsibility.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Advance the simulation one step. Called exactly once per external
    /// tick; everything, notification callbacks included, completes before
    /// this returns.
    pub fn step(&mut self, dt: f32) {
        // 1. Compaction: removals requested during the previous step's
        // notifications take effect exactly here
        self.bodies.compact();

        // 2. Integration
        for body in self.bodies.slots.iter_mut() {
            if body.is_static {
                continue;
            }
            body.vel.y += self.gravity * dt;
            body.vel *= self.damping;
            body.pos += body.vel * dt;
        }

        // 3. Constraint solving: a fixed number of passes, approximate by
        // design. More passes shrink residual overlap; none iterate to
        // convergence.
        let (width, height) = (self.width, self.height);
        let iterations = self.iterations;
        let bodies = &mut self.bodies;
        let sink = &mut self.sink;

        // Bodies created by the sink append past this snapshot and sit out
        // all of this step's pair checks
        let count = bodies.slots.len();

        for iter in 0..iterations {
            for body in bodies.slots.iter_mut() {
                if !body.is_static && !body.marked_for_removal {
                    constrain_to_walls(body, width, height);
                }
            }

            for i in 0..count {
                for j in (i + 1)..count {
                    let contact = {
                        let (head, tail) = bodies.slots.split_at_mut(j);
                        let a = &mut head[i];
                        let b = &mut tail[0];
                        if a.marked_for_removal || b.marked_for_removal {
                            None
                        } else if resolve_circle_overlap(a, b) && iter == 0 {
                            // Notifications fire only on the first pass so a
                            // persisting contact raises one event per step
                            Some((a.id, b.id))
                        } else {
                            None
                        }
                    };
                    if let Some((id_a, id_b)) = contact {
                        sink.on_contact(bodies, id_a, id_b);
                    }
                }
            }
        }

        // Final wall clamp so containment holds at the step boundary even
        // when the last pair pass pushed a body into a wall
        for body in self.bodies.slots.iter_mut() {
            if !body.is_static && !body.marked_for_removal {
                constrain_to_walls(body, width, height);
            }
        }

        // 4. Settling classification
        for body in self.bodies.slots.iter_mut() {
            if body.is_static || body.marked_for_removal {
                continue;
            }
            if body.speed() < SETTLE_SPEED {
                body.settled_ticks += 1;
                if body.settled_ticks > SETTLE_TICKS {
                    body.settled = true;
                }
            } else {
                body.settled_ticks = 0;
                body.settled = false;
            }
        }
    }
}
