//! Collision detection and response for circles
//!
//! The stability-critical part of Fruitfall: overlapping stacks of circles
//! must separate without jitter or explosion. Positional correction plus a
//! small constant repulsion impulse, applied over a few solver passes, keeps
//! piles visually calm without a full impulse solver.

use super::body::Body;
use crate::consts::*;

/// Clamp a body inside the left, right, and floor bounds, reflecting the
/// offending velocity component by the body's restitution. There is no
/// ceiling: fruit are dropped in from above.
pub fn constrain_to_walls(body: &mut Body, width: f32, height: f32) {
    // Left wall
    if body.pos.x - body.radius < 0.0 {
        body.pos.x = body.radius;
        body.vel.x = body.vel.x.abs() * body.restitution;
    }
    // Right wall
    if body.pos.x + body.radius > width {
        body.pos.x = width - body.radius;
        body.vel.x = -body.vel.x.abs() * body.restitution;
    }
    // Floor
    if body.pos.y + body.radius > height {
        body.pos.y = height - body.radius;
        body.vel.y = -body.vel.y.abs() * body.restitution;
        // Kill residual micro-bounce so resting fruit actually rest
        if body.vel.y.abs() < FLOOR_STOP_EPSILON {
            body.vel.y = 0.0;
        }
    }
}

/// Resolve overlap between two circles, if any.
///
/// Separates both non-static bodies to exact contact distance (plus slop)
/// along the center-to-center normal and applies a constant repulsion
/// impulse. Returns whether a contact was resolved, which gates collision
/// notifications upstream.
///
/// Exactly coincident centers get an arbitrary x nudge, deferring proper
/// separation to the next solver pass, but still count as a resolved
/// contact so a same-level pair spawned on top of itself merges that step.
pub fn resolve_circle_overlap(a: &mut Body, b: &mut Body) -> bool {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius + b.radius;

    if dist_sq >= min_dist * min_dist {
        return false;
    }
    if dist_sq == 0.0 {
        b.pos.x += COINCIDENT_NUDGE;
        return true;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;

    let overlap = min_dist - dist;
    let separation = overlap / 2.0 + SEPARATION_SLOP;
    if !a.is_static {
        a.pos -= normal * separation;
    }
    if !b.is_static {
        b.pos += normal * separation;
    }

    // Constant pushback regardless of how much the positional correction
    // achieved; this is what stops deep stacks from oscillating
    if !a.is_static {
        a.vel -= normal * CONTACT_REPULSION;
    }
    if !b.is_static {
        b.vel += normal * CONTACT_REPULSION;
    }

    true
}
