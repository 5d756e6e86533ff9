//! Ball-ball collision resolution.
//!
//! Two-stage response under an equal, unit-mass assumption:
//!
//! 1. **Positional correction** — both balls are pushed apart along the
//!    line of centers by half the overlap each, so a single application
//!    leaves zero residual overlap.
//! 2. **Velocity response** — a perfectly elastic 1-D collision along the
//!    normal: the normal components of the two velocities are exchanged,
//!    tangential components are untouched (frictionless billiard response,
//!    no rotational transfer). Pairs that are already separating are left
//!    alone.
//!
//! Geometry is re-derived from the current positions rather than taken
//! from the detection event, since earlier resolutions in the same batch
//! may already have moved either ball.

use crate::types::{constants, BallState, CollisionEvent};

/// Collision resolver. Stateless; operates on caller-passed balls.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve one detected collision in place.
    ///
    /// The event identifies the pair; its contact point is deliberately
    /// not trusted. Coincident centers leave no usable normal, so that
    /// degenerate case returns without touching either ball.
    pub fn resolve_ball_collision(
        &self,
        ball_a: &mut BallState,
        ball_b: &mut BallState,
        event: &CollisionEvent,
    ) {
        log::trace!(
            "resolving collision between balls {} and {}",
            event.ball_a,
            event.ball_b
        );

        let delta = ball_b.position - ball_a.position;
        let distance = delta.length();
        if distance < constants::EPSILON {
            return;
        }
        let normal = delta / distance;

        // Stage 1: positional correction, half the overlap each
        let overlap = (ball_a.radius + ball_b.radius) - distance;
        if overlap > 0.0 {
            let separation = normal * (overlap * 0.5);
            ball_a.position -= separation;
            ball_b.position += separation;
        }

        // Stage 2: velocity response, skipped for separating pairs
        let relative_velocity = ball_b.velocity - ball_a.velocity;
        let approach = relative_velocity.dot(&normal);
        if approach > 0.0 {
            return;
        }

        // Equal-mass elastic impulse along the normal
        ball_a.velocity += normal * approach;
        ball_b.velocity -= normal * approach;
    }
}

// =============================================================================
// Tests
// =============================================================================
