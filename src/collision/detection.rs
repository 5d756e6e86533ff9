//! Pairwise ball-ball overlap detection.
//!
//! An O(n²) unordered scan in ball-list index order. A pair collides when
//! the center distance is strictly less than the sum of radii; exact
//! tangency is not a collision, so ties cannot occur.

use crate::types::{BallState, CollisionEvent};

/// Collision detector for the live ball set.
#[derive(Debug, Clone, Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Scan all active pairs and emit an event per overlap.
    ///
    /// The contact point lies on ball A's surface along the line of
    /// centers: `a.position + normalize(b.position - a.position) * a.radius`.
    /// Inactive balls never participate. `time_to_collision` is always 0.0
    /// in this discrete model.
    pub fn detect_collisions(&self, balls: &[BallState]) -> Vec<CollisionEvent> {
        let mut events = Vec::new();

        for i in 0..balls.len() {
            for j in (i + 1)..balls.len() {
                let a = &balls[i];
                let b = &balls[j];
                if !a.active || !b.active {
                    continue;
                }

                let delta = b.position - a.position;
                let distance = delta.length();
                if distance < a.radius + b.radius {
                    events.push(CollisionEvent {
                        collided: true,
                        time_to_collision: 0.0,
                        ball_a: a.id,
                        ball_b: b.id,
                        contact: a.position + delta.normalized() * a.radius,
                    });
                }
            }
        }

        events
    }
}

// =============================================================================
// Tests
// =============================================================================
