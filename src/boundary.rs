//! Table boundary model: cushions and bank-shot prediction.
//!
//! The table is an axis-aligned rectangle from (0, 0) to
//! (table_width, table_height). Cushion collisions are axis-aligned
//! reflections, not arbitrary-angle rail geometry:
//!
//! ```text
//! (0, h) ┌─────────────────────┐ (w, h)
//!        │                     │
//!        │   ● → → ─┐          │   a ball crossing an edge is clamped
//!        │          ↓          │   tangent to it and the corresponding
//!        │   ● ← ← ─┘          │   velocity component is negated * 0.8
//!        │                     │
//! (0, 0) └─────────────────────┘ (w, 0)
//! ```
//!
//! Both axes are evaluated independently in the same call, so a corner hit
//! reflects both components within one invocation.

use crate::config::SimulationConfig;
use crate::types::{constants, BallState, TrajectoryPoint, Vec2};

/// Boundary policy, parameterized by the simulation constants.
#[derive(Debug, Clone)]
pub struct TableBoundary {
    config: SimulationConfig,
}

impl TableBoundary {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Detect and resolve cushion collisions for one ball in place.
    ///
    /// Returns whether any cushion was struck (either axis, or both).
    pub fn handle_boundary_collision(&self, ball: &mut BallState) -> bool {
        let mut collided = false;

        // Left and right cushions
        if ball.position.x - ball.radius < 0.0 {
            ball.position.x = ball.radius;
            ball.velocity.x = -ball.velocity.x * constants::CUSHION_RESTITUTION;
            collided = true;
        } else if ball.position.x + ball.radius > self.config.table_width {
            ball.position.x = self.config.table_width - ball.radius;
            ball.velocity.x = -ball.velocity.x * constants::CUSHION_RESTITUTION;
            collided = true;
        }

        // Bottom and top cushions
        if ball.position.y - ball.radius < 0.0 {
            ball.position.y = ball.radius;
            ball.velocity.y = -ball.velocity.y * constants::CUSHION_RESTITUTION;
            collided = true;
        } else if ball.position.y + ball.radius > self.config.table_height {
            ball.position.y = self.config.table_height - ball.radius;
            ball.velocity.y = -ball.velocity.y * constants::CUSHION_RESTITUTION;
            collided = true;
        }

        collided
    }

    /// True when a disc of the given radius centered at `position` lies
    /// fully on the table (tangent to a cushion counts as inside).
    pub fn is_position_valid(&self, position: Vec2, radius: f64) -> bool {
        position.x - radius >= 0.0
            && position.x + radius <= self.config.table_width
            && position.y - radius >= 0.0
            && position.y + radius <= self.config.table_height
    }

    /// Pure containment predicate for a ball; no mutation.
    pub fn is_ball_in_bounds(&self, ball: &BallState) -> bool {
        self.is_position_valid(ball.position, ball.radius)
    }

    /// Predict a single-cushion bank shot.
    ///
    /// The reflection direction is decided analytically before simulating:
    /// `normal = normalize(start - cushion)`, `incident = normalize(target -
    /// cushion)`, `reflection = incident - 2 * (incident . normal) * normal`.
    /// The ball is launched toward the cushion point at `power * 3.0` and
    /// advanced position-only (no friction, no spin decay). On first
    /// 2-radius proximity to the cushion point the velocity is replaced by
    /// `normalize(reflection) * |velocity| * 0.9`, once. Simulation ends at
    /// natural stop, the 8 s cap, or the sample cap.
    ///
    /// Degenerate inputs (start or target coincident with the cushion
    /// point) yield an empty sequence.
    pub fn calculate_bank_shot(
        &self,
        start: Vec2,
        cushion: Vec2,
        target: Vec2,
        power: f64,
        spin_x: f64,
        spin_y: f64,
    ) -> Vec<TrajectoryPoint> {
        let to_cushion = cushion - start;
        if to_cushion.length_squared() < constants::EPSILON {
            return Vec::new();
        }
        let incident_vec = target - cushion;
        if incident_vec.length_squared() < constants::EPSILON {
            return Vec::new();
        }

        let normal = (start - cushion).normalized();
        let incident = incident_vec.normalized();
        let reflection = incident.reflect(&normal);

        let mut ball = BallState::new(
            start,
            to_cushion.normalized() * power * constants::POWER_SCALE,
            Vec2::new(spin_x, spin_y),
            constants::BALL_RADIUS,
            -2,
        );

        let dt = self.config.time_step;
        let cap = self.config.max_trajectory_points;
        let min_speed_sq = self.config.min_velocity * self.config.min_velocity;
        let proximity_sq = (2.0 * ball.radius) * (2.0 * ball.radius);

        let mut points = Vec::new();
        let mut time = 0.0;
        let mut bounced = false;
        points.push(TrajectoryPoint::new(ball.position, ball.velocity, time, true));

        while points.len() <= cap {
            if !bounced && (ball.position - cushion).length_squared() < proximity_sq {
                // One-time cushion impact: redirect with 10% energy loss
                ball.velocity =
                    reflection.normalized() * ball.velocity.length() * constants::BANK_RESTITUTION;
                bounced = true;
            }

            ball.position += ball.velocity * dt;
            time += dt;

            if ball.velocity.length_squared() < min_speed_sq {
                points.push(TrajectoryPoint::new(ball.position, Vec2::ZERO, time, true));
                break;
            }

            points.push(TrajectoryPoint::new(ball.position, ball.velocity, time, true));
            if time >= constants::BANK_TIME_CAP {
                break;
            }
        }

        points
    }
}

// =============================================================================
// Tests
// =============================================================================
