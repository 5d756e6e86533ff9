//! Ball motion model: friction, spin decay, and integration.
//!
//! The model is deliberately simple and deterministic:
//!
//! - **Friction** is linear: speed drops by `friction * gravity * dt` each
//!   step, independent of the current speed, floored at zero. A rolling
//!   ball therefore stops after a finite, predictable distance
//!   (`v^2 / (2 * friction * gravity)`).
//! - **Spin decay** is geometric: angular velocity is scaled by
//!   `spin_decay_rate` once per update. Spin never feeds back into
//!   translational motion.
//! - **Integration** is explicit forward Euler: `position += velocity * dt`.
//!
//! Trajectory and shot prediction run the same per-step update on a
//! synthetic ball, with hard time and sample caps so pathological inputs
//! cannot loop forever.

use crate::config::SimulationConfig;
use crate::types::{constants, BallState, TrajectoryPoint, Vec2};

/// Motion policy, parameterized by the simulation constants.
///
/// Stateless apart from the config: operates on caller-passed balls and
/// owns no simulation state itself.
#[derive(Debug, Clone)]
pub struct BallMotion {
    config: SimulationConfig,
}

impl BallMotion {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Advance one ball's kinematics in place for elapsed time `dt`.
    pub fn update_ball(&self, ball: &mut BallState, dt: f64) {
        // Linear friction: constant speed loss per unit time, direction preserved
        let speed = ball.velocity.length();
        if speed > 0.0 {
            let friction_loss = self.config.friction_coefficient * self.config.gravity * dt;
            let new_speed = (speed - friction_loss).max(0.0);
            if new_speed > 0.0 {
                ball.velocity = ball.velocity * (new_speed / speed);
            } else {
                ball.velocity = Vec2::ZERO;
            }
        }

        // Geometric per-update spin decay
        ball.angular_velocity = ball.angular_velocity * self.config.spin_decay_rate;

        // Forward Euler position integration
        ball.position += ball.velocity * dt;
    }

    /// True when the squared speed is below `min_velocity`^2 (no sqrt).
    pub fn is_ball_stopped(&self, ball: &BallState) -> bool {
        ball.velocity.length_squared() < self.config.min_velocity * self.config.min_velocity
    }

    /// Predict an unbounded trajectory: no table edges, no other balls.
    ///
    /// Samples the ball state at the configured timestep until it stops
    /// naturally (appending one final zero-velocity point), `max_time` is
    /// reached, or the sample cap is hit — whichever comes first. Returns
    /// at most `max_trajectory_points + 1` points; the terminal point
    /// either has zero velocity or a timestamp at or past `max_time`.
    pub fn calculate_trajectory(
        &self,
        mut ball: BallState,
        max_time: f64,
    ) -> Vec<TrajectoryPoint> {
        let dt = self.config.time_step;
        let cap = self.config.max_trajectory_points;

        let mut points = Vec::new();
        let mut time = 0.0;
        points.push(TrajectoryPoint::new(ball.position, ball.velocity, time, true));

        while points.len() <= cap {
            self.update_ball(&mut ball, dt);
            time += dt;

            if self.is_ball_stopped(&ball) {
                // Final resting sample
                points.push(TrajectoryPoint::new(ball.position, Vec2::ZERO, time, true));
                break;
            }

            points.push(TrajectoryPoint::new(ball.position, ball.velocity, time, true));
            if time >= max_time {
                break;
            }
        }

        points
    }

    /// Predict the outcome of a direct shot from `start` toward `target`.
    ///
    /// A synthetic ball is launched with velocity
    /// `normalize(target - start) * power * 3.0` and the given spin, then
    /// forward-simulated until it comes within the target proximity
    /// (`dist^2 < 8 * radius^2`), rolls to a natural stop, or the 15 s cap
    /// expires. Only the proximity outcome is marked valid.
    pub fn calculate_shot(
        &self,
        start: Vec2,
        target: Vec2,
        power: f64,
        spin_x: f64,
        spin_y: f64,
    ) -> TrajectoryPoint {
        let delta = target - start;
        if delta.length_squared() < constants::EPSILON {
            // Degenerate: no direction to shoot along
            return TrajectoryPoint::new(start, Vec2::ZERO, 0.0, false);
        }

        let mut ball = BallState::new(
            start,
            delta.normalized() * power * constants::POWER_SCALE,
            Vec2::new(spin_x, spin_y),
            constants::BALL_RADIUS,
            -1,
        );

        let dt = self.config.time_step;
        let proximity_sq = 8.0 * ball.radius * ball.radius;
        let mut time = 0.0;

        while time < constants::SHOT_TIME_CAP {
            self.update_ball(&mut ball, dt);
            time += dt;

            if (ball.position - target).length_squared() < proximity_sq {
                return TrajectoryPoint::new(ball.position, ball.velocity, time, true);
            }
            if self.is_ball_stopped(&ball) {
                // Rolled to a stop short of the target
                break;
            }
        }

        TrajectoryPoint::invalid()
    }
}

// =============================================================================
// Tests
// =============================================================================
