//! Simulation orchestrator.
//!
//! [`PoolEngine`] owns the live ball set and the configuration, and drives
//! one engine step per call through four fixed phases:
//!
//! 1. motion model, every active ball
//! 2. boundary model, every active ball
//! 3. collision detection over the post-boundary positions, then
//!    resolution of every reported event against the live balls
//! 4. removal of balls flagged inactive
//!
//! Phases never interleave: all balls complete a phase before any enters
//! the next, so collision response always sees post-motion, post-boundary
//! state. Trajectory and shot queries bypass the live set entirely and run
//! isolated forward simulations.
//!
//! The engine is single-threaded and synchronous; every operation runs to
//! completion. Callers drive the step cadence (e.g. 1/120 s for
//! deterministic physics independent of render rate) and receive read-only
//! snapshots, never references into the live set.

use thiserror::Error;

use crate::boundary::TableBoundary;
use crate::collision::{CollisionDetector, CollisionResolver};
use crate::config::{ConfigError, SimulationConfig};
use crate::motion::BallMotion;
use crate::types::{constants, BallState, TrajectoryPoint, Vec2};

/// Errors surfaced at the orchestrator's public boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A ball with this identifier is already in the live set.
    #[error("duplicate ball identifier: {0}")]
    DuplicateBallId(i32),

    /// `simulate_step` requires a non-negative delta time.
    #[error("delta time must be non-negative, got {0}")]
    InvalidDeltaTime(f64),
}

/// The pool physics engine.
///
/// Exclusively owns the live ball collection and the configuration. The
/// motion, boundary, and collision components are stateless policy objects
/// rebuilt wholesale on reconfiguration; swapping the configuration never
/// touches the ball set.
#[derive(Debug)]
pub struct PoolEngine {
    config: SimulationConfig,
    motion: BallMotion,
    boundary: TableBoundary,
    detector: CollisionDetector,
    resolver: CollisionResolver,
    balls: Vec<BallState>,
}

impl Default for PoolEngine {
    fn default() -> Self {
        let config = SimulationConfig::default();
        Self {
            motion: BallMotion::new(config.clone()),
            boundary: TableBoundary::new(config.clone()),
            detector: CollisionDetector::new(),
            resolver: CollisionResolver::new(),
            balls: Vec::new(),
            config,
        }
    }
}

impl PoolEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            motion: BallMotion::new(config.clone()),
            boundary: TableBoundary::new(config.clone()),
            detector: CollisionDetector::new(),
            resolver: CollisionResolver::new(),
            balls: Vec::new(),
            config,
        })
    }

    /// Add a ball with full initial state.
    ///
    /// Identifiers need not be contiguous, but must be unique within the
    /// live set; a duplicate is rejected rather than silently accepted.
    pub fn add_ball(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        angular_velocity: Vec2,
        id: i32,
    ) -> Result<(), EngineError> {
        if self.balls.iter().any(|ball| ball.id == id) {
            return Err(EngineError::DuplicateBallId(id));
        }
        self.balls.push(BallState::new(
            position,
            velocity,
            angular_velocity,
            constants::BALL_RADIUS,
            id,
        ));
        log::debug!("added ball {id} at ({}, {})", position.x, position.y);
        Ok(())
    }

    /// Remove every ball from the live set.
    pub fn clear_balls(&mut self) {
        self.balls.clear();
    }

    /// Mark a ball for removal at the end of the current step.
    ///
    /// Returns whether the identifier was found. Used by the surrounding
    /// rules layer, e.g. when a ball is pocketed.
    pub fn deactivate_ball(&mut self, id: i32) -> bool {
        match self.balls.iter_mut().find(|ball| ball.id == id) {
            Some(ball) => {
                ball.active = false;
                true
            }
            None => false,
        }
    }

    /// Number of balls currently in the live set.
    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    /// Snapshot of all ball states, in insertion order.
    ///
    /// A copy: safe to retain across further steps.
    pub fn ball_states(&self) -> Vec<BallState> {
        self.balls.clone()
    }

    /// Advance the whole simulation by one step of elapsed time `dt`.
    ///
    /// Zero `dt` is a valid no-motion no-op; negative `dt` is rejected.
    pub fn simulate_step(&mut self, dt: f64) -> Result<(), EngineError> {
        if !(dt >= 0.0) {
            // Also rejects NaN
            return Err(EngineError::InvalidDeltaTime(dt));
        }

        // Phase 1: motion
        for ball in self.balls.iter_mut().filter(|ball| ball.active) {
            self.motion.update_ball(ball, dt);
        }

        // Phase 2: boundaries
        for ball in self.balls.iter_mut().filter(|ball| ball.active) {
            self.boundary.handle_boundary_collision(ball);
        }

        // Phase 3: ball-ball collisions over post-boundary positions
        let events = self.detector.detect_collisions(&self.balls);
        if !events.is_empty() {
            log::trace!("step resolved {} collision event(s)", events.len());
        }
        for event in &events {
            // Id lookup rather than index: a no-op if either ball has
            // meanwhile become inactive or was removed
            let Some(index_a) = self.find_active_index(event.ball_a) else {
                continue;
            };
            let Some(index_b) = self.find_active_index(event.ball_b) else {
                continue;
            };
            if index_a == index_b {
                continue;
            }

            if index_a < index_b {
                let (head, tail) = self.balls.split_at_mut(index_b);
                self.resolver
                    .resolve_ball_collision(&mut head[index_a], &mut tail[0], event);
            } else {
                let (head, tail) = self.balls.split_at_mut(index_a);
                self.resolver
                    .resolve_ball_collision(&mut tail[0], &mut head[index_b], event);
            }
        }

        // Phase 4: cleanup
        self.balls.retain(|ball| ball.active);

        Ok(())
    }

    /// Predict the trajectory of the ball with the given identifier.
    ///
    /// Runs an isolated forward simulation on a copy of the ball; the live
    /// set is not consulted or mutated. An unknown identifier yields an
    /// empty sequence, not an error.
    pub fn calculate_trajectory(&self, id: i32, max_time: f64) -> Vec<TrajectoryPoint> {
        match self.balls.iter().find(|ball| ball.id == id) {
            Some(ball) => self.motion.calculate_trajectory(*ball, max_time),
            None => Vec::new(),
        }
    }

    /// Predict the outcome of a direct shot. See [`BallMotion::calculate_shot`].
    pub fn calculate_shot(
        &self,
        start: Vec2,
        target: Vec2,
        power: f64,
        spin_x: f64,
        spin_y: f64,
    ) -> TrajectoryPoint {
        self.motion.calculate_shot(start, target, power, spin_x, spin_y)
    }

    /// Predict a single-cushion bank shot. See
    /// [`TableBoundary::calculate_bank_shot`].
    pub fn calculate_bank_shot(
        &self,
        start: Vec2,
        cushion: Vec2,
        target: Vec2,
        power: f64,
        spin_x: f64,
        spin_y: f64,
    ) -> Vec<TrajectoryPoint> {
        self.boundary
            .calculate_bank_shot(start, cushion, target, power, spin_x, spin_y)
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Validates, then rebuilds the motion, boundary, and collision policy
    /// components with the new constants. The live ball set is preserved.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.motion = BallMotion::new(config.clone());
        self.boundary = TableBoundary::new(config.clone());
        self.detector = CollisionDetector::new();
        self.resolver = CollisionResolver::new();
        self.config = config;
        log::debug!(
            "engine reconfigured, {} live ball(s) preserved",
            self.balls.len()
        );
        Ok(())
    }

    fn find_active_index(&self, id: i32) -> Option<usize> {
        self.balls
            .iter()
            .position(|ball| ball.active && ball.id == id)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_ball(id: i32, position: Vec2, velocity: Vec2) -> PoolEngine {
        let mut engine = PoolEngine::default();
        engine
            .add_ball(position, velocity, Vec2::ZERO, id)
            .expect("fresh id");
        engine
    }

    #[test]
    fn test_add_ball_rejects_duplicate_id() {
        let mut engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::ZERO);
        let result = engine.add_ball(Vec2::new(2.0, 2.0), Vec2::ZERO, Vec2::ZERO, 1);
        assert!(matches!(result, Err(EngineError::DuplicateBallId(1))));
        assert_eq!(engine.ball_count(), 1);
    }

    #[test]
    fn test_ids_need_not_be_contiguous() {
        let mut engine = PoolEngine::default();
        for id in [7, -3, 100] {
            engine
                .add_ball(Vec2::new(1.0 + id as f64 * 0.001, 1.0), Vec2::ZERO, Vec2::ZERO, id)
                .unwrap();
        }
        assert_eq!(engine.ball_count(), 3);
    }

    #[test]
    fn test_clear_balls() {
        let mut engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::ZERO);
        engine.clear_balls();
        assert_eq!(engine.ball_count(), 0);
        assert!(engine.ball_states().is_empty());
    }

    #[test]
    fn test_negative_dt_is_rejected() {
        let mut engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        let result = engine.simulate_step(-0.01);
        assert!(matches!(result, Err(EngineError::InvalidDeltaTime(_))));

        // State untouched after the rejection
        let ball = engine.ball_states()[0];
        assert_eq!(ball.position, Vec2::new(1.0, 1.0));
        assert_eq!(ball.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_nan_dt_is_rejected() {
        let mut engine = PoolEngine::default();
        assert!(engine.simulate_step(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_dt_is_a_no_motion_noop() {
        let mut engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        engine.simulate_step(0.0).unwrap();

        let ball = engine.ball_states()[0];
        assert_eq!(ball.position, Vec2::new(1.0, 1.0));
        assert_eq!(ball.velocity, Vec2::new(1.0, 0.0));
        // Spin decay is per-step, so it still applies at dt = 0
    }

    #[test]
    fn test_step_advances_position() {
        let mut engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::new(1.2, 0.0));
        engine.simulate_step(1.0 / 120.0).unwrap();

        let ball = engine.ball_states()[0];
        assert!(ball.position.x > 1.0);
        assert!(ball.velocity.x < 1.2, "Friction applied");
        assert_eq!(ball.position.y, 1.0);
    }

    #[test]
    fn test_inactive_balls_removed_after_step() {
        let mut engine = PoolEngine::default();
        engine
            .add_ball(Vec2::new(1.0, 1.0), Vec2::ZERO, Vec2::ZERO, 1)
            .unwrap();
        engine
            .add_ball(Vec2::new(2.0, 1.0), Vec2::ZERO, Vec2::ZERO, 2)
            .unwrap();

        assert!(engine.deactivate_ball(2));
        assert!(!engine.deactivate_ball(99));
        assert_eq!(engine.ball_count(), 2, "Removal happens at end of step");

        engine.simulate_step(1.0 / 120.0).unwrap();
        let states = engine.ball_states();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].id, 1);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        let before = engine.ball_states();
        engine.simulate_step(1.0 / 120.0).unwrap();

        assert_eq!(before[0].position, Vec2::new(1.0, 1.0), "Snapshot unaffected");
        assert!(engine.ball_states()[0].position.x > 1.0);
    }

    #[test]
    fn test_trajectory_unknown_id_is_empty() {
        let engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        assert!(engine.calculate_trajectory(42, 10.0).is_empty());
    }

    #[test]
    fn test_trajectory_does_not_mutate_live_ball() {
        let engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        let trajectory = engine.calculate_trajectory(1, 10.0);
        assert!(trajectory.len() > 1);
        assert_eq!(engine.ball_states()[0].position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_step_resolves_overlapping_balls() {
        let mut engine = PoolEngine::default();
        engine
            .add_ball(Vec2::new(1.0, 1.0), Vec2::ZERO, Vec2::ZERO, 1)
            .unwrap();
        engine
            .add_ball(Vec2::new(1.04, 1.0), Vec2::ZERO, Vec2::ZERO, 2)
            .unwrap();

        engine.simulate_step(1.0 / 120.0).unwrap();

        let states = engine.ball_states();
        let distance = (states[1].position - states[0].position).length();
        assert!(
            distance >= 2.0 * constants::BALL_RADIUS - 1e-12,
            "Step must de-overlap resting balls, distance {}",
            distance
        );
    }

    #[test]
    fn test_set_config_rejects_invalid_and_keeps_old() {
        let mut engine = PoolEngine::default();
        let bad = SimulationConfig {
            time_step: -1.0,
            ..SimulationConfig::default()
        };
        assert!(engine.set_config(bad).is_err());
        assert_eq!(engine.config().time_step, 1.0 / 120.0);
    }

    #[test]
    fn test_set_config_preserves_live_balls() {
        let mut engine = engine_with_ball(1, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        let config = SimulationConfig {
            friction_coefficient: 0.1,
            ..SimulationConfig::default()
        };
        engine.set_config(config).unwrap();

        assert_eq!(engine.ball_count(), 1);
        assert_eq!(engine.config().friction_coefficient, 0.1);
        assert_eq!(engine.ball_states()[0].velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            table_width: 0.0,
            ..SimulationConfig::default()
        };
        assert!(PoolEngine::new(config).is_err());
    }
}
