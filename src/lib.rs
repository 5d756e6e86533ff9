//! # pool-core
//!
//! A deterministic, fixed-timestep 2D physics engine for pool/billiards
//! simulation: friction and spin decay, cushion and ball-ball collisions,
//! and trajectory prediction for shot planning.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec2, ball/trajectory/collision state)
//! - `config`: Simulation constants, validation, YAML loading
//! - `motion`: Per-step ball kinematics and shot/trajectory prediction
//! - `boundary`: Cushion collisions and bank-shot prediction
//! - `collision`: Ball-ball detection and impulse-based resolution
//! - `engine`: Main orchestrator owning the live ball set
//!
//! ## Quick start
//!
//! ```
//! use pool_core::{PoolEngine, Vec2};
//!
//! let mut engine = PoolEngine::default();
//! engine.add_ball(Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0), Vec2::ZERO, 0)?;
//!
//! // Step at 120 Hz for deterministic physics
//! for _ in 0..120 {
//!     engine.simulate_step(1.0 / 120.0)?;
//! }
//!
//! let balls = engine.ball_states();
//! assert!(balls[0].position.x > 1.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod boundary;
pub mod collision;
pub mod config;
pub mod engine;
pub mod motion;
pub mod types;

pub use boundary::TableBoundary;
pub use collision::{CollisionDetector, CollisionResolver};
pub use config::{ConfigError, SimulationConfig};
pub use engine::{EngineError, PoolEngine};
pub use motion::BallMotion;
pub use types::{BallState, CollisionEvent, TrajectoryPoint, Vec2};
