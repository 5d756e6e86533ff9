//! Core types for the pool physics simulation.
//!
//! All units are SI-ish table units:
//! - Position: table units (a 9ft table is 9.0 x 4.5)
//! - Velocity: units per second
//! - Angular velocity (spin): a 2D proxy value, decays geometrically
//! - Time: seconds

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D vector used for positions, velocities, and spin.
///
/// Coordinate system:
/// - X: along the table length (0 at the left cushion)
/// - Y: along the table width (0 at the bottom cushion)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared length (avoids sqrt for comparisons)
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Length (magnitude) of the vector
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if the length is zero
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len < constants::EPSILON {
            Self::ZERO
        } else {
            *self / len
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Reflect this vector around a normal
    pub fn reflect(&self, normal: &Self) -> Self {
        *self - *normal * 2.0 * self.dot(normal)
    }
}

// Operator overloads for Vec2
impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Ball State
// =============================================================================

/// Complete state of one ball at a given instant.
///
/// Identifiers are caller-supplied; the engine never generates them.
/// `active = false` marks the ball for removal at the end of the current
/// step, never mid-step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Spin proxy. Decays geometrically; does not feed back into
    /// translational motion (no curve/swerve).
    pub angular_velocity: Vec2,
    pub radius: f64,
    pub active: bool,
    pub id: i32,
}

impl BallState {
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        angular_velocity: Vec2,
        radius: f64,
        id: i32,
    ) -> Self {
        Self {
            position,
            velocity,
            angular_velocity,
            radius,
            active: true,
            id,
        }
    }

    /// Ball at rest at a given position, standard radius
    pub fn at_rest(position: Vec2, id: i32) -> Self {
        Self::new(position, Vec2::ZERO, Vec2::ZERO, constants::BALL_RADIUS, id)
    }

    /// Current speed in units per second
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

// =============================================================================
// Trajectory Point
// =============================================================================

/// One time-stamped sample of a predicted trajectory.
///
/// Produced only by prediction queries and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub position: Vec2,
    pub velocity: Vec2,
    pub time: f64,
    pub valid: bool,
}

impl TrajectoryPoint {
    pub fn new(position: Vec2, velocity: Vec2, time: f64, valid: bool) -> Self {
        Self {
            position,
            velocity,
            time,
            valid,
        }
    }

    /// The all-zero invalid point returned by failed shot predictions.
    pub fn invalid() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO, 0.0, false)
    }
}

// =============================================================================
// Collision Event
// =============================================================================

/// A detected ball-ball overlap.
///
/// Ephemeral: exists only within one detection pass. Detection is discrete
/// and positional, so `time_to_collision` is always 0.0 and encodes nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub collided: bool,
    pub time_to_collision: f64,
    pub ball_a: i32,
    pub ball_b: i32,
    pub contact: Vec2,
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Fixed physical factors shared by every configuration.
pub mod constants {
    /// Standard pool ball radius (1.125 inches in table units)
    pub const BALL_RADIUS: f64 = 0.028575;

    /// Fractional velocity retained after a cushion strike
    pub const CUSHION_RESTITUTION: f64 = 0.8;

    /// Fractional velocity retained at the cushion impact of a bank shot
    pub const BANK_RESTITUTION: f64 = 0.9;

    /// Scale from shot power to initial velocity
    pub const POWER_SCALE: f64 = 3.0;

    /// Hard wall-clock cap on direct-shot forward simulation (seconds)
    pub const SHOT_TIME_CAP: f64 = 15.0;

    /// Hard wall-clock cap on bank-shot forward simulation (seconds)
    pub const BANK_TIME_CAP: f64 = 8.0;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
