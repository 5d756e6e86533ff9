//! Simulation configuration.
//!
//! A [`SimulationConfig`] is an immutable-per-run bundle of physical
//! constants. It can be built in code, or loaded from YAML where every
//! field is optional and falls back to the standard table defaults:
//!
//! ```yaml
//! table_width: 9.0
//! table_height: 4.5
//! friction_coefficient: 0.02
//! spin_decay_rate: 0.98
//! gravity: 9.81
//! time_step: 0.008333333333333333   # 1/120 s
//! min_velocity: 0.001
//! max_trajectory_points: 1000
//! ```
//!
//! Validation is fail-fast: a zero or negative constant is rejected at
//! construction time rather than propagating NaNs through the simulation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {field} must be positive, got {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Physical constants for one engine instance.
///
/// Read-only during a step; replacing the configuration rebuilds the
/// engine's policy components but never touches the live ball set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Table length along X (standard 9ft table: 9.0)
    pub table_width: f64,

    /// Table width along Y (standard 9ft table: 4.5)
    pub table_height: f64,

    /// Linear friction coefficient (speed loss is constant per unit time)
    pub friction_coefficient: f64,

    /// Multiplicative per-step spin decay
    pub spin_decay_rate: f64,

    /// Gravitational acceleration, scales friction deceleration
    pub gravity: f64,

    /// Fixed integration timestep in seconds
    pub time_step: f64,

    /// Squared-speed stop threshold is `min_velocity`^2
    pub min_velocity: f64,

    /// Sample cap for trajectory prediction
    pub max_trajectory_points: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            table_width: 9.0,
            table_height: 4.5,
            friction_coefficient: 0.02,
            spin_decay_rate: 0.98,
            gravity: 9.81,
            time_step: 1.0 / 120.0,
            min_velocity: 0.001,
            max_trajectory_points: 1000,
        }
    }
}

impl SimulationConfig {
    /// Check that every constant is usable. All distances and rates must be
    /// strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("table_width", self.table_width),
            ("table_height", self.table_height),
            ("friction_coefficient", self.friction_coefficient),
            ("spin_decay_rate", self.spin_decay_rate),
            ("gravity", self.gravity),
            ("time_step", self.time_step),
            ("min_velocity", self.min_velocity),
        ];
        for (field, value) in checks {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        if self.max_trajectory_points == 0 {
            return Err(ConfigError::Invalid {
                field: "max_trajectory_points",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Parse a configuration from a YAML string and validate it.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file and validate it.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_standard_table() {
        let config = SimulationConfig::default();
        assert_eq!(config.table_width, 9.0);
        assert_eq!(config.table_height, 4.5);
        assert_eq!(config.friction_coefficient, 0.02);
        assert_eq!(config.spin_decay_rate, 0.98);
        assert_eq!(config.gravity, 9.81);
        assert_eq!(config.time_step, 1.0 / 120.0);
        assert_eq!(config.min_velocity, 0.001);
        assert_eq!(config.max_trajectory_points, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_timestep() {
        let config = SimulationConfig {
            time_step: 0.0,
            ..SimulationConfig::default()
        };
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "time_step"),
            other => panic!("Expected Invalid error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_friction() {
        let config = SimulationConfig {
            friction_coefficient: -0.02,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let config = SimulationConfig {
            gravity: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_sample_cap() {
        let config = SimulationConfig {
            max_trajectory_points: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_partial_config_uses_defaults() {
        let config = SimulationConfig::from_yaml_str("table_width: 8.0\n").unwrap();
        assert_eq!(config.table_width, 8.0);
        assert_eq!(config.table_height, 4.5);
        assert_eq!(config.time_step, 1.0 / 120.0);
    }

    #[test]
    fn test_yaml_full_config() {
        let yaml = "\
table_width: 9.0
table_height: 4.5
friction_coefficient: 0.05
spin_decay_rate: 0.95
gravity: 9.81
time_step: 0.01
min_velocity: 0.002
max_trajectory_points: 500
";
        let config = SimulationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.friction_coefficient, 0.05);
        assert_eq!(config.spin_decay_rate, 0.95);
        assert_eq!(config.max_trajectory_points, 500);
    }

    #[test]
    fn test_yaml_invalid_values_rejected() {
        let result = SimulationConfig::from_yaml_str("time_step: -0.01\n");
        assert!(result.is_err());
    }
}
