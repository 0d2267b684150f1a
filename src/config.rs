use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::constants::climber::*;
use crate::subsystems::climber::{AxisLimits, AxisTargets, Bounds, ClimbStepTable};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access climber config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse climber config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("climb step table has no rows")]
    EmptyStepTable,

    #[error("{axis} limits are inverted (min > max)")]
    InvertedLimits { axis: &'static str },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
}

/// Tunables for the climber, stored on the rio next to the offsets file.
///
/// Missing fields fall back to the values in [`crate::constants::climber`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClimberConfig {
    pub climb_steps: Vec<AxisTargets>,
    pub max_velocity: f64,
    pub max_acceleration: f64,
    pub allowed_error: f64,
    pub slow_velocity_scale: f64,
    pub rotate_trim: f64,
    pub extend_trim: f64,
    pub stick_threshold: f64,
    pub slow_trigger_threshold: f64,
    pub override_threshold: f64,
    pub limits: AxisLimits,
}

impl Default for ClimberConfig {
    fn default() -> Self {
        Self {
            climb_steps: CLIMB_STEPS.iter().copied().map(AxisTargets::from).collect(),
            max_velocity: MAX_VELOCITY,
            max_acceleration: MAX_ACCELERATION,
            allowed_error: ALLOWED_ERROR,
            slow_velocity_scale: SLOW_VELOCITY_SCALE,
            rotate_trim: ROTATE_TRIM,
            extend_trim: EXTEND_TRIM,
            stick_threshold: STICK_THRESHOLD,
            slow_trigger_threshold: SLOW_TRIGGER_THRESHOLD,
            override_threshold: OVERRIDE_THRESHOLD,
            limits: AxisLimits::default(),
        }
    }
}

impl ClimberConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;

        let config: Self = serde_json::from_str(&buf)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config, or logs why it couldn't and uses the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default climber config ({}): {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn store(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mut file = File::create(path)?;
        let buf = serde_json::to_string_pretty(&self)?;
        file.write_all(buf.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.climb_steps.is_empty() {
            return Err(ConfigError::EmptyStepTable);
        }

        let ranges: [(&'static str, &Bounds); 3] = [
            ("rotate right", &self.limits.rotate_right),
            ("rotate left", &self.limits.rotate_left),
            ("extend", &self.limits.extend),
        ];
        for (axis, bounds) in ranges {
            if !(bounds.min <= bounds.max) {
                return Err(ConfigError::InvertedLimits { axis });
            }
        }

        let positive: [(&'static str, f64); 3] = [
            ("max_velocity", self.max_velocity),
            ("max_acceleration", self.max_acceleration),
            ("slow_velocity_scale", self.slow_velocity_scale),
        ];
        for (field, value) in positive {
            if !(value > 0.) {
                return Err(ConfigError::NonPositive { field });
            }
        }

        Ok(())
    }

    pub fn step_table(&self) -> Result<ClimbStepTable, ConfigError> {
        ClimbStepTable::new(self.climb_steps.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClimberConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.climb_steps.len(), CLIMB_STEPS.len());
        assert_eq!(config.limits.extend.min, -5.625);
        assert_eq!(config.limits.extend.max, 149.0625);
    }

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climber.json");

        let mut config = ClimberConfig::default();
        config.max_velocity = 42.;
        config.climb_steps.push(AxisTargets::from([1., -1., 3., 4.]));
        config.store(&path).unwrap();

        assert_eq!(ClimberConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climber.json");
        std::fs::write(&path, r#"{ "climb_steps": [[0, 0, 0, 0], [10, -10, 50, 50]] }"#).unwrap();

        let config = ClimberConfig::load(&path).unwrap();
        assert_eq!(config.climb_steps.len(), 2);
        assert_eq!(config.climb_steps[1].right_rotate, -10.);
        assert_eq!(config.max_velocity, MAX_VELOCITY);
        assert_eq!(config.limits, AxisLimits::default());
    }

    #[test]
    fn rejects_empty_table() {
        let config = ClimberConfig {
            climb_steps: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyStepTable)));
    }

    #[test]
    fn rejects_inverted_limits() {
        let mut config = ClimberConfig::default();
        config.limits.rotate_left = Bounds::new(45., 0.);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedLimits { axis: "rotate left" })
        ));
    }

    #[test]
    fn rejects_zero_velocity() {
        let config = ClimberConfig {
            max_velocity: 0.,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "max_velocity" })
        ));
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClimberConfig::load_or_default(dir.path().join("nope.json"));
        assert_eq!(config, ClimberConfig::default());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climber.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(ClimberConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
