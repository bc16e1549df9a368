//! Controller configuration
//!
//! Tunable parameters around the fixed rule base.  The defaults reproduce
//! the reference controller; the host binary can override them from a
//! JSON file.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Gear hysteresis ---
    /// Minimum |speed − speed at last gear change| before a new gear is
    /// accepted
    pub gear_change_speed_delta: f32,
    /// Held gears at or below this value change freely
    pub free_gear_change_max: i32,

    // --- Defuzzification ---
    /// Centroid sample count for every output variable
    pub defuzzifier_resolution: u16,

    // --- Reporting ---
    /// Ticks between telemetry events (0 disables telemetry)
    pub telemetry_interval_ticks: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Gear hysteresis
            gear_change_speed_delta: 5.0,
            free_gear_change_max: 2,

            // Defuzzification
            defuzzifier_resolution: 100,

            // Reporting
            telemetry_interval_ticks: 50,
        }
    }
}

impl ControllerConfig {
    /// Reject values that would make the controller misbehave rather than
    /// clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gear_change_speed_delta.is_finite() || self.gear_change_speed_delta < 0.0 {
            return Err(ConfigError::InvalidSetting(
                "gear_change_speed_delta must be finite and non-negative",
            ));
        }
        if !(-1..=6).contains(&self.free_gear_change_max) {
            return Err(ConfigError::InvalidSetting(
                "free_gear_change_max must be a gear in -1..=6",
            ));
        }
        if self.defuzzifier_resolution == 0 {
            return Err(ConfigError::InvalidSetting(
                "defuzzifier_resolution must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = ControllerConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.gear_change_speed_delta, 5.0);
        assert_eq!(c.free_gear_change_max, 2);
        assert_eq!(c.defuzzifier_resolution, 100);
    }

    #[test]
    fn serde_roundtrip() {
        let c = ControllerConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: ControllerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: ControllerConfig = serde_json::from_str(r#"{"gear_change_speed_delta": 8.0}"#).unwrap();
        assert_eq!(c.gear_change_speed_delta, 8.0);
        assert_eq!(c.defuzzifier_resolution, 100);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = ControllerConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: ControllerConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut c = ControllerConfig::default();
        c.gear_change_speed_delta = f32::NAN;
        assert!(c.validate().is_err());

        let mut c = ControllerConfig::default();
        c.gear_change_speed_delta = -1.0;
        assert!(c.validate().is_err());

        let mut c = ControllerConfig::default();
        c.defuzzifier_resolution = 0;
        assert!(c.validate().is_err());

        let mut c = ControllerConfig::default();
        c.free_gear_change_max = 9;
        assert!(c.validate().is_err());
    }
}
