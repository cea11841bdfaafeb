//! Guidance constants and configuration
//!
//! The constants are the single definition used across the crate.
//! `GuidanceConfig` exposes the tunable ones so an extraction run can
//! override them from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GuidanceError, Result};

/// Distance (meters) from the junction at which a road's representative
/// coordinate is sampled.
pub const DESIRED_SEGMENT_LENGTH: f64 = 10.0;

/// Number of direction modifiers on the turn circle.
pub const NUM_DIRECTION_MODIFIERS: u8 = 8;

/// Number of buckets in a discrete angle.
pub const NUM_DISCRETE_ANGLES: u16 = 256;

/// Width of one discrete angle bucket in degrees.
pub const DISCRETE_ANGLE_STEP_SIZE: f64 = 360.0 / NUM_DISCRETE_ANGLES as f64;

/// Largest priority difference between two road classes that still
/// allows presenting them as a fork.
pub const MAX_FORK_PRIORITY_GAP: u32 = 1;

/// Tunable guidance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Sampling distance for representative coordinates (meters)
    pub desired_segment_length_m: f64,

    /// Maximum road priority gap for fork detection
    pub max_fork_priority_gap: u32,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            desired_segment_length_m: DESIRED_SEGMENT_LENGTH,
            max_fork_priority_gap: MAX_FORK_PRIORITY_GAP,
        }
    }
}

impl GuidanceConfig {
    /// Parse and validate a configuration from JSON. Missing fields keep
    /// their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GuidanceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            desired_segment_length_m = config.desired_segment_length_m,
            max_fork_priority_gap = config.max_fork_priority_gap,
            "loaded guidance config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.desired_segment_length_m.is_finite() || self.desired_segment_length_m <= 0.0 {
            return Err(GuidanceError::InvalidConfig(format!(
                "desired_segment_length_m must be positive and finite, got {}",
                self.desired_segment_length_m
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GuidanceConfig::default();
        assert_eq!(config.desired_segment_length_m, DESIRED_SEGMENT_LENGTH);
        assert_eq!(config.max_fork_priority_gap, MAX_FORK_PRIORITY_GAP);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GuidanceConfig::from_json_str(r#"{"desired_segment_length_m": 25.0}"#).unwrap();
        assert_eq!(config.desired_segment_length_m, 25.0);
        assert_eq!(config.max_fork_priority_gap, MAX_FORK_PRIORITY_GAP);
    }

    #[test]
    fn test_rejects_non_positive_length() {
        let err = GuidanceConfig::from_json_str(r#"{"desired_segment_length_m": 0.0}"#).unwrap_err();
        assert!(matches!(err, GuidanceError::InvalidConfig(_)));

        let err = GuidanceConfig::from_json_str(r#"{"desired_segment_length_m": -3.5}"#).unwrap_err();
        assert!(matches!(err, GuidanceError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = GuidanceConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, GuidanceError::Json(_)));
    }

    #[test]
    fn test_discrete_step_size() {
        assert!((DISCRETE_ANGLE_STEP_SIZE * NUM_DISCRETE_ANGLES as f64 - 360.0).abs() < 1e-12);
    }
}
