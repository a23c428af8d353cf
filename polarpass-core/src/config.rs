use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};

/// Segmenter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Latitude magnitude (degrees) at which passes begin and end
    #[serde(default = "default_boundary_lat")]
    pub boundary_lat: f64,

    /// Approximate orbital period in seconds, used to spot missed crossings
    #[serde(default = "default_orbital_period_s")]
    pub orbital_period_s: f64,

    /// Two same-kind crossings further apart than this many orbital periods
    /// get one placeholder inserted between them
    #[serde(default = "default_gap_factor")]
    pub gap_factor: f64,

    /// Use `-|boundary_lat|` as the threshold for southern samples
    #[serde(default)]
    pub mirror_southern_boundary: bool,
}

fn default_boundary_lat() -> f64 {
    50.0
}

fn default_orbital_period_s() -> f64 {
    90.0 * 60.0
}

fn default_gap_factor() -> f64 {
    1.5
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            boundary_lat: default_boundary_lat(),
            orbital_period_s: default_orbital_period_s(),
            gap_factor: default_gap_factor(),
            mirror_southern_boundary: false,
        }
    }
}

impl SegmenterConfig {
    pub fn new(boundary_lat: f64, orbital_period_s: f64) -> Self {
        Self {
            boundary_lat,
            orbital_period_s,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.boundary_lat.is_finite() {
            return Err(SegmentError::InvalidInput(format!(
                "boundary_lat must be finite, got {}",
                self.boundary_lat
            )));
        }
        if !(self.orbital_period_s.is_finite() && self.orbital_period_s > 0.0) {
            return Err(SegmentError::InvalidInput(format!(
                "orbital_period_s must be a positive number of seconds, got {}",
                self.orbital_period_s
            )));
        }
        if !(self.gap_factor.is_finite() && self.gap_factor > 1.0) {
            return Err(SegmentError::InvalidInput(format!(
                "gap_factor must be greater than 1, got {}",
                self.gap_factor
            )));
        }
        Ok(())
    }

    /// Elapsed seconds beyond which a same-kind crossing is assumed missed
    pub fn gap_threshold_s(&self) -> f64 {
        self.orbital_period_s * self.gap_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SegmenterConfig::default();
        assert_eq!(config.boundary_lat, 50.0);
        assert_eq!(config.orbital_period_s, 5400.0);
        assert_eq!(config.gap_threshold_s(), 8100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_period() {
        let config = SegmenterConfig::new(50.0, 0.0);
        assert!(matches!(config.validate(), Err(SegmentError::InvalidInput(_))));
        let config = SegmenterConfig::new(50.0, f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_boundary() {
        let config = SegmenterConfig::new(f64::NAN, 5400.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_boundary_is_legal() {
        assert!(SegmenterConfig::new(0.0, 5400.0).validate().is_ok());
    }
}
