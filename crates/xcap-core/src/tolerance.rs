use crate::error::{Result, XcapError};
use crate::traits::Validate;

/// Numeric thresholds shared by normal estimation and mesh validation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Cross products shorter than this are treated as degenerate normals.
    pub normal_epsilon: f64,
    /// Allowed deviation of an emitted normal's length from 1.
    pub unit_length: f64,
}

impl Tolerance {
    pub const DEFAULT_NORMAL_EPSILON: f64 = 1e-12;
    pub const DEFAULT_UNIT_LENGTH: f64 = 1e-6;

    pub fn new(normal_epsilon: f64, unit_length: f64) -> Self {
        Self {
            normal_epsilon,
            unit_length,
        }
    }

    pub fn default_precision() -> Self {
        Self {
            normal_epsilon: Self::DEFAULT_NORMAL_EPSILON,
            unit_length: Self::DEFAULT_UNIT_LENGTH,
        }
    }

    /// Check whether a vector length is too small (or not finite) to normalize.
    pub fn is_degenerate(self, length: f64) -> bool {
        !length.is_finite() || length <= 0.0 || length < self.normal_epsilon
    }

    /// Check whether a vector length is 1 within `unit_length`.
    pub fn is_unit(self, length: f64) -> bool {
        (length - 1.0).abs() <= self.unit_length
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

impl Validate for Tolerance {
    fn validate(&self) -> Result<()> {
        if !self.normal_epsilon.is_finite() || self.normal_epsilon <= 0.0 {
            return Err(XcapError::Config(format!(
                "normal_epsilon must be positive, got {}",
                self.normal_epsilon
            )));
        }
        if !self.unit_length.is_finite() || self.unit_length < 0.0 {
            return Err(XcapError::Config(format!(
                "unit_length must be non-negative, got {}",
                self.unit_length
            )));
        }
        Ok(())
    }
}
