//! Runtime configuration for surface generation and the interactive view.
//!
//! Every field has a default, so a JSON document only needs to name the
//! values it overrides:
//!
//! ```json
//! { "surface": { "r_max": 1.5 }, "view": { "zoom": 2.0 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XcapError};
use crate::tolerance::Tolerance;
use crate::traits::Validate;

/// Smallest radius the surface equations may be sampled at (`1/r` singularity at 0).
pub const R_FLOOR: f64 = 0.25;

/// How the angular parameter is turned into the `v` texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TexCoordMode {
    /// `v = theta / 2 * PI`, evaluated left to right.
    #[default]
    Literal,
    /// `v = theta / (2 * PI)`, so `v` lies in `[0, 1)`.
    Normalized,
}

/// What to do when the tangent cross product is too short to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateNormalPolicy {
    /// Substitute the unit +Z axis and keep going.
    #[default]
    Fallback,
    /// Abort tessellation with [`XcapError::DegenerateNormal`].
    Reject,
}

/// Parameter domain and sampling resolution of the generated surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub r_min: f64,
    pub r_max: f64,
    /// Grid spacing in both `r` and `theta`.
    pub step: f64,
    /// Finite-difference offset used for normal estimation.
    pub delta: f64,
    pub texcoord_mode: TexCoordMode,
    pub degenerate_normals: DegenerateNormalPolicy,
    pub tolerance: Tolerance,
}

impl SurfaceConfig {
    pub const DEFAULT_R_MAX: f64 = 1.0;
    pub const DEFAULT_STEP: f64 = 0.01;
    pub const DEFAULT_DELTA: f64 = 0.001;

    /// Default configuration with a different outer radius.
    pub fn with_r_max(r_max: f64) -> Self {
        Self {
            r_max,
            ..Self::default()
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            r_min: R_FLOOR,
            r_max: Self::DEFAULT_R_MAX,
            step: Self::DEFAULT_STEP,
            delta: Self::DEFAULT_DELTA,
            texcoord_mode: TexCoordMode::default(),
            degenerate_normals: DegenerateNormalPolicy::default(),
            tolerance: Tolerance::default(),
        }
    }
}

impl Validate for SurfaceConfig {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("r_min", self.r_min),
            ("r_max", self.r_max),
            ("step", self.step),
            ("delta", self.delta),
        ] {
            if !value.is_finite() {
                return Err(XcapError::InvalidDomain(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.r_min <= 0.0 || self.r_min < R_FLOOR {
            return Err(XcapError::InvalidDomain(format!(
                "r_min ({}) must be at least {R_FLOOR}",
                self.r_min
            )));
        }
        if self.r_max <= self.r_min {
            return Err(XcapError::InvalidDomain(format!(
                "r_max ({}) must exceed r_min ({})",
                self.r_max, self.r_min
            )));
        }
        if self.step <= 0.0 {
            return Err(XcapError::InvalidDomain(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.delta <= 0.0 {
            return Err(XcapError::InvalidDomain(format!(
                "delta must be positive, got {}",
                self.delta
            )));
        }
        self.tolerance.validate()
    }
}

/// Camera and uniform settings of the interactive view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub zoom: f64,
    pub angle_degrees: f64,
    /// Increment applied to the user point per key press.
    pub user_point_step: f64,
    pub light_position: [f64; 3],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            angle_degrees: 0.0,
            user_point_step: 0.05,
            light_position: [0.0, 1.0, 0.0],
        }
    }
}

impl Validate for ViewConfig {
    fn validate(&self) -> Result<()> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(XcapError::Config(format!(
                "zoom must be positive, got {}",
                self.zoom
            )));
        }
        if !self.angle_degrees.is_finite() {
            return Err(XcapError::Config("angle must be finite".to_string()));
        }
        if !self.user_point_step.is_finite() || self.user_point_step <= 0.0 {
            return Err(XcapError::Config(format!(
                "user_point_step must be positive, got {}",
                self.user_point_step
            )));
        }
        if self.light_position.iter().any(|c| !c.is_finite()) {
            return Err(XcapError::Config("light_position must be finite".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub surface: SurfaceConfig,
    pub view: ViewConfig,
}

impl AppConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.surface.validate()?;
        self.view.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_values() {
        let config = AppConfig::default();
        assert_eq!(config.surface.r_min, 0.25);
        assert_eq!(config.surface.r_max, 1.0);
        assert_eq!(config.surface.step, 0.01);
        assert_eq!(config.surface.delta, 0.001);
        assert_eq!(config.surface.texcoord_mode, TexCoordMode::Literal);
        assert_eq!(config.view.zoom, 1.0);
        assert_eq!(config.view.user_point_step, 0.05);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json_str(
            r#"{ "surface": { "r_max": 1.5, "texcoord_mode": "normalized" } }"#,
        )
        .unwrap();
        assert_eq!(config.surface.r_max, 1.5);
        assert_eq!(config.surface.step, 0.01);
        assert_eq!(config.surface.texcoord_mode, TexCoordMode::Normalized);
        assert_eq!(config.view, ViewConfig::default());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = SurfaceConfig::with_r_max(0.1);
        assert!(matches!(config.validate(), Err(XcapError::InvalidDomain(_))));
    }

    #[test]
    fn test_rejects_radius_below_floor() {
        let config = SurfaceConfig {
            r_min: 0.0,
            ..SurfaceConfig::default()
        };
        assert!(matches!(config.validate(), Err(XcapError::InvalidDomain(_))));
    }

    #[test]
    fn test_rejects_non_positive_step_and_delta() {
        let zero_step = SurfaceConfig {
            step: 0.0,
            ..SurfaceConfig::default()
        };
        assert!(zero_step.validate().is_err());

        let negative_delta = SurfaceConfig {
            delta: -0.001,
            ..SurfaceConfig::default()
        };
        assert!(negative_delta.validate().is_err());

        let nan_step = SurfaceConfig {
            step: f64::NAN,
            ..SurfaceConfig::default()
        };
        assert!(nan_step.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_tolerance_from_json() {
        let err = AppConfig::from_json_str(
            r#"{ "surface": { "tolerance": { "normal_epsilon": -1.0, "unit_length": 1e-6 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, XcapError::Config(_)));

        let config = SurfaceConfig {
            tolerance: Tolerance::new(f64::NAN, 1e-6),
            ..SurfaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json_config_is_rejected() {
        let err = AppConfig::from_json_str(r#"{ "view": { "zoom": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, XcapError::Config(_)));

        let err = AppConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, XcapError::Json(_)));
    }

    #[test]
    fn test_load_from_file_round_trip() {
        let config = AppConfig {
            surface: SurfaceConfig::with_r_max(2.0),
            view: ViewConfig {
                zoom: 3.0,
                ..ViewConfig::default()
            },
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_json_pretty().unwrap().as_bytes())
            .unwrap();

        let loaded = AppConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
