//! Texture coordinates over the polar parameter domain.

use std::f64::consts::PI;

use xcap_core::{Result, TexCoordMode, XcapError};
use xcap_math::Point2;

/// Maps `(r, theta)` to `(u, v)` for a fixed radial range.
///
/// `u` is `r` rescaled from `[r_min, r_max]` to `[0, 1]`; `v` depends on the
/// [`TexCoordMode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoordMapper {
    r_min: f64,
    r_max: f64,
    mode: TexCoordMode,
}

impl TexCoordMapper {
    /// Fails with [`XcapError::DegenerateTexCoord`] unless `r_max > r_min`.
    pub fn new(r_min: f64, r_max: f64, mode: TexCoordMode) -> Result<Self> {
        if !(r_max > r_min) || !(r_max - r_min).is_finite() {
            return Err(XcapError::DegenerateTexCoord { r_min, r_max });
        }
        Ok(Self { r_min, r_max, mode })
    }

    pub fn map(&self, r: f64, theta: f64) -> Point2 {
        let u = (r - self.r_min) / (self.r_max - self.r_min);
        let v = match self.mode {
            TexCoordMode::Literal => theta / 2.0 * PI,
            TexCoordMode::Normalized => theta / (2.0 * PI),
        };
        Point2::new(u, v)
    }
}

/// One-off mapping of `(r, theta)`; see [`TexCoordMapper`].
pub fn map_tex_coord(
    r: f64,
    theta: f64,
    r_min: f64,
    r_max: f64,
    mode: TexCoordMode,
) -> Result<Point2> {
    Ok(TexCoordMapper::new(r_min, r_max, mode)?.map(r, theta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_u_spans_unit_interval() {
        let outer = map_tex_coord(1.0, 0.0, 0.25, 1.0, TexCoordMode::Literal).unwrap();
        let inner = map_tex_coord(0.25, 0.0, 0.25, 1.0, TexCoordMode::Literal).unwrap();
        assert_eq!(outer.x, 1.0);
        assert_eq!(inner.x, 0.0);
        assert_eq!(outer.y, 0.0);
    }

    #[test]
    fn test_literal_v_multiplies_by_pi() {
        let t = map_tex_coord(0.5, 1.0, 0.25, 1.0, TexCoordMode::Literal).unwrap();
        assert_relative_eq!(t.y, PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalized_v_is_fraction_of_turn() {
        let mapper = TexCoordMapper::new(0.25, 1.0, TexCoordMode::Normalized).unwrap();
        assert_relative_eq!(mapper.map(0.5, PI).y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(mapper.map(0.5, 0.0).y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_range_is_rejected() {
        let err = TexCoordMapper::new(0.5, 0.5, TexCoordMode::Literal).unwrap_err();
        assert!(matches!(err, XcapError::DegenerateTexCoord { .. }));
        assert!(TexCoordMapper::new(1.0, 0.5, TexCoordMode::Literal).is_err());
        assert!(TexCoordMapper::new(0.25, f64::NAN, TexCoordMode::Literal).is_err());
    }
}
