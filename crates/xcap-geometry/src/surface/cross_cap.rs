//! Cross-cap surface.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use xcap_core::{SurfaceConfig, Tolerance, R_FLOOR};
use xcap_math::{Point3, Vector3};

use super::Surface;
use crate::differential::estimate_normal;

/// Evaluate the cross-cap equations at `(r, theta)`:
///
/// ```text
/// x = -cos(t) / (2r) - r^3 cos(3t) / 6
/// y = -sin(t) / (2r) + r^3 sin(3t) / 6
/// z = r cos(t)
/// ```
///
/// Undefined at `r = 0`; callers keep `r >= 0.25`.
pub fn cross_cap_point(r: f64, theta: f64) -> Point3 {
    let r3 = r * r * r;
    let x = -(theta.cos() / (2.0 * r)) - r3 * (3.0 * theta).cos() / 6.0;
    let y = -(theta.sin() / (2.0 * r)) + r3 * (3.0 * theta).sin() / 6.0;
    let z = r * theta.cos();
    Point3::new(x, y, z)
}

/// A cross-cap patch over `r` in `[0.25, r_max]` and `theta` in `[0, 2*PI]`.
///
/// Normals are estimated by forward differences with offset `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossCapSurface {
    pub r_max: f64,
    pub delta: f64,
    pub tolerance: Tolerance,
}

impl CrossCapSurface {
    pub fn new(r_max: f64) -> Self {
        Self {
            r_max,
            delta: SurfaceConfig::DEFAULT_DELTA,
            tolerance: Tolerance::default(),
        }
    }

    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self {
            r_max: config.r_max,
            delta: config.delta,
            tolerance: config.tolerance,
        }
    }
}

impl Surface for CrossCapSurface {
    fn point_at(&self, r: f64, theta: f64) -> Point3 {
        cross_cap_point(r, theta)
    }

    fn normal_at(&self, r: f64, theta: f64) -> Option<Vector3> {
        estimate_normal(self, r, theta, self.delta, self.tolerance)
    }

    fn domain_r(&self) -> (f64, f64) {
        (R_FLOOR, self.r_max)
    }

    fn domain_theta(&self) -> (f64, f64) {
        (0.0, TAU)
    }
}
