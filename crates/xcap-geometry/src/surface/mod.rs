//! Surface traits and implementations.

mod cross_cap;

use xcap_math::{Point3, Vector3};

pub use cross_cap::{cross_cap_point, CrossCapSurface};

/// Trait for surfaces parameterized over a polar `(r, theta)` domain.
pub trait Surface: Send + Sync {
    /// Evaluate the surface at parameters `(r, theta)`.
    fn point_at(&self, r: f64, theta: f64) -> Point3;

    /// Unit surface normal at `(r, theta)`, or `None` where the surface is singular.
    fn normal_at(&self, r: f64, theta: f64) -> Option<Vector3>;

    /// Return the radial domain `(r_min, r_max)`.
    fn domain_r(&self) -> (f64, f64);

    /// Return the angular domain `(theta_min, theta_max)`.
    fn domain_theta(&self) -> (f64, f64);
}
