//! Finite-difference surface normals.
//!
//! The normal at `(r, theta)` is the normalized cross product of the forward
//! difference tangents `dP/dr` and `dP/dtheta`. The offset `delta` is chosen
//! independently of any tessellation step.

use xcap_core::Tolerance;
use xcap_math::Vector3;

use crate::surface::Surface;

/// Forward-difference tangents `(dP/dr, dP/dtheta)` at `(r, theta)`.
pub fn forward_tangents<S: Surface + ?Sized>(
    surface: &S,
    r: f64,
    theta: f64,
    delta: f64,
) -> (Vector3, Vector3) {
    let base = surface.point_at(r, theta);
    let along_r = surface.point_at(r + delta, theta);
    let along_theta = surface.point_at(r, theta + delta);

    ((along_r - base) / delta, (along_theta - base) / delta)
}

/// Unit normal at `(r, theta)`, or `None` when the tangents are (nearly)
/// parallel and the cross product cannot be normalized.
pub fn estimate_normal<S: Surface + ?Sized>(
    surface: &S,
    r: f64,
    theta: f64,
    delta: f64,
    tolerance: Tolerance,
) -> Option<Vector3> {
    let (d_r, d_theta) = forward_tangents(surface, r, theta, delta);
    let normal = d_r.cross(d_theta);
    let len = normal.length();
    if tolerance.is_degenerate(len) {
        return None;
    }
    Some(normal / len)
}
