use crate::{DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Affine or projective 4x4 transform stored column-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Rotation of `angle` radians about `axis` (normalized here).
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        Self::from_mat4(DMat4::from_axis_angle(axis.normalize(), angle))
    }

    /// OpenGL-style orthographic projection (NDC depth in `[-1, 1]`).
    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self::from_mat4(DMat4::orthographic_rh_gl(left, right, bottom, top, near, far))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    /// Column-major `f32` copy for uniform upload.
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.matrix.map(|v| v as f32)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().project_point3(p)
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }

    pub fn inverse(&self) -> Option<Transform> {
        let m = self.to_mat4();
        if m.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(m.inverse()))
        }
    }

    pub fn transpose(&self) -> Transform {
        Self::from_mat4(self.to_mat4().transpose())
    }

    /// Inverse-transpose, used to carry normals through this transform.
    pub fn normal_matrix(&self) -> Option<Transform> {
        self.inverse().map(|inv| inv.transpose())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::dvec3;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        let p = dvec3(1.0, 2.0, 3.0);
        assert!((t.transform_point(p) - p).length() < 1e-10);
    }

    #[test]
    fn test_translation_then_rotation() {
        let t = Transform::from_translation(dvec3(1.0, 0.0, 0.0))
            .then(&Transform::from_axis_angle(Vector3::Z, std::f64::consts::FRAC_PI_2));
        let p = t.transform_point(Point3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orthographic_maps_bounds_to_ndc() {
        let t = Transform::orthographic(-8.0, 8.0, -8.0, 8.0, -16.0, 16.0);
        let p = t.transform_point(dvec3(8.0, -8.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let inv = t.inverse().unwrap();
        let p = dvec3(1.0, 2.0, 3.0);
        let result = inv.transform_point(t.transform_point(p));
        assert!((result - p).length() < 1e-10);
    }

    #[test]
    fn test_singular_has_no_normal_matrix() {
        let t = Transform::from_mat4(DMat4::ZERO);
        assert!(t.normal_matrix().is_none());
    }
}
