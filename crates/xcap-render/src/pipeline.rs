use xcap_geometry::ParameterPoint;

use crate::camera::Camera;

/// Convert degrees to radians.
pub fn deg_to_rad(angle: f64) -> f64 {
    angle * std::f64::consts::PI / 180.0
}

/// Per-frame uniform values, already in the `f32` layout the GPU expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Column-major.
    pub model_view_projection: [f32; 16],
    /// Transpose of the inverse of `model_view_projection`.
    pub normal_matrix: [f32; 16],
    pub light_position: [f32; 3],
    pub angle_radians: f32,
    /// `(r, theta)` of the user point.
    pub user_point: [f32; 2],
    pub texture_unit: i32,
}

impl FrameUniforms {
    pub fn new(
        camera: &Camera,
        light_position: [f64; 3],
        angle_degrees: f64,
        user_point: ParameterPoint,
    ) -> Self {
        Self {
            model_view_projection: camera.view_projection().to_f32_array(),
            normal_matrix: camera.normal_matrix().to_f32_array(),
            light_position: light_position.map(|c| c as f32),
            angle_radians: deg_to_rad(angle_degrees) as f32,
            user_point: [user_point.r as f32, user_point.theta as f32],
            texture_unit: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deg_to_rad() {
        assert_relative_eq!(deg_to_rad(180.0), std::f64::consts::PI);
        assert_relative_eq!(deg_to_rad(90.0), std::f64::consts::FRAC_PI_2);
        assert_eq!(deg_to_rad(0.0), 0.0);
    }

    #[test]
    fn test_frame_uniforms_from_camera() {
        let camera = Camera::default();
        let uniforms = FrameUniforms::new(
            &camera,
            [0.0, 1.0, 0.0],
            90.0,
            ParameterPoint::new(0.25, 0.0),
        );

        assert_eq!(uniforms.light_position, [0.0, 1.0, 0.0]);
        assert!((uniforms.angle_radians - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(uniforms.user_point, [0.25, 0.0]);
        assert_eq!(uniforms.texture_unit, 0);

        let expected = camera.view_projection().to_f32_array();
        assert_eq!(uniforms.model_view_projection, expected);
        let sum: f32 = uniforms.normal_matrix.iter().map(|v| v.abs()).sum();
        assert!(sum > 0.1);
    }
}
