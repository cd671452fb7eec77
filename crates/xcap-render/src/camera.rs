use xcap_core::{Result, XcapError};
use xcap_math::{DMat4, DQuat, Transform, Vector3};

/// Orthographic camera with a trackball rotation and zoom.
///
/// The model is first rotated by the trackball, then by a fixed tilt about
/// `(0.707, 0.707, 0)` and pushed back along -Z before projection into the
/// box `[-8/zoom, 8/zoom]^2 x [-16, 16]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub rotation: DQuat, // trackball orientation
    pub zoom: f64,       // > 0, larger is closer
    pub half_extent: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub const HALF_EXTENT: f64 = 8.0;
    pub const NEAR: f64 = -16.0;
    pub const FAR: f64 = 16.0;
    pub const TILT_AXIS: Vector3 = Vector3::new(0.707, 0.707, 0.0);
    pub const TILT_ANGLE: f64 = 0.7;
    pub const PUSH_BACK: f64 = -10.0;

    pub fn with_zoom(zoom: f64) -> Result<Self> {
        let mut camera = Self::default();
        camera.set_zoom(zoom)?;
        Ok(camera)
    }

    /// Trackball rotation followed by the fixed tilt and push-back.
    pub fn view_matrix(&self) -> Transform {
        Transform::from_mat4(DMat4::from_quat(self.rotation))
            .then(&Transform::from_axis_angle(Self::TILT_AXIS, Self::TILT_ANGLE))
            .then(&Transform::from_translation(Vector3::new(0.0, 0.0, Self::PUSH_BACK)))
    }

    /// Orthographic projection scaled by `zoom`.
    pub fn projection_matrix(&self) -> Transform {
        let e = self.half_extent / self.zoom;
        Transform::orthographic(-e, e, -e, e, self.near, self.far)
    }

    /// Combined model-view-projection matrix.
    pub fn view_projection(&self) -> Transform {
        self.view_matrix().then(&self.projection_matrix())
    }

    /// Transpose of the inverse model-view-projection, for normals.
    pub fn normal_matrix(&self) -> Transform {
        self.view_projection()
            .normal_matrix()
            .unwrap_or_default()
    }

    /// Rotate the trackball. `delta_x` turns about the vertical axis and
    /// `delta_y` about the horizontal one, both in radians.
    pub fn orbit(&mut self, delta_x: f64, delta_y: f64) {
        let turn = DQuat::from_rotation_y(delta_x) * DQuat::from_rotation_x(delta_y);
        self.rotation = (turn * self.rotation).normalize();
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = DQuat::IDENTITY;
    }

    /// Set the zoom factor. Rejects non-positive or non-finite values.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<()> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(XcapError::Config(format!("zoom must be positive, got {zoom}")));
        }
        self.zoom = zoom;
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            rotation: DQuat::IDENTITY,
            zoom: 1.0,
            half_extent: Self::HALF_EXTENT,
            near: Self::NEAR,
            far: Self::FAR,
        }
    }
}
