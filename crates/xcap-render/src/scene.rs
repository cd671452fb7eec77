use xcap_core::traits::Validate;
use xcap_core::{AppConfig, Result, XcapError, R_FLOOR};
use xcap_geometry::ParameterPoint;
use xcap_mesh::{tessellate, SurfaceMesh};

use crate::camera::Camera;
use crate::input::{advance, Direction};
use crate::pipeline::FrameUniforms;

/// Application state of the cross-cap viewer.
///
/// Holds the configuration, the current tessellation and the view state.
/// `generation` increases every time the mesh is replaced so renderers know
/// when to re-upload.
#[derive(Debug, Clone)]
pub struct SurfaceScene {
    config: AppConfig,
    mesh: SurfaceMesh,
    camera: Camera,
    angle_degrees: f64,
    user_point: ParameterPoint,
    generation: u64,
}

/// Text readouts of the scene state, two decimals each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneStatus {
    pub max_r: String,
    pub zoom: String,
    pub angle: String,
    pub user_point: String,
}

impl std::fmt::Display for SceneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "maxR: {}  zoom: {}  angle: {}  point: {}",
            self.max_r, self.zoom, self.angle, self.user_point
        )
    }
}

impl SurfaceScene {
    /// Validate `config` and build the initial mesh.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let mesh = tessellate(&config.surface)?;
        let camera = Camera::with_zoom(config.view.zoom)?;
        log::info!(
            "tessellated cross-cap: max_r={:.2}, {} triangles",
            config.surface.r_max,
            mesh.triangle_count()
        );
        Ok(Self {
            angle_degrees: config.view.angle_degrees,
            user_point: ParameterPoint::new(R_FLOOR, 0.0),
            config,
            mesh,
            camera,
            generation: 0,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn max_r(&self) -> f64 {
        self.config.surface.r_max
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    pub fn user_point(&self) -> ParameterPoint {
        self.user_point
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Re-tessellate with a new outer radius.
    ///
    /// The mesh is only replaced once the new one is complete; on error the
    /// scene is left untouched. The user point is clamped back to the new
    /// radius range.
    pub fn set_max_r(&mut self, max_r: f64) -> Result<()> {
        let mut surface = self.config.surface;
        surface.r_max = max_r;
        surface.validate()?;
        let mesh = tessellate(&surface)?;

        log::info!(
            "rebuilt cross-cap: max_r={:.2}, {} triangles",
            max_r,
            mesh.triangle_count()
        );
        self.config.surface = surface;
        self.mesh = mesh;
        self.generation += 1;
        if self.user_point.r > max_r {
            self.user_point.r = max_r;
        }
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<()> {
        self.camera.set_zoom(zoom)?;
        self.config.view.zoom = zoom;
        Ok(())
    }

    pub fn set_angle_degrees(&mut self, angle: f64) -> Result<()> {
        if !angle.is_finite() {
            return Err(XcapError::Config(format!("angle must be finite, got {angle}")));
        }
        self.angle_degrees = angle;
        Ok(())
    }

    /// Move the user point for a `w`/`s`/`a`/`d` key. Other keys are ignored.
    ///
    /// Returns whether the key was handled.
    pub fn handle_key(&mut self, key: char) -> bool {
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        self.user_point = advance(
            self.user_point,
            direction,
            self.config.surface.r_max,
            self.config.view.user_point_step,
        );
        log::debug!(
            "user point moved {:?} to ({:.2}, {:.2})",
            direction,
            self.user_point.r,
            self.user_point.theta
        );
        true
    }

    pub fn frame_uniforms(&self) -> FrameUniforms {
        FrameUniforms::new(
            &self.camera,
            self.config.view.light_position,
            self.angle_degrees,
            self.user_point,
        )
    }

    pub fn status(&self) -> SceneStatus {
        SceneStatus {
            max_r: format!("{:.2}", self.config.surface.r_max),
            zoom: format!("{:.2}", self.camera.zoom),
            angle: format!("{:.2}", self.angle_degrees),
            user_point: format!("[{:.2}, {:.2}]", self.user_point.r, self.user_point.theta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcap_core::SurfaceConfig;

    fn coarse_config() -> AppConfig {
        AppConfig {
            surface: SurfaceConfig {
                step: 0.1,
                ..SurfaceConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_new_scene() {
        let scene = SurfaceScene::new(coarse_config()).unwrap();
        assert!(!scene.mesh().is_empty());
        assert_eq!(scene.generation(), 0);
        assert_eq!(scene.user_point(), ParameterPoint::new(0.25, 0.0));
        assert_eq!(scene.zoom(), 1.0);
    }

    #[test]
    fn test_new_scene_rejects_bad_config() {
        let mut config = coarse_config();
        config.view.zoom = 0.0;
        assert!(SurfaceScene::new(config).is_err());
    }

    #[test]
    fn test_set_max_r_rebuilds() {
        let mut scene = SurfaceScene::new(coarse_config()).unwrap();
        let before = scene.mesh().vertex_count();
        scene.set_max_r(2.0).unwrap();
        assert_eq!(scene.max_r(), 2.0);
        assert_eq!(scene.generation(), 1);
        assert!(scene.mesh().vertex_count() > before);
    }

    #[test]
    fn test_set_max_r_error_keeps_state() {
        let mut scene = SurfaceScene::new(coarse_config()).unwrap();
        let before = scene.mesh().clone();
        assert!(matches!(scene.set_max_r(0.1), Err(XcapError::InvalidDomain(_))));
        assert!(scene.set_max_r(f64::NAN).is_err());
        assert_eq!(scene.max_r(), 1.0);
        assert_eq!(scene.generation(), 0);
        assert_eq!(scene.mesh().vertex_count(), before.vertex_count());
    }

    #[test]
    fn test_set_max_r_clamps_user_point() {
        let mut scene = SurfaceScene::new(coarse_config()).unwrap();
        scene.set_max_r(2.0).unwrap();
        for _ in 0..30 {
            scene.handle_key('w');
        }
        assert!(scene.user_point().r > 1.0);
        scene.set_max_r(1.0).unwrap();
        assert!(scene.user_point().r <= 1.0);
    }

    #[test]
    fn test_zoom_and_angle() {
        let mut scene = SurfaceScene::new(coarse_config()).unwrap();
        scene.set_zoom(2.5).unwrap();
        assert_eq!(scene.zoom(), 2.5);
        assert!(scene.set_zoom(-1.0).is_err());
        assert_eq!(scene.zoom(), 2.5);

        scene.set_angle_degrees(45.0).unwrap();
        assert_eq!(scene.angle_degrees(), 45.0);
        assert!(scene.set_angle_degrees(f64::INFINITY).is_err());
    }

    #[test]
    fn test_handle_key() {
        let mut scene = SurfaceScene::new(coarse_config()).unwrap();
        assert!(scene.handle_key('W'));
        assert!((scene.user_point().r - 0.3).abs() < 1e-12);
        assert!(scene.handle_key('a'));
        assert_eq!(scene.user_point().theta, std::f64::consts::TAU);
        assert!(!scene.handle_key('x'));
        assert_eq!(scene.generation(), 0);
    }

    #[test]
    fn test_status_readouts() {
        let mut scene = SurfaceScene::new(coarse_config()).unwrap();
        scene.set_angle_degrees(12.346).unwrap();
        let status = scene.status();
        assert_eq!(status.max_r, "1.00");
        assert_eq!(status.zoom, "1.00");
        assert_eq!(status.angle, "12.35");
        assert_eq!(status.user_point, "[0.25, 0.00]");
        assert!(status.to_string().contains("maxR: 1.00"));
    }

    #[test]
    fn test_frame_uniforms_follow_state() {
        let mut scene = SurfaceScene::new(coarse_config()).unwrap();
        scene.set_angle_degrees(180.0).unwrap();
        scene.handle_key('d');
        let uniforms = scene.frame_uniforms();
        assert!((uniforms.angle_radians - std::f32::consts::PI).abs() < 1e-6);
        assert!((uniforms.user_point[1] - 0.05).abs() < 1e-6);
        assert_eq!(uniforms.light_position, [0.0, 1.0, 0.0]);
    }
}
