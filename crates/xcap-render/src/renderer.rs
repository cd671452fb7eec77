//! Frame driver. The mesh is uploaded only when the scene's generation
//! changes; every frame clears, applies uniforms and draws.

use xcap_core::Result;

use crate::backend::{PrimitiveTopology, RenderBackend};
use crate::model::SurfaceModel;
use crate::scene::SurfaceScene;
use crate::shader::ShaderProgram;

/// Background color of every frame.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Draws a [`SurfaceScene`] through a [`RenderBackend`].
pub struct Renderer<B: RenderBackend> {
    backend: B,
    program: ShaderProgram<B>,
    model: SurfaceModel<B>,
    topology: PrimitiveTopology,
    uploaded_generation: Option<u64>,
}

impl<B: RenderBackend> Renderer<B> {
    /// Link the surface program and allocate the model buffers.
    pub fn new(mut backend: B) -> Result<Self> {
        let program = ShaderProgram::surface(&mut backend)?;
        let model = SurfaceModel::new(&mut backend, "Crosscap")?;
        Ok(Self {
            backend,
            program,
            model,
            topology: PrimitiveTopology::default(),
            uploaded_generation: None,
        })
    }

    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Upload the scene's mesh if it changed since the last upload.
    ///
    /// Returns whether anything was uploaded.
    pub fn sync(&mut self, scene: &SurfaceScene) -> Result<bool> {
        if self.uploaded_generation == Some(scene.generation()) {
            return Ok(false);
        }
        let buffers = scene.mesh().to_buffers();
        self.model.buffer_data(&mut self.backend, &buffers)?;
        self.uploaded_generation = Some(scene.generation());
        log::debug!(
            "uploaded {} vertices ({} bytes)",
            buffers.vertex_count(),
            buffers.byte_len()
        );
        Ok(true)
    }

    /// Sync and draw one frame.
    pub fn draw(&mut self, scene: &SurfaceScene) -> Result<()> {
        self.sync(scene)?;
        self.backend.clear(CLEAR_COLOR);
        self.program.use_program(&mut self.backend);
        self.program.apply(&mut self.backend, &scene.frame_uniforms());
        self.model.draw(&mut self.backend, &self.program, self.topology);
        Ok(())
    }

    pub fn model(&self) -> &SurfaceModel<B> {
        &self.model
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
