//! GPU buffers of one surface. `buffer_data` replaces all three attribute
//! streams at once; `draw` binds them and issues a non-indexed draw of the
//! uploaded vertex count.

use xcap_core::traits::Validate;
use xcap_core::Result;
use xcap_mesh::MeshBuffers;

use crate::backend::{PrimitiveTopology, RenderBackend};
use crate::shader::ShaderProgram;

/// GPU-side copy of a surface mesh: one buffer per attribute stream.
#[derive(Debug)]
pub struct SurfaceModel<B: RenderBackend> {
    pub name: String,
    vertex_buffer: B::Buffer,
    normal_buffer: B::Buffer,
    texcoord_buffer: B::Buffer,
    count: usize,
}

impl<B: RenderBackend> SurfaceModel<B> {
    pub fn new(backend: &mut B, name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            vertex_buffer: backend.create_buffer()?,
            normal_buffer: backend.create_buffer()?,
            texcoord_buffer: backend.create_buffer()?,
            count: 0,
        })
    }

    /// Replace all three buffers with `buffers`.
    ///
    /// The streams are checked before anything is uploaded, so a malformed
    /// set leaves the previous contents and count in place.
    pub fn buffer_data(&mut self, backend: &mut B, buffers: &MeshBuffers) -> Result<()> {
        buffers.validate()?;
        backend.upload_buffer(self.vertex_buffer, &buffers.positions)?;
        backend.upload_buffer(self.normal_buffer, &buffers.normals)?;
        backend.upload_buffer(self.texcoord_buffer, &buffers.texcoords)?;
        self.count = buffers.vertex_count();
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.count
    }

    pub fn draw(&self, backend: &mut B, program: &ShaderProgram<B>, topology: PrimitiveTopology) {
        if let Some(location) = program.attrib_vertex {
            backend.bind_attribute(self.vertex_buffer, location, 3);
        }
        if let Some(location) = program.attrib_normal {
            backend.bind_attribute(self.normal_buffer, location, 3);
        }
        if let Some(location) = program.attrib_texcoord {
            backend.bind_attribute(self.texcoord_buffer, location, 2);
        }
        backend.draw_arrays(topology, self.count);
    }
}
