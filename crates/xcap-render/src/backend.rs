//! The seam between scene code and a concrete graphics API.
//!
//! The trait mirrors the small slice of a WebGL/OpenGL context that drawing
//! the surface needs: array buffers of `f32`, one linked program, attribute
//! and uniform lookup, and non-indexed draws.

use xcap_core::Result;

/// How consecutive vertices are assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Every three vertices form one triangle.
    #[default]
    Triangles,
    /// Each vertex after the second forms a triangle with the previous two.
    TriangleStrip,
}

/// A uniform value in the types the surface program uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    /// Column-major 4x4 matrix.
    Mat4([f32; 16]),
}

pub trait RenderBackend {
    type Buffer: Copy + std::fmt::Debug;
    type Program: Copy + std::fmt::Debug;
    type UniformLocation: Copy + std::fmt::Debug;

    fn create_buffer(&mut self) -> Result<Self::Buffer>;

    /// Replace the whole content of `buffer` with `data`.
    fn upload_buffer(&mut self, buffer: Self::Buffer, data: &[f32]) -> Result<()>;

    /// Compile both stages and link them.
    ///
    /// Fails with `ShaderCompile` or `ShaderLink` carrying the driver's log.
    fn create_program(&mut self, vertex_source: &str, fragment_source: &str)
        -> Result<Self::Program>;

    fn use_program(&mut self, program: Self::Program);

    /// `None` when the program has no active attribute of that name.
    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    /// `None` when the program has no active uniform of that name.
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// Point attribute `location` at `buffer` with `components` floats per vertex.
    fn bind_attribute(&mut self, buffer: Self::Buffer, location: u32, components: usize);

    fn set_uniform(&mut self, location: Self::UniformLocation, value: UniformValue);

    fn clear(&mut self, color: [f32; 4]);

    fn draw_arrays(&mut self, topology: PrimitiveTopology, vertex_count: usize);
}
