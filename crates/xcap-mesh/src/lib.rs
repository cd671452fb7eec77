pub mod buffers;
pub mod mesh;
pub mod tessellator;

pub use buffers::MeshBuffers;
pub use mesh::SurfaceMesh;
pub use tessellator::{grid_dimensions, tessellate, tessellate_surface, GridDimensions};
