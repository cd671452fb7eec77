pub mod backend;
pub mod camera;
pub mod export;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod shader;

// Re-export main types
pub use backend::{PrimitiveTopology, RenderBackend, UniformValue};
pub use camera::Camera;
pub use export::{export_gltf_json, export_html};
pub use input::{advance, Direction};
pub use model::SurfaceModel;
pub use pipeline::{deg_to_rad, FrameUniforms};
pub use renderer::{Renderer, CLEAR_COLOR};
pub use scene::{SceneStatus, SurfaceScene};
pub use shader::ShaderProgram;
