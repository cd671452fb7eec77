//! Crosscap geometry: parametric surfaces, differential normals, and texture mapping.

pub mod differential;
pub mod param;
pub mod surface;
pub mod texcoord;

pub use differential::{estimate_normal, forward_tangents};
pub use param::ParameterPoint;
pub use surface::{cross_cap_point, CrossCapSurface, Surface};
pub use texcoord::{map_tex_coord, TexCoordMapper};
