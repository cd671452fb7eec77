pub mod config;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use config::{AppConfig, DegenerateNormalPolicy, SurfaceConfig, TexCoordMode, ViewConfig, R_FLOOR};
pub use error::{Result, ShaderStage, XcapError};
pub use tolerance::Tolerance;
