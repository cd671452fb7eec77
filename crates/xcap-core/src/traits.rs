use crate::error::Result;

/// Validate structural integrity of a configuration or generated mesh.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
