use thiserror::Error;

/// Shader stage reported in compile errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum XcapError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Degenerate normal at r={r}, theta={theta}")]
    DegenerateNormal { r: f64, theta: f64 },

    #[error("Degenerate texture mapping: r_max ({r_max}) must exceed r_min ({r_min})")]
    DegenerateTexCoord { r_min: f64, r_max: f64 },

    #[error("Error in {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Link error in program: {0}")]
    ShaderLink(String),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XcapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_compile_message_carries_log() {
        let err = XcapError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:12: 'vec5' : undeclared identifier".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Error in fragment shader"));
        assert!(msg.contains("vec5"));
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> Result<()> {
            std::fs::read("/definitely/not/here.json")?;
            Ok(())
        }
        assert!(matches!(open(), Err(XcapError::Io(_))));
    }
}
