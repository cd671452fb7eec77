use xcap_core::traits::Validate;
use xcap_core::{Result, XcapError};

/// Flat `f32` attribute streams, laid out `[x0, y0, z0, x1, ...]` and `[u0, v0, u1, ...]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
}

impl MeshBuffers {
    pub fn with_vertex_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            texcoords: Vec::with_capacity(vertices * 2),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Byte size of all three streams together.
    pub fn byte_len(&self) -> usize {
        std::mem::size_of::<f32>()
            * (self.positions.len() + self.normals.len() + self.texcoords.len())
    }
}

impl Validate for MeshBuffers {
    fn validate(&self) -> Result<()> {
        let n = self.vertex_count();
        if self.positions.len() != 3 * n
            || self.normals.len() != 3 * n
            || self.texcoords.len() != 2 * n
        {
            return Err(XcapError::InvalidMesh(format!(
                "buffer lengths {}/{}/{} do not describe one vertex count",
                self.positions.len(),
                self.normals.len(),
                self.texcoords.len()
            )));
        }
        if n % 3 != 0 {
            return Err(XcapError::InvalidMesh(format!(
                "vertex count {n} is not a multiple of 3"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_lengths() {
        let buffers = MeshBuffers {
            positions: vec![0.0; 9],
            normals: vec![0.0; 9],
            texcoords: vec![0.0; 6],
        };
        buffers.validate().unwrap();
        assert_eq!(buffers.vertex_count(), 3);
        assert_eq!(buffers.byte_len(), 24 * 4);
    }

    #[test]
    fn test_mismatched_lengths() {
        let buffers = MeshBuffers {
            positions: vec![0.0; 9],
            normals: vec![0.0; 9],
            texcoords: vec![0.0; 4],
        };
        assert!(buffers.validate().is_err());

        let ragged = MeshBuffers {
            positions: vec![0.0; 10],
            normals: vec![0.0; 10],
            texcoords: vec![0.0; 6],
        };
        assert!(ragged.validate().is_err());
    }
}
