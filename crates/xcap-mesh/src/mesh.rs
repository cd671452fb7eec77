use xcap_core::traits::Validate;
use xcap_core::{Result, Tolerance, XcapError};
use xcap_geometry::ParameterPoint;
use xcap_math::{Aabb3, Point2, Point3, Vector3};

use crate::buffers::MeshBuffers;

/// Non-indexed triangle list: every three consecutive vertices form one triangle.
///
/// All per-vertex sequences share the same order and length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub texcoords: Vec<Point2>,
    /// The `(r, theta)` each vertex was sampled at.
    pub parameters: Vec<ParameterPoint>,
    /// Number of grid nodes whose normal was replaced by the fallback axis.
    pub degenerate_normals: usize,
}

impl SurfaceMesh {
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            texcoords: Vec::with_capacity(vertices),
            parameters: Vec::with_capacity(vertices),
            degenerate_normals: 0,
        }
    }

    /// Append one vertex to every attribute stream.
    pub fn push_vertex(
        &mut self,
        position: Point3,
        normal: Vector3,
        texcoord: Point2,
        parameter: ParameterPoint,
    ) {
        self.positions.push(position);
        self.normals.push(normal);
        self.texcoords.push(texcoord);
        self.parameters.push(parameter);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }

    /// Flatten into the `f32` streams handed to the GPU uploader.
    pub fn to_buffers(&self) -> MeshBuffers {
        let mut buffers = MeshBuffers::with_vertex_capacity(self.vertex_count());
        for ((p, n), t) in self.positions.iter().zip(&self.normals).zip(&self.texcoords) {
            buffers.positions.extend([p.x as f32, p.y as f32, p.z as f32]);
            buffers.normals.extend([n.x as f32, n.y as f32, n.z as f32]);
            buffers.texcoords.extend([t.x as f32, t.y as f32]);
        }
        buffers
    }

    /// Check that every normal has unit length within `tolerance`.
    pub fn check_unit_normals(&self, tolerance: Tolerance) -> Result<()> {
        for (i, n) in self.normals.iter().enumerate() {
            if !tolerance.is_unit(n.length()) {
                return Err(XcapError::InvalidMesh(format!(
                    "normal {i} has length {}",
                    n.length()
                )));
            }
        }
        Ok(())
    }
}

impl Validate for SurfaceMesh {
    fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        if self.normals.len() != n || self.texcoords.len() != n || self.parameters.len() != n {
            return Err(XcapError::InvalidMesh(format!(
                "attribute lengths differ: {} positions, {} normals, {} texcoords, {} parameters",
                n,
                self.normals.len(),
                self.texcoords.len(),
                self.parameters.len()
            )));
        }
        if n % 3 != 0 {
            return Err(XcapError::InvalidMesh(format!(
                "vertex count {n} is not a multiple of 3"
            )));
        }
        self.check_unit_normals(Tolerance::default())
    }
}
