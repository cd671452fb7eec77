//! Uniform-grid tessellation of a polar parameter domain.
//!
//! The domain is sampled on a regular `(r, theta)` grid with the same spacing
//! `step` in both directions, so triangles grow with `r`. Every grid cell
//! `(r, theta)..(r + step, theta + step)` becomes two triangles
//!
//! ```text
//! v1 = (r, theta)          v2 = (r, theta + step)
//! v3 = (r + step, theta)   v4 = (r + step, theta + step)
//!
//! (v1, v2, v3) and (v2, v4, v3)
//! ```
//!
//! Rings are clipped at `r_max`, so when `step` does not divide the radial
//! span the outermost ring is a partial one. Angular wedges start at every
//! `theta < 2*PI`; the last wedge may overshoot `2*PI` and the seam is not
//! stitched.

use std::f64::consts::TAU;

use xcap_core::traits::Validate;
use xcap_core::{DegenerateNormalPolicy, Result, SurfaceConfig, XcapError};
use xcap_geometry::{CrossCapSurface, ParameterPoint, Surface, TexCoordMapper};
use xcap_math::{Point2, Point3, Vector3};

use crate::SurfaceMesh;

/// Slack applied when counting cells so that rounding in `span / step`
/// does not add a sliver ring.
const COUNT_EPSILON: f64 = 1e-9;

/// Number of grid cells in each parameter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub rings: usize,
    pub wedges: usize,
}

impl GridDimensions {
    pub fn cell_count(&self) -> usize {
        self.rings.saturating_mul(self.wedges)
    }

    /// Grid nodes, shared by neighbouring cells.
    pub fn node_count(&self) -> usize {
        self.rings
            .saturating_add(1)
            .saturating_mul(self.wedges.saturating_add(1))
    }

    /// Vertices emitted for this grid (two triangles per cell).
    pub fn vertex_count(&self) -> usize {
        self.cell_count().saturating_mul(6)
    }

    /// Bytes of node and vertex storage, `None` when it does not fit in memory.
    fn storage_bytes(&self) -> Option<usize> {
        let nodes = (self.rings.checked_add(1)?).checked_mul(self.wedges.checked_add(1)?)?;
        let vertices = self.rings.checked_mul(self.wedges)?.checked_mul(6)?;
        let bytes = nodes
            .checked_mul(std::mem::size_of::<Sample>())?
            .checked_add(vertices.checked_mul(std::mem::size_of::<Sample>())?)?;
        (bytes <= isize::MAX as usize).then_some(bytes)
    }
}

/// Cell counts for a validated configuration.
///
/// Fails with `InvalidDomain` when `step` is so small that the grid cannot be
/// addressed or allocated.
pub fn grid_dimensions(config: &SurfaceConfig) -> Result<GridDimensions> {
    config.validate()?;
    let rings = cells_along(
        ((config.r_max - config.r_min) / config.step - COUNT_EPSILON).ceil(),
        config.step,
    )?;
    let wedges = cells_along((TAU / config.step).ceil(), config.step)?;
    let dims = GridDimensions {
        rings: rings.max(1),
        wedges,
    };
    if dims.storage_bytes().is_none() {
        return Err(grid_too_large(config.step));
    }
    Ok(dims)
}

fn cells_along(count: f64, step: f64) -> Result<usize> {
    if !count.is_finite() || count >= usize::MAX as f64 {
        return Err(grid_too_large(step));
    }
    Ok(count.max(0.0) as usize)
}

fn grid_too_large(step: f64) -> XcapError {
    XcapError::InvalidDomain(format!("grid too large for step {step}"))
}

/// Tessellate the cross-cap surface described by `config`.
pub fn tessellate(config: &SurfaceConfig) -> Result<SurfaceMesh> {
    tessellate_surface(&CrossCapSurface::from_config(config), config)
}

/// Tessellate `surface` over the radial range and grid spacing of `config`.
///
/// All input is validated before sampling starts; on error no mesh is produced.
pub fn tessellate_surface<S: Surface + ?Sized>(
    surface: &S,
    config: &SurfaceConfig,
) -> Result<SurfaceMesh> {
    let dims = grid_dimensions(config)?;
    let (domain_min, domain_max) = surface.domain_r();
    if config.r_min < domain_min || config.r_max > domain_max {
        return Err(XcapError::InvalidDomain(format!(
            "radial range [{}, {}] lies outside the surface domain [{domain_min}, {domain_max}]",
            config.r_min, config.r_max
        )));
    }
    let mapper = TexCoordMapper::new(config.r_min, config.r_max, config.texcoord_mode)?;

    let grid = SampleGrid::build(surface, config, &mapper, dims)?;
    if grid.degenerate > 0 {
        log::warn!(
            "{} grid nodes had degenerate normals; substituted +Z",
            grid.degenerate
        );
    }

    let mut mesh = SurfaceMesh::with_capacity(dims.vertex_count());
    mesh.degenerate_normals = grid.degenerate;
    for i in 0..dims.rings {
        for j in 0..dims.wedges {
            let v1 = grid.at(i, j);
            let v2 = grid.at(i, j + 1);
            let v3 = grid.at(i + 1, j);
            let v4 = grid.at(i + 1, j + 1);

            for corner in [v1, v2, v3, v2, v4, v3] {
                mesh.push_vertex(corner.position, corner.normal, corner.texcoord, corner.param);
            }
        }
    }

    log::debug!(
        "tessellated r in [{}, {}] step {}: {} rings x {} wedges, {} vertices",
        config.r_min,
        config.r_max,
        config.step,
        dims.rings,
        dims.wedges,
        mesh.vertex_count()
    );
    Ok(mesh)
}

/// Attributes of one grid node.
#[derive(Debug, Clone, Copy)]
struct Sample {
    param: ParameterPoint,
    position: Point3,
    normal: Vector3,
    texcoord: Point2,
}

/// Grid nodes `(rings + 1) x (wedges + 1)`, stored ring-major.
///
/// Cells share their corner nodes, so neighbouring triangles agree exactly on
/// shared positions.
struct SampleGrid {
    samples: Vec<Sample>,
    columns: usize,
    degenerate: usize,
}

impl SampleGrid {
    fn build<S: Surface + ?Sized>(
        surface: &S,
        config: &SurfaceConfig,
        mapper: &TexCoordMapper,
        dims: GridDimensions,
    ) -> Result<Self> {
        let columns = dims.wedges + 1;
        let mut samples = Vec::with_capacity(dims.node_count());
        let mut degenerate = 0;

        for i in 0..=dims.rings {
            let r = (config.r_min + i as f64 * config.step).min(config.r_max);
            for j in 0..columns {
                let theta = j as f64 * config.step;
                let normal = match surface.normal_at(r, theta) {
                    Some(n) => n,
                    None => match config.degenerate_normals {
                        DegenerateNormalPolicy::Fallback => {
                            degenerate += 1;
                            Vector3::Z
                        }
                        DegenerateNormalPolicy::Reject => {
                            return Err(XcapError::DegenerateNormal { r, theta });
                        }
                    },
                };
                samples.push(Sample {
                    param: ParameterPoint::new(r, theta),
                    position: surface.point_at(r, theta),
                    normal,
                    texcoord: mapper.map(r, theta),
                });
            }
        }

        Ok(Self {
            samples,
            columns,
            degenerate,
        })
    }

    fn at(&self, ring: usize, wedge: usize) -> Sample {
        self.samples[ring * self.columns + wedge]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcap_core::Tolerance;
    use xcap_math::DVec3;

    /// A plane whose normal is undefined on the ring r < 0.5.
    struct HalfPinched;

    impl Surface for HalfPinched {
        fn point_at(&self, r: f64, theta: f64) -> Point3 {
            DVec3::new(r * theta.cos(), r * theta.sin(), 0.0)
        }

        fn normal_at(&self, r: f64, _theta: f64) -> Option<Vector3> {
            (r >= 0.5).then_some(Vector3::Z)
        }

        fn domain_r(&self) -> (f64, f64) {
            (0.25, 1.0)
        }

        fn domain_theta(&self) -> (f64, f64) {
            (0.0, TAU)
        }
    }

    fn coarse(r_max: f64) -> SurfaceConfig {
        SurfaceConfig {
            step: 0.25,
            ..SurfaceConfig::with_r_max(r_max)
        }
    }

    #[test]
    fn test_grid_dimensions_default() {
        let dims = grid_dimensions(&SurfaceConfig::default()).unwrap();
        assert_eq!(dims.rings, 75);
        assert_eq!(dims.wedges, 629);
    }

    #[test]
    fn test_tiny_step_is_rejected_before_allocating() {
        for step in [1e-12, 1e-300, f64::MIN_POSITIVE] {
            let config = SurfaceConfig {
                step,
                ..SurfaceConfig::default()
            };
            config.validate().unwrap();
            let err = grid_dimensions(&config).unwrap_err();
            assert!(matches!(err, XcapError::InvalidDomain(_)), "step {step}");
            assert!(matches!(tessellate(&config), Err(XcapError::InvalidDomain(_))));
        }
    }

    #[test]
    fn test_grid_counts() {
        let dims = GridDimensions { rings: 3, wedges: 4 };
        assert_eq!(dims.cell_count(), 12);
        assert_eq!(dims.node_count(), 20);
        assert_eq!(dims.vertex_count(), 72);
    }

    #[test]
    fn test_grid_dimensions_partial_ring() {
        let dims = grid_dimensions(&SurfaceConfig {
            step: 0.2,
            ..SurfaceConfig::with_r_max(1.0)
        })
        .unwrap();
        // 0.75 / 0.2 = 3.75 -> three full rings and one partial
        assert_eq!(dims.rings, 4);
    }

    #[test]
    fn test_cell_winding() {
        let mesh = tessellate(&coarse(0.5)).unwrap();
        let p = &mesh.parameters;
        // first cell: (v1, v2, v3), (v2, v4, v3)
        assert_eq!(p[0], ParameterPoint::new(0.25, 0.0));
        assert_eq!(p[1], ParameterPoint::new(0.25, 0.25));
        assert_eq!(p[2], ParameterPoint::new(0.5, 0.0));
        assert_eq!(p[3], p[1]);
        assert_eq!(p[4], ParameterPoint::new(0.5, 0.25));
        assert_eq!(p[5], p[2]);
    }

    #[test]
    fn test_outer_ring_is_clipped() {
        let mesh = tessellate(&SurfaceConfig {
            step: 0.2,
            ..SurfaceConfig::with_r_max(1.0)
        })
        .unwrap();
        let r_max = mesh.parameters.iter().map(|p| p.r).fold(f64::MIN, f64::max);
        assert_eq!(r_max, 1.0);
        assert!(mesh.texcoords.iter().all(|t| (0.0..=1.0).contains(&t.x)));
    }

    #[test]
    fn test_rejects_before_sampling() {
        let err = tessellate(&SurfaceConfig::with_r_max(0.1)).unwrap_err();
        assert!(matches!(err, XcapError::InvalidDomain(_)));

        let err = tessellate(&SurfaceConfig {
            step: -0.01,
            ..SurfaceConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, XcapError::InvalidDomain(_)));
    }

    #[test]
    fn test_rejects_range_outside_surface_domain() {
        let config = SurfaceConfig::with_r_max(2.0);
        let err = tessellate_surface(&HalfPinched, &config).unwrap_err();
        assert!(matches!(err, XcapError::InvalidDomain(_)));
    }

    #[test]
    fn test_degenerate_fallback_substitutes_axis() {
        let mesh = tessellate_surface(&HalfPinched, &coarse(1.0)).unwrap();
        // ring r = 0.25 has 27 nodes (26 wedges + 1)
        assert_eq!(mesh.degenerate_normals, 27);
        assert!(mesh.normals.iter().all(|n| *n == Vector3::Z));
        mesh.check_unit_normals(Tolerance::default()).unwrap();
    }

    #[test]
    fn test_degenerate_reject_fails() {
        let config = SurfaceConfig {
            degenerate_normals: DegenerateNormalPolicy::Reject,
            ..coarse(1.0)
        };
        let err = tessellate_surface(&HalfPinched, &config).unwrap_err();
        assert!(matches!(err, XcapError::DegenerateNormal { r, .. } if r == 0.25));
    }
}
