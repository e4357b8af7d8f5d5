//! Water surface: plane mesh plus its placement in the scene.

mod mesh;

// Re-export public types
pub use mesh::{PlaneMesh, Vertex};

use std::f32::consts::FRAC_PI_2;

use glam::Mat4;

use crate::params::WaterSurfaceConfig;

/// The single water object in the scene
pub struct WaterSurface {
    pub mesh: PlaneMesh,
    model: Mat4,
}

impl WaterSurface {
    /// Build the mesh and lay it flat: the XY plane is turned -90° about X
    /// so it spans XZ and faces +Y.
    pub fn new(config: &WaterSurfaceConfig) -> Self {
        Self {
            mesh: PlaneMesh::new(config),
            model: Mat4::from_rotation_x(-FRAC_PI_2),
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MAX_SEGMENTS;
    use glam::Vec3;

    fn small_config() -> WaterSurfaceConfig {
        WaterSurfaceConfig {
            width_segments: 4,
            height_segments: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_mesh_counts() {
        let config = WaterSurfaceConfig::default();
        let mesh = PlaneMesh::new(&config);
        assert_eq!(mesh.vertices.len(), 513 * 513);
        assert_eq!(mesh.indices.len(), 512 * 512 * 6);
        assert_eq!(mesh.index_count(), 512 * 512 * 6);
    }

    #[test]
    fn test_oversized_segment_counts_are_capped() {
        let mesh = PlaneMesh::new(&WaterSurfaceConfig {
            width_segments: 70_000,
            height_segments: 0,
            ..Default::default()
        });
        let columns = MAX_SEGMENTS as usize;
        assert_eq!(mesh.vertices.len(), (columns + 1) * 2);
        assert_eq!(mesh.indices.len(), columns * 6);
    }

    #[test]
    fn test_largest_mesh_fits_default_buffer_limit() {
        // Byte sizes are computed from the config alone, no allocation
        let (columns, rows) = WaterSurfaceConfig {
            width_segments: MAX_SEGMENTS,
            height_segments: MAX_SEGMENTS,
            ..Default::default()
        }
        .segments();
        let vertex_bytes = (columns as u64 + 1) * (rows as u64 + 1) * 20;
        let index_bytes = columns as u64 * rows as u64 * 6 * 4;
        let limit = wgpu::Limits::default().max_buffer_size;
        assert!(vertex_bytes <= limit && index_bytes <= limit);
    }

    #[test]
    fn test_mesh_byte_sizes() {
        let mesh = PlaneMesh::new(&small_config());
        assert_eq!(mesh.vertex_bytes(), 15 * 20);
        assert_eq!(mesh.index_bytes(), 8 * 6 * 4);
    }

    #[test]
    fn test_mesh_spans_configured_extent() {
        let mesh = PlaneMesh::new(&small_config());
        let (mut min, mut max) = (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN));
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        assert_eq!(min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_triangles_face_up_after_placement() {
        let surface = WaterSurface::new(&small_config());
        let model = surface.model_matrix();
        let mesh = &surface.mesh;

        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| model.transform_point3(Vec3::from_array(mesh.vertices[i as usize].position)));
            let normal = (b - a).cross(c - a);
            assert!(normal.y > 0.0, "triangle {:?} faces {:?}", tri, normal);
            assert!(normal.x.abs() < 1e-5 && normal.z.abs() < 1e-5);
        }
    }

    #[test]
    fn test_placement_lays_plane_flat() {
        let surface = WaterSurface::new(&small_config());
        let model = surface.model_matrix();
        for v in &surface.mesh.vertices {
            let p = model.transform_point3(Vec3::from_array(v.position));
            assert!(p.y.abs() < 1e-6);
        }
    }
}
