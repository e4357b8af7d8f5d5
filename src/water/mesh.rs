//! Subdivided plane mesh the water shader displaces.

use bytemuck::{Pod, Zeroable};

use crate::params::WaterSurfaceConfig;

/// Vertex data for the water mesh (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Flat plane in the local XY plane, centred on the origin, facing +Z
pub struct PlaneMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    /// Build a `width x height` plane split into the configured segments
    pub fn new(config: &WaterSurfaceConfig) -> Self {
        let (columns, rows) = config.segments();
        if (columns, rows) != (config.width_segments, config.height_segments) {
            log::warn!(
                "Plane segments {}x{} out of range, using {}x{}",
                config.width_segments,
                config.height_segments,
                columns,
                rows
            );
        }
        let half_width = config.width / 2.0;
        let half_height = config.height / 2.0;
        let segment_width = config.width / columns as f32;
        let segment_height = config.height / rows as f32;

        let mut vertices = Vec::with_capacity(((columns + 1) * (rows + 1)) as usize);
        let mut indices = Vec::with_capacity((columns * rows * 6) as usize);

        // Rows run top (+Y) to bottom, columns left (-X) to right
        for iy in 0..=rows {
            let y = half_height - iy as f32 * segment_height;
            for ix in 0..=columns {
                let x = ix as f32 * segment_width - half_width;
                vertices.push(Vertex {
                    position: [x, y, 0.0],
                    uv: [ix as f32 / columns as f32, 1.0 - iy as f32 / rows as f32],
                });
            }
        }

        // Two counter-clockwise triangles per quad (seen from +Z)
        let stride = columns + 1;
        for iy in 0..rows {
            for ix in 0..columns {
                let top_left = iy * stride + ix;
                let bottom_left = (iy + 1) * stride + ix;
                let bottom_right = bottom_left + 1;
                let top_right = top_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    bottom_left,
                    bottom_right,
                    top_right,
                ]);
            }
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Size of the vertex buffer in bytes
    pub fn vertex_bytes(&self) -> u64 {
        (self.vertices.len() as u64).saturating_mul(std::mem::size_of::<Vertex>() as u64)
    }

    /// Size of the index buffer in bytes
    pub fn index_bytes(&self) -> u64 {
        (self.indices.len() as u64).saturating_mul(std::mem::size_of::<u32>() as u64)
    }
}
