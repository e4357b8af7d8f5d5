//! Uniform set handed to the water shader each frame.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::params::{Rgb, WaterParams};

/// Per-frame snapshot of the store plus elapsed time.
///
/// Written once per frame and pushed to the GPU; nothing reads it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSet {
    pub wave_elevation: f32,
    pub wave_frequency: Vec2,
    pub time: f32,
    pub wave_speed: f32,
    pub depth_color: Rgb,
    pub surface_color: Rgb,
    pub color_offset: f32,
    pub color_multiplier: f32,
}

impl UniformSet {
    /// Copy every parameter and the elapsed time
    pub fn capture(params: &WaterParams, time_s: f32) -> Self {
        Self {
            wave_elevation: params.wave_elevation,
            wave_frequency: params.wave_frequency,
            time: time_s,
            wave_speed: params.wave_speed,
            depth_color: params.depth_color,
            surface_color: params.surface_color,
            color_offset: params.color_offset,
            color_multiplier: params.color_multiplier,
        }
    }
}

/// GPU layout of `WaterUniforms` in `water.wgsl`.
///
/// Field order and padding follow WGSL uniform alignment: `vec3<f32>` is
/// 16-byte aligned, so each colour is followed by a packed scalar. Colours
/// are linear; the sRGB surface encodes them once on output.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub wave_frequency: [f32; 2],
    pub wave_elevation: f32,
    pub time: f32,
    pub depth_color: [f32; 3],
    pub wave_speed: f32,
    pub surface_color: [f32; 3],
    pub color_offset: f32,
    pub color_multiplier: f32,
    pub _padding: [f32; 3],
}

impl WaterUniforms {
    pub fn new(set: &UniformSet, view_proj: Mat4, model: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            wave_frequency: set.wave_frequency.to_array(),
            wave_elevation: set.wave_elevation,
            time: set.time,
            depth_color: set.depth_color.to_linear(),
            wave_speed: set.wave_speed,
            surface_color: set.surface_color.to_linear(),
            color_offset: set.color_offset,
            color_multiplier: set.color_multiplier,
            _padding: [0.0; 3],
        }
    }
}
