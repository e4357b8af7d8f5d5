//! Raging Sea library - animated procedural water driven by shader uniforms

pub mod camera;
pub mod cli;
pub mod clock;
pub mod driver;
pub mod overlay;
pub mod panel;
pub mod params;
pub mod rendering;
pub mod uniforms;
pub mod viewport;
pub mod water;
