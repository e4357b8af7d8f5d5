//! Parameter definitions with units and documented defaults.
//!
//! Every tunable number lives here:
//! - the live water store the control panel edits
//! - startup-only configuration for mesh, camera, renderer and panel

mod camera;
mod color;
mod render;
mod water;

// Re-export all types
pub use camera::OrbitConfig;
pub use color::Rgb;
pub use render::{PanelConfig, RenderConfig};
pub use water::{
    ParamError, ParamKind, ParamName, ParamValue, WaterParams, WaterSurfaceConfig, MAX_SEGMENTS,
};
