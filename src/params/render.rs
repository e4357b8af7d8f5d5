//! Rendering, camera-projection and control-panel configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (logical pixels)
    pub window_width: u32,

    /// Initial window height (logical pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (model units)
    pub near_plane: f32,

    /// Far clipping plane (model units)
    pub far_plane: f32,

    /// Upper bound on the device pixel ratio used for the output surface.
    /// HiDPI screens above 2x render at 2x to bound fragment cost.
    pub max_pixel_ratio: f64,

    /// Stop after this many frames (None = run until the window closes)
    pub frame_limit: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
            max_pixel_ratio: 2.0,
            frame_limit: None,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }
}

/// Debug panel configuration
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Window title
    pub title: String,

    /// Panel width (egui points)
    pub width: f32,

    /// Shown at startup
    pub visible: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Debug".to_string(),
            width: 340.0,
            visible: true,
        }
    }
}
