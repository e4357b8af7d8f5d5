//! Window-size tracking: aspect ratio, pixel ratio and output surface size.

use crate::camera::OrbitCamera;

/// Render output whose pixel size follows the viewport
pub trait SurfaceResize {
    fn resize_surface(&mut self, width: u32, height: u32);
}

/// Result of applying a window size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Logical window width
    pub width: f64,
    /// Logical window height
    pub height: f64,
    /// Device pixel ratio after capping
    pub pixel_ratio: f64,
    /// Output surface width in physical pixels
    pub surface_width: u32,
    /// Output surface height in physical pixels
    pub surface_height: u32,
}

impl ViewportConfig {
    /// Camera aspect ratio (width / height)
    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }
}

/// Current viewport, recomputed on every resize signal
#[derive(Debug, Clone)]
pub struct Viewport {
    max_pixel_ratio: f64,
    config: ViewportConfig,
}

impl Viewport {
    /// Start from a logical size and the display's device pixel ratio.
    /// A zero dimension falls back to 1 so the initial surface is valid.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        let config = Self::compute(
            width.max(1.0),
            height.max(1.0),
            device_pixel_ratio,
            max_pixel_ratio,
        );
        Self {
            max_pixel_ratio,
            config,
        }
    }

    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Apply a resize. Returns the new configuration when it differs from
    /// the current one; zero-sized windows (minimised) are ignored.
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    ) -> Option<ViewportConfig> {
        if width <= 0.0 || height <= 0.0 {
            log::debug!("Ignoring zero-sized resize {}x{}", width, height);
            return None;
        }

        let config = Self::compute(width, height, device_pixel_ratio, self.max_pixel_ratio);
        if config == self.config {
            return None;
        }

        log::debug!(
            "Viewport {}x{} @{}x -> surface {}x{}",
            config.width,
            config.height,
            config.pixel_ratio,
            config.surface_width,
            config.surface_height
        );
        self.config = config;
        Some(config)
    }

    /// Apply a resize to everything that depends on the window size: the
    /// camera aspect and the output surface. Both are updated before this
    /// returns, so the next draw sees them. Returns false when nothing changed.
    pub fn apply(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
        camera: &mut OrbitCamera,
        surface: &mut impl SurfaceResize,
    ) -> bool {
        match self.resize(width, height, device_pixel_ratio) {
            Some(config) => {
                camera.set_aspect(config.aspect());
                surface.resize_surface(config.surface_width, config.surface_height);
                true
            }
            None => false,
        }
    }

    fn compute(
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
        max_pixel_ratio: f64,
    ) -> ViewportConfig {
        let pixel_ratio = device_pixel_ratio.min(max_pixel_ratio).max(f64::MIN_POSITIVE);
        let to_pixels = |logical: f64| ((logical * pixel_ratio).round() as u32).max(1);
        ViewportConfig {
            width,
            height,
            pixel_ratio,
            surface_width: to_pixels(width),
            surface_height: to_pixels(height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;
    use crate::params::{OrbitConfig, RenderConfig};

    /// Records every surface reconfiguration
    #[derive(Default)]
    struct RecordingSurface {
        sizes: Vec<(u32, u32)>,
    }

    impl SurfaceResize for RecordingSurface {
        fn resize_surface(&mut self, width: u32, height: u32) {
            self.sizes.push((width, height));
        }
    }

    fn camera_for(viewport: &Viewport) -> OrbitCamera {
        let mut camera = OrbitCamera::new(
            OrbitConfig::default(),
            Projection::from_config(&RenderConfig::default()),
        );
        camera.set_aspect(viewport.config().aspect());
        camera
    }

    #[test]
    fn test_apply_updates_camera_and_surface() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);
        let mut camera = camera_for(&viewport);
        let mut surface = RecordingSurface::default();
        assert_eq!(camera.projection().aspect, 800.0 / 600.0);

        assert!(viewport.apply(1024.0, 768.0, 1.0, &mut camera, &mut surface));
        assert_eq!(camera.projection().aspect, 1024.0 / 768.0);
        assert_eq!(surface.sizes, [(1024, 768)]);

        // Same size again: no further work
        assert!(!viewport.apply(1024.0, 768.0, 1.0, &mut camera, &mut surface));
        assert_eq!(camera.projection().aspect, 1024.0 / 768.0);
        assert_eq!(surface.sizes, [(1024, 768)]);
    }

    #[test]
    fn test_apply_ignores_minimised_window() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);
        let mut camera = camera_for(&viewport);
        let mut surface = RecordingSurface::default();

        assert!(!viewport.apply(0.0, 0.0, 1.0, &mut camera, &mut surface));
        assert_eq!(camera.projection().aspect, 800.0 / 600.0);
        assert!(surface.sizes.is_empty());
    }

    #[test]
    fn test_resize_updates_aspect_and_surface() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);
        assert_eq!(viewport.config().aspect(), 800.0 / 600.0);

        let config = viewport.resize(1024.0, 768.0, 1.0).unwrap();
        assert_eq!(config.aspect(), 1024.0 / 768.0);
        assert_eq!((config.surface_width, config.surface_height), (1024, 768));
        assert_eq!(viewport.config(), config);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut once = Viewport::new(800.0, 600.0, 1.0, 2.0);
        once.resize(1024.0, 768.0, 1.5);

        let mut twice = Viewport::new(800.0, 600.0, 1.0, 2.0);
        twice.resize(1024.0, 768.0, 1.5);
        let second = twice.resize(1024.0, 768.0, 1.5);

        assert_eq!(second, None);
        assert_eq!(once.config(), twice.config());
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);
        let config = viewport.resize(800.0, 600.0, 3.0).unwrap();
        assert_eq!(config.pixel_ratio, 2.0);
        assert_eq!((config.surface_width, config.surface_height), (1600, 1200));

        let config = viewport.resize(800.0, 600.0, 1.25).unwrap();
        assert_eq!(config.pixel_ratio, 1.25);
        assert_eq!((config.surface_width, config.surface_height), (1000, 750));
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);
        let before = viewport.config();
        assert_eq!(viewport.resize(0.0, 600.0, 1.0), None);
        assert_eq!(viewport.resize(800.0, 0.0, 1.0), None);
        assert_eq!(viewport.config(), before);
    }
}
