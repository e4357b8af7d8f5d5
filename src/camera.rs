//! Perspective camera with damped orbit controls.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use crate::params::{OrbitConfig, RenderConfig};

/// Keeps the camera off the poles where look-at degenerates
const POLE_EPSILON: f32 = 1e-6;

/// Wheel notch dolly factor before `zoom_speed` is applied
const DOLLY_BASE: f32 = 0.95;

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_radians: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            fov_y_radians: config.fov_degrees.to_radians(),
            aspect: config.aspect_ratio(),
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, self.aspect, self.near, self.far)
    }
}

/// Camera orbiting a target point.
///
/// Position is kept in spherical coordinates around the target (Y up):
/// `theta` is the azimuth from +Z toward +X, `phi` the polar angle from +Y.
/// Input accumulates into pending deltas which `update` applies, partially
/// when damping is on so motion eases out over the following frames.
pub struct OrbitCamera {
    config: OrbitConfig,
    projection: Projection,
    target: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitCamera {
    pub fn new(config: OrbitConfig, projection: Projection) -> Self {
        let target = Vec3::from_array(config.target);
        let offset = Vec3::from_array(config.position) - target;
        let radius = offset.length().max(POLE_EPSILON);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        Self {
            config,
            projection,
            target,
            radius,
            theta,
            phi,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            dragging: false,
            last_cursor: None,
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Called from the resize handler
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection.aspect = aspect;
    }

    /// Current eye position
    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * sin_phi * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * sin_phi * self.theta.cos(),
            )
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Queue a rotation from a pointer drag of `(dx, dy)` pixels.
    /// A drag across the full viewport height turns one full revolution.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.pending_theta -= TAU * dx / height * self.config.rotate_speed;
        self.pending_phi -= TAU * dy / height * self.config.rotate_speed;
    }

    /// Queue a dolly from wheel notches; positive moves closer
    pub fn zoom_by(&mut self, notches: f32) {
        let step = DOLLY_BASE.powf(self.config.zoom_speed);
        self.pending_scale *= step.powf(notches);
    }

    /// Start or stop a rotate drag
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        if !dragging {
            self.last_cursor = None;
        }
    }

    /// Feed a cursor position; rotates while a drag is active
    pub fn cursor_moved(&mut self, x: f64, y: f64, viewport_height: f32) {
        if self.dragging {
            if let Some((last_x, last_y)) = self.last_cursor {
                self.rotate_by_pixels((x - last_x) as f32, (y - last_y) as f32, viewport_height);
            }
            self.last_cursor = Some((x, y));
        }
    }

    /// Apply pending input. Call once per frame.
    pub fn update(&mut self) {
        let factor = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };

        self.theta += self.pending_theta * factor;
        self.phi = (self.phi + self.pending_phi * factor).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.radius = (self.radius * self.pending_scale)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.pending_scale = 1.0;

        if self.config.enable_damping {
            self.pending_theta *= 1.0 - factor;
            self.pending_phi *= 1.0 - factor;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
    }

    /// View-projection matrix for the current eye and aspect
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        self.projection.matrix() * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_camera() -> OrbitCamera {
        OrbitCamera::new(
            OrbitConfig::default(),
            Projection::from_config(&RenderConfig::default()),
        )
    }

    #[test]
    fn test_initial_eye_matches_config() {
        let camera = default_camera();
        let eye = camera.eye();
        assert!((eye - Vec3::ONE).length() < 1e-5, "eye was {:?}", eye);
        assert!((camera.distance() - 3.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_update_without_input_keeps_position() {
        let mut camera = default_camera();
        let before = camera.eye();
        for _ in 0..10 {
            camera.update();
        }
        assert!((camera.eye() - before).length() < 1e-5);
    }

    #[test]
    fn test_damped_rotation_eases_out() {
        let mut camera = default_camera();
        let start = camera.eye();
        camera.rotate_by_pixels(100.0, 0.0, 720.0);

        camera.update();
        let first_step = (camera.eye() - start).length();
        let after_first = camera.eye();
        camera.update();
        let second_step = (camera.eye() - after_first).length();

        assert!(first_step > 0.0);
        assert!(second_step < first_step);

        // Distance to target is preserved by rotation
        assert!((camera.distance() - 3.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_undamped_rotation_applies_immediately() {
        let config = OrbitConfig {
            enable_damping: false,
            ..Default::default()
        };
        let mut camera = OrbitCamera::new(config, Projection::from_config(&RenderConfig::default()));
        camera.rotate_by_pixels(360.0, 0.0, 720.0);
        camera.update();
        let moved = camera.eye();
        camera.update();
        assert!((camera.eye() - moved).length() < 1e-6);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut camera = default_camera();
        camera.rotate_by_pixels(0.0, 100_000.0, 720.0);
        for _ in 0..200 {
            camera.update();
        }
        let eye = camera.eye();
        assert!(eye.is_finite());
        assert!(eye.y <= camera.distance());
        assert!(camera.view_proj().is_finite());
    }

    #[test]
    fn test_zoom_respects_distance_limits() {
        let mut camera = default_camera();
        camera.zoom_by(1.0);
        camera.update();
        assert!(camera.distance() < 3.0_f32.sqrt());

        camera.zoom_by(-10_000.0);
        camera.update();
        assert_eq!(camera.distance(), OrbitConfig::default().max_distance);
    }

    #[test]
    fn test_drag_only_rotates_while_dragging() {
        let mut camera = default_camera();
        let start = camera.eye();
        camera.cursor_moved(0.0, 0.0, 720.0);
        camera.cursor_moved(200.0, 0.0, 720.0);
        camera.update();
        assert!((camera.eye() - start).length() < 1e-6);

        camera.set_dragging(true);
        camera.cursor_moved(0.0, 0.0, 720.0);
        camera.cursor_moved(200.0, 0.0, 720.0);
        camera.update();
        assert!((camera.eye() - start).length() > 1e-4);
    }

    #[test]
    fn test_aspect_change_updates_projection() {
        let mut camera = default_camera();
        let before = camera.view_proj();
        camera.set_aspect(1024.0 / 768.0);
        assert_eq!(camera.projection().aspect, 1024.0 / 768.0);
        assert_ne!(camera.view_proj(), before);
        assert_ne!(camera.view_proj(), Mat4::IDENTITY);
    }
}
