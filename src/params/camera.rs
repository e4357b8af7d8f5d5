//! Orbit camera placement and control tuning.

/// Orbit controls parameters
#[derive(Debug, Clone)]
pub struct OrbitConfig {
    /// Initial eye position
    pub position: [f32; 3],

    /// Point the camera orbits around and looks at
    pub target: [f32; 3],

    /// Keep easing rotation/zoom after input stops
    pub enable_damping: bool,

    /// Fraction of the pending motion applied per frame (0..1)
    pub damping_factor: f32,

    /// Radians of rotation per pixel of drag, before scaling by viewport height
    pub rotate_speed: f32,

    /// Dolly strength per wheel notch
    pub zoom_speed: f32,

    /// Closest allowed distance to the target
    pub min_distance: f32,

    /// Farthest allowed distance to the target
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            position: [1.0, 1.0, 1.0],
            target: [0.0, 0.0, 0.0],
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.1,
            max_distance: 50.0,
        }
    }
}
