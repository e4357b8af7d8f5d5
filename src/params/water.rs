//! Water shader parameters (the live-tunable store) and mesh geometry.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use super::Rgb;

/// Name of a tunable water parameter.
///
/// Each maps one-to-one onto a shader uniform; `uTime` is not a parameter
/// because it is driven by the frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    WaveElevation,
    WaveFrequency,
    WaveSpeed,
    DepthColor,
    SurfaceColor,
    ColorOffset,
    ColorMultiplier,
}

impl ParamName {
    pub const ALL: [ParamName; 7] = [
        ParamName::WaveElevation,
        ParamName::WaveFrequency,
        ParamName::WaveSpeed,
        ParamName::DepthColor,
        ParamName::SurfaceColor,
        ParamName::ColorOffset,
        ParamName::ColorMultiplier,
    ];

    /// Shader-side uniform identifier
    pub fn uniform_name(self) -> &'static str {
        match self {
            ParamName::WaveElevation => "uWaveElevation",
            ParamName::WaveFrequency => "uWaveFrequency",
            ParamName::WaveSpeed => "uWaveSpeed",
            ParamName::DepthColor => "uDepthColor",
            ParamName::SurfaceColor => "uSurfaceColor",
            ParamName::ColorOffset => "uColorOffset",
            ParamName::ColorMultiplier => "uColorMultiplier",
        }
    }

    pub fn kind(self) -> ParamKind {
        match self {
            ParamName::WaveFrequency => ParamKind::Vec2,
            ParamName::DepthColor | ParamName::SurfaceColor => ParamKind::Color,
            _ => ParamKind::Float,
        }
    }
}

impl FromStr for ParamName {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamName::ALL
            .into_iter()
            .find(|name| name.uniform_name() == s)
            .ok_or_else(|| ParamError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uniform_name())
    }
}

/// Shape of a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Float,
    Vec2,
    Color,
}

/// A parameter value: scalar, 2D vector, or colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Vec2(Vec2),
    Color(Rgb),
}

impl ParamValue {
    /// Parse text for a parameter of the given kind: `0.5`, `4,2` or a hex
    /// colour such as `#1d86bf`
    pub fn parse(kind: ParamKind, text: &str) -> Result<Self, ParamError> {
        let number = |t: &str| {
            t.trim()
                .parse::<f32>()
                .map_err(|_| ParamError::InvalidValue(text.to_string()))
        };
        match kind {
            ParamKind::Float => Ok(ParamValue::Float(number(text)?)),
            ParamKind::Vec2 => {
                let (x, y) = text
                    .split_once(',')
                    .ok_or_else(|| ParamError::InvalidValue(text.to_string()))?;
                Ok(ParamValue::Vec2(Vec2::new(number(x)?, number(y)?)))
            }
            ParamKind::Color => Ok(ParamValue::Color(Rgb::from_hex(text)?)),
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Vec2(_) => ParamKind::Vec2,
            ParamValue::Color(_) => ParamKind::Color,
        }
    }
}

/// Errors from parameter lookups and writes
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// No parameter has this uniform name
    UnknownName(String),
    /// Value shape does not match the parameter
    KindMismatch {
        name: ParamName,
        expected: ParamKind,
        found: ParamKind,
    },
    /// String is not a `#rrggbb` / `#rgb` colour
    InvalidColor(String),
    /// String is not a number or `x,y` pair
    InvalidValue(String),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::UnknownName(name) => write!(f, "unknown parameter '{}'", name),
            ParamError::KindMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "parameter {} expects a {:?} value, got {:?}",
                name, expected, found
            ),
            ParamError::InvalidColor(text) => write!(f, "invalid hex colour '{}'", text),
            ParamError::InvalidValue(text) => write!(f, "invalid parameter value '{}'", text),
        }
    }
}

impl std::error::Error for ParamError {}

/// Live-tunable water shader parameters
///
/// Created once with defaults and never shrinks. Ranges shown in the control
/// panel are widget hints only; programmatic writes are stored as given.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterParams {
    /// Wave height in model units
    pub wave_elevation: f32,

    /// Spatial frequency along model X and Z (radians per unit)
    pub wave_frequency: Vec2,

    /// Phase speed multiplier applied to elapsed time
    pub wave_speed: f32,

    /// Colour in the troughs
    pub depth_color: Rgb,

    /// Colour on the crests
    pub surface_color: Rgb,

    /// Added to elevation before the colour mix
    pub color_offset: f32,

    /// Scales the colour mix factor
    pub color_multiplier: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            wave_elevation: 0.2,
            wave_frequency: Vec2::new(4.0, 2.0),
            wave_speed: 0.75,
            depth_color: Rgb::from_u32(0x1d86bf),
            surface_color: Rgb::from_u32(0xbfbfbf),
            color_offset: 0.08,
            color_multiplier: 2.0,
        }
    }
}

impl WaterParams {
    pub fn get(&self, name: ParamName) -> ParamValue {
        match name {
            ParamName::WaveElevation => ParamValue::Float(self.wave_elevation),
            ParamName::WaveFrequency => ParamValue::Vec2(self.wave_frequency),
            ParamName::WaveSpeed => ParamValue::Float(self.wave_speed),
            ParamName::DepthColor => ParamValue::Color(self.depth_color),
            ParamName::SurfaceColor => ParamValue::Color(self.surface_color),
            ParamName::ColorOffset => ParamValue::Float(self.color_offset),
            ParamName::ColorMultiplier => ParamValue::Float(self.color_multiplier),
        }
    }

    /// Store a value. Only a wrong-kind value is rejected; the store is left
    /// untouched in that case.
    pub fn set(&mut self, name: ParamName, value: ParamValue) -> Result<(), ParamError> {
        match (name, value) {
            (ParamName::WaveElevation, ParamValue::Float(v)) => self.wave_elevation = v,
            (ParamName::WaveFrequency, ParamValue::Vec2(v)) => self.wave_frequency = v,
            (ParamName::WaveSpeed, ParamValue::Float(v)) => self.wave_speed = v,
            (ParamName::DepthColor, ParamValue::Color(c)) => self.depth_color = c,
            (ParamName::SurfaceColor, ParamValue::Color(c)) => self.surface_color = c,
            (ParamName::ColorOffset, ParamValue::Float(v)) => self.color_offset = v,
            (ParamName::ColorMultiplier, ParamValue::Float(v)) => self.color_multiplier = v,
            (name, value) => {
                return Err(ParamError::KindMismatch {
                    name,
                    expected: name.kind(),
                    found: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Colour-picker hook: parse a hex string into a colour parameter
    pub fn set_color_hex(&mut self, name: ParamName, hex: &str) -> Result<(), ParamError> {
        let color = Rgb::from_hex(hex)?;
        self.set(name, ParamValue::Color(color))
    }
}

/// Upper bound on plane subdivisions per side. Keeps vertex indices in `u32`
/// and both mesh buffers under wgpu's default 256 MiB buffer limit.
pub const MAX_SEGMENTS: u32 = 2048;

/// Plane mesh the water is drawn on
#[derive(Debug, Clone)]
pub struct WaterSurfaceConfig {
    /// Plane extent along its local X axis (model units)
    pub width: f32,

    /// Plane extent along its local Y axis (model units)
    pub height: f32,

    /// Quads along the width; more segments = smoother waves
    pub width_segments: u32,

    /// Quads along the height
    pub height_segments: u32,
}

impl Default for WaterSurfaceConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 2.0,
            width_segments: 512,
            height_segments: 512,
        }
    }
}

impl WaterSurfaceConfig {
    /// Segment counts actually meshed, limited to `1..=MAX_SEGMENTS`
    pub fn segments(&self) -> (u32, u32) {
        (
            self.width_segments.clamp(1, MAX_SEGMENTS),
            self.height_segments.clamp(1, MAX_SEGMENTS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_value(kind: ParamKind) -> ParamValue {
        match kind {
            ParamKind::Float => ParamValue::Float(0.42),
            ParamKind::Vec2 => ParamValue::Vec2(Vec2::new(7.5, 0.25)),
            ParamKind::Color => ParamValue::Color(Rgb::new(0.1, 0.2, 0.3)),
        }
    }

    #[test]
    fn test_defaults_match_reference_look() {
        let params = WaterParams::default();
        assert_eq!(params.wave_elevation, 0.2);
        assert_eq!(params.wave_frequency, Vec2::new(4.0, 2.0));
        assert_eq!(params.wave_speed, 0.75);
        assert_eq!(params.color_offset, 0.08);
        assert_eq!(params.color_multiplier, 2.0);
        assert_eq!(params.depth_color.to_hex(), "#1d86bf");
        assert_eq!(params.surface_color.to_hex(), "#bfbfbf");
    }

    #[test]
    fn test_set_then_get_returns_written_value() {
        let mut params = WaterParams::default();
        for name in ParamName::ALL {
            let value = sample_value(name.kind());
            params.set(name, value).unwrap();
            assert_eq!(params.get(name), value, "{} did not round-trip", name);
        }
    }

    #[test]
    fn test_out_of_range_writes_are_accepted() {
        let mut params = WaterParams::default();
        params
            .set(ParamName::WaveElevation, ParamValue::Float(-50.0))
            .unwrap();
        params
            .set(ParamName::ColorMultiplier, ParamValue::Float(1e6))
            .unwrap();
        assert_eq!(params.wave_elevation, -50.0);
        assert_eq!(params.color_multiplier, 1e6);
    }

    #[test]
    fn test_wrong_kind_is_rejected_without_change() {
        let mut params = WaterParams::default();
        let before = params.clone();
        let err = params
            .set(ParamName::WaveSpeed, ParamValue::Color(Rgb::default()))
            .unwrap_err();
        assert_eq!(
            err,
            ParamError::KindMismatch {
                name: ParamName::WaveSpeed,
                expected: ParamKind::Float,
                found: ParamKind::Color,
            }
        );
        assert_eq!(params, before);
    }

    #[test]
    fn test_unknown_uniform_name() {
        assert!(matches!(
            "uTime".parse::<ParamName>(),
            Err(ParamError::UnknownName(_))
        ));
    }

    #[test]
    fn test_parse_value_by_kind() {
        assert_eq!(
            ParamValue::parse(ParamKind::Float, " 0.5 ").unwrap(),
            ParamValue::Float(0.5)
        );
        assert_eq!(
            ParamValue::parse(ParamKind::Vec2, "4, 2.5").unwrap(),
            ParamValue::Vec2(Vec2::new(4.0, 2.5))
        );
        assert_eq!(
            ParamValue::parse(ParamKind::Color, "#ff0000").unwrap(),
            ParamValue::Color(Rgb::new(1.0, 0.0, 0.0))
        );
        assert!(matches!(
            ParamValue::parse(ParamKind::Vec2, "4"),
            Err(ParamError::InvalidValue(_))
        ));
        assert!(matches!(
            ParamValue::parse(ParamKind::Float, "fast"),
            Err(ParamError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_color_hex_hook() {
        let mut params = WaterParams::default();
        params
            .set_color_hex(ParamName::DepthColor, "#ff0000")
            .unwrap();
        assert_eq!(params.depth_color, Rgb::new(1.0, 0.0, 0.0));

        assert!(params
            .set_color_hex(ParamName::WaveElevation, "#ff0000")
            .is_err());
        assert!(params.set_color_hex(ParamName::DepthColor, "red").is_err());
    }

    #[test]
    fn test_every_name_parses_back() {
        for name in ParamName::ALL {
            assert_eq!(name.uniform_name().parse::<ParamName>().unwrap(), name);
        }
    }
}
