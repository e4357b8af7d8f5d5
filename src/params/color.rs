//! RGB colour values with CSS-style hex parsing.

use std::fmt;
use std::str::FromStr;

use super::ParamError;

/// 0..1 RGB triple in hex (sRGB-encoded) units.
///
/// Hex input is mapped channel / 255, so `#ff0000` is exactly `(1, 0, 0)`.
/// Use [`Rgb::to_linear`] before handing the colour to a shader that writes
/// to an sRGB surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb` or the `#rgb` shorthand.
    pub fn from_hex(hex: &str) -> Result<Self, ParamError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ParamError::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid()),
        };

        let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        Ok(Self::from_u32(value))
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_u32(value: u32) -> Self {
        let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Format as `#rrggbb`, rounding and clamping each channel.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_srgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Byte channels, clamped and rounded
    pub fn to_srgb8(&self) -> [u8; 3] {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b)]
    }

    pub fn from_srgb8(bytes: [u8; 3]) -> Self {
        Self::from_u32(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Decode each channel from the sRGB transfer curve to linear light
    pub fn to_linear(&self) -> [f32; 3] {
        let decode = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [decode(self.r), decode(self.g), decode(self.b)]
    }

}

impl FromStr for Rgb {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
