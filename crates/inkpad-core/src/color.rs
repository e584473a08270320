//! Packed ARGB colors.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-bit packed color, `0xAARRGGBB`.
///
/// The stroke text format writes colors as signed decimal integers
/// (opaque black is `-16777216`), so conversions to and from `i32`
/// reinterpret the bits rather than clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    pub const TRANSPARENT: Argb = Argb(0x0000_0000);
    pub const BLACK: Argb = Argb(0xFF00_0000);
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);

    /// Build a color from its four channels.
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Reinterpret a signed packed integer.
    pub const fn from_signed(value: i32) -> Self {
        Self(value as u32)
    }

    /// The signed form used by the stroke text format.
    pub const fn to_signed(self) -> i32 {
        self.0 as i32
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse a decimal packed color, accepting both the signed and the
    /// unsigned spelling (`-1` and `4294967295` are both opaque white).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(signed) = text.parse::<i32>() {
            return Some(Self::from_signed(signed));
        }
        text.parse::<u32>().ok().map(Self)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_signed())
    }
}

impl From<Color> for Argb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::from_channels(rgba.a, rgba.r, rgba.g, rgba.b)
    }
}

impl From<Argb> for Color {
    fn from(color: Argb) -> Self {
        Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
    }
}
