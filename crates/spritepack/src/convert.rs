//! Per-pixel conversions between RGBA and the reduced raw sample formats.
//!
//! Going down to RGB888 drops alpha; going down to RGB565 also drops the low
//! bits of every channel. Neither loss is an error.

use crate::Color;

/// A 24-bit color sample without alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb888 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub const fn from_bytes(b: [u8; 3]) -> Self {
        Self::new(b[0], b[1], b[2])
    }

    /// Opaque color with the same channels.
    #[inline]
    pub const fn to_color(self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }
}

impl From<Color> for Rgb888 {
    #[inline]
    fn from(c: Color) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

/// A 16-bit color sample: 5 bits red, 6 bits green, 5 bits blue.
///
/// Channels hold the reduced values (`r <= 31`, `g <= 63`, `b <= 31`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565 {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb565 {
    /// Builds a sample from already reduced channels; excess high bits are
    /// masked off.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r & 0x1f,
            g: g & 0x3f,
            b: b & 0x1f,
        }
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.r
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.g
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.b
    }

    /// Packs as `r << 11 | g << 5 | b`.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        (self.r as u16) << 11 | (self.g as u16) << 5 | self.b as u16
    }

    #[inline]
    pub const fn from_u16(v: u16) -> Self {
        Self::new((v >> 11) as u8, (v >> 5) as u8, v as u8)
    }

    /// Expands back to 8 bits per channel by bit replication, alpha 255.
    #[inline]
    pub const fn to_color(self) -> Color {
        Color::rgb(
            self.r << 3 | self.r >> 2,
            self.g << 2 | self.g >> 4,
            self.b << 3 | self.b >> 2,
        )
    }
}

impl From<Color> for Rgb565 {
    #[inline]
    fn from(c: Color) -> Self {
        Self {
            r: c.r >> 3,
            g: c.g >> 2,
            b: c.b >> 3,
        }
    }
}

#[inline]
pub fn to_rgb888(c: Color) -> Rgb888 {
    Rgb888::from(c)
}

#[inline]
pub fn to_rgb565(c: Color) -> Rgb565 {
    Rgb565::from(c)
}
