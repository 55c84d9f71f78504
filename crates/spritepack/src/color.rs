use std::fmt;

/// Maximum number of entries in a sprite palette.
///
/// The palette count is stored in a single byte, so 255 is the last
/// representable count.
pub const PALETTE_MAX: usize = 255;

/// An 8-bit-per-channel RGBA color.
///
/// Two colors are equal only if all four channels match, alpha included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Formats as `#rrggbbaa`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Color::rgb(1, 2, 3), Color::rgba(1, 2, 3, 255));
    }

    #[test]
    fn test_alpha_participates_in_equality() {
        assert_ne!(Color::rgba(10, 20, 30, 255), Color::rgba(10, 20, 30, 254));
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Color::rgba(255, 0, 16, 128).to_string(), "#ff001080");
        assert_eq!(Color::TRANSPARENT.to_string(), "#00000000");
    }

    #[test]
    fn test_array_conversion() {
        let c = Color::from([1, 2, 3, 4]);
        assert_eq!(<[u8; 4]>::from(c), [1, 2, 3, 4]);
    }
}
