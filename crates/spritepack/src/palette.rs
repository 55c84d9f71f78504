//! Deduplicated, order-preserving color tables.
//!
//! Entry order matters: the position of a color is the index written into the
//! packed pixel stream.

use std::collections::HashMap;

use crate::bits;
use crate::{Color, Result, SpriteError, PALETTE_MAX};

/// An ordered table of at most [`PALETTE_MAX`] distinct colors.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: Vec<Color>,
    lookup: HashMap<Color, u8>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a palette from the distinct colors of `pixels`, in order of
    /// first appearance.
    ///
    /// Fails with [`SpriteError::PaletteOverflow`] as soon as a 256th distinct
    /// color is seen.
    pub fn from_unique_pixels<I>(pixels: I) -> Result<Self>
    where
        I: IntoIterator<Item = Color>,
    {
        let mut palette = Self::new();
        for color in pixels {
            palette.insert(color)?;
        }
        Ok(palette)
    }

    /// Imports the color table of an indexed image.
    ///
    /// Repeated entries keep their first position; the cap is the same as for
    /// [`Palette::from_unique_pixels`].
    pub fn from_indexed_source(table: &[Color]) -> Result<Self> {
        Self::from_unique_pixels(table.iter().copied())
    }

    /// Builds a palette that must match `colors` entry for entry.
    ///
    /// Unlike the other constructors, a repeated color is an error rather than
    /// being skipped, since skipping would shift every later index.
    pub fn from_colors(colors: Vec<Color>) -> Result<Self> {
        if colors.len() > PALETTE_MAX {
            return Err(SpriteError::PaletteOverflow);
        }
        let mut lookup = HashMap::with_capacity(colors.len());
        for (index, &color) in colors.iter().enumerate() {
            if lookup.insert(color, index as u8).is_some() {
                return Err(SpriteError::DuplicateColor { index });
            }
        }
        Ok(Self { colors, lookup })
    }

    /// Appends `color` unless it is already present and returns its index.
    pub fn insert(&mut self, color: Color) -> Result<u8> {
        if let Some(&index) = self.lookup.get(&color) {
            return Ok(index);
        }
        if self.colors.len() == PALETTE_MAX {
            return Err(SpriteError::PaletteOverflow);
        }
        let index = self.colors.len() as u8;
        self.colors.push(color);
        self.lookup.insert(color, index);
        Ok(index)
    }

    /// Returns the position of an exact match for `color`.
    ///
    /// There is no nearest-color fallback. The error has no pixel position;
    /// the quantizer fills it in.
    pub fn index_of(&self, color: Color) -> Result<u8> {
        self.lookup
            .get(&color)
            .copied()
            .ok_or(SpriteError::ColorNotFound { color, position: None })
    }

    #[inline]
    pub fn get(&self, index: u8) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of bits needed per packed index for this palette.
    #[inline]
    pub fn bit_width(&self) -> u8 {
        bits::bit_width(self.colors.len())
    }
}

impl PartialEq for Palette {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
    }
}

impl Eq for Palette {}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Color = Color::rgb(255, 0, 0);
    const B: Color = Color::rgb(0, 255, 0);
    const C: Color = Color::rgb(0, 0, 255);

    #[test]
    fn test_first_encounter_order() {
        let palette = Palette::from_unique_pixels([A, B, A, C, B]).unwrap();
        assert_eq!(palette.colors(), &[A, B, C]);
        assert_eq!(palette.index_of(C).unwrap(), 2);
    }

    #[test]
    fn test_overflow_on_256th_color() {
        let fits = (0..=254u8).map(|i| Color::rgb(i, 0, 0));
        let palette = Palette::from_unique_pixels(fits.clone()).unwrap();
        assert_eq!(palette.len(), PALETTE_MAX);

        let overflow = fits.chain(std::iter::once(Color::rgb(255, 0, 0)));
        assert_eq!(
            Palette::from_unique_pixels(overflow),
            Err(SpriteError::PaletteOverflow)
        );
    }

    #[test]
    fn test_duplicates_do_not_count_toward_cap() {
        let pixels = (0..1000u32).map(|i| Color::rgb((i % 255) as u8, 0, 0));
        assert_eq!(Palette::from_unique_pixels(pixels).unwrap().len(), 255);
    }

    #[test]
    fn test_alpha_distinguishes_entries() {
        let palette =
            Palette::from_unique_pixels([Color::rgba(1, 1, 1, 0), Color::rgba(1, 1, 1, 255)])
                .unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_index_of_missing() {
        let palette = Palette::from_unique_pixels([A]).unwrap();
        assert_eq!(
            palette.index_of(B),
            Err(SpriteError::ColorNotFound { color: B, position: None })
        );
    }

    #[test]
    fn test_indexed_source_keeps_first_duplicate() {
        let palette = Palette::from_indexed_source(&[C, A, C, B]).unwrap();
        assert_eq!(palette.colors(), &[C, A, B]);
    }

    #[test]
    fn test_from_colors_rejects_duplicates() {
        assert_eq!(
            Palette::from_colors(vec![A, B, A]),
            Err(SpriteError::DuplicateColor { index: 2 })
        );
        assert_eq!(Palette::from_colors(vec![A, B]).unwrap().colors(), &[A, B]);
    }

    #[test]
    fn test_bit_width() {
        assert_eq!(Palette::new().bit_width(), 0);
        assert_eq!(Palette::from_unique_pixels([A]).unwrap().bit_width(), 0);
        assert_eq!(Palette::from_unique_pixels([A, B]).unwrap().bit_width(), 1);
        assert_eq!(Palette::from_unique_pixels([A, B, C]).unwrap().bit_width(), 2);
    }
}
