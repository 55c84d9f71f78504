//! Decoded source images as seen by the quantizer.
//!
//! Loading and decoding image files happens outside this crate; whatever does
//! it hands pixels over through [`ImageSource`].

use crate::{Color, Result, SpriteError};

/// Read access to a decoded image.
pub trait ImageSource {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resolved color of the pixel at (`x`, `y`).
    ///
    /// For indexed images this is the table color of the pixel's index.
    fn pixel_at(&self, x: u32, y: u32) -> Color;

    /// The image's own color table, if it is an indexed image.
    fn indexed_palette_colors(&self) -> Option<&[Color]>;

    fn is_indexed(&self) -> bool {
        self.indexed_palette_colors().is_some()
    }
}

/// An in-memory image: row-major colors plus an optional color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    table: Option<Vec<Color>>,
}

impl SourceImage {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SpriteError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            table: None,
        })
    }

    /// Wraps raw RGBA bytes (4 bytes per pixel).
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SpriteError::BufferSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|c| Color::rgba(c[0], c[1], c[2], c[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Builds an indexed image from per-pixel indices into `table`.
    pub fn indexed(width: u32, height: u32, indices: &[u8], table: Vec<Color>) -> Result<Self> {
        let pixels = indices
            .iter()
            .map(|&index| {
                table
                    .get(index as usize)
                    .copied()
                    .ok_or(SpriteError::IndexOutOfRange {
                        index,
                        palette_len: table.len(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(width, height, pixels)?.with_table(table))
    }

    /// Attaches a color table to already resolved pixels.
    pub fn with_table(mut self, table: Vec<Color>) -> Self {
        self.table = Some(table);
        self
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

impl ImageSource for SourceImage {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel_at(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    fn indexed_palette_colors(&self) -> Option<&[Color]> {
        self.table.as_deref()
    }
}
