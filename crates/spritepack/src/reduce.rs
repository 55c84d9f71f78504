//! Optional color reduction for sources with too many colors.
//!
//! The packer itself only does exact matching and reports
//! [`SpriteError::PaletteOverflow`](crate::SpriteError::PaletteOverflow) for
//! images with more than 255 colors. Callers that accept a lossy result can run
//! [`reduce_colors`] first and pack its output.

use log::debug;
use quantette::{
    deps::palette::Srgb, dither::FloydSteinberg, ImageRef, PaletteSize, Pipeline, QuantizeMethod,
};

use crate::{Color, ImageSource, Result, SourceImage, SpriteError, PALETTE_MAX};

/// Pixels with alpha below this become fully transparent, the rest opaque.
const ALPHA_THRESHOLD: u8 = 128;

/// Reduces `source` to at most `max_colors` opaque colors plus, if needed, one
/// fully transparent color.
///
/// `max_colors` is clamped to `2..=254` so that the result always fits a
/// palette. Colors are chosen with Wu's method and Floyd-Steinberg dithering.
pub fn reduce_colors<S>(source: &S, max_colors: u8) -> Result<SourceImage>
where
    S: ImageSource + ?Sized,
{
    let (width, height) = (source.width(), source.height());
    if width == 0 || height == 0 {
        return SourceImage::new(width, height, Vec::new());
    }

    let colors: Vec<Color> = (0..height)
        .flat_map(move |y| (0..width).map(move |x| source.pixel_at(x, y)))
        .collect();
    let Some(&first_opaque) = colors.iter().find(|c| c.a >= ALPHA_THRESHOLD) else {
        return SourceImage::new(width, height, vec![Color::TRANSPARENT; colors.len()]);
    };

    // Hidden pixels repeat the last visible color in scan order.
    let mut fill = first_opaque;
    let rgb_pixels: Vec<Srgb<u8>> = colors
        .iter()
        .map(|c| {
            if c.a >= ALPHA_THRESHOLD {
                fill = *c;
            }
            Srgb::new(fill.r, fill.g, fill.b)
        })
        .collect();

    let max_colors = max_colors.clamp(2, (PALETTE_MAX - 1) as u8);
    let palette_size = PaletteSize::try_from(max_colors).unwrap_or(PaletteSize::MAX);

    let image = ImageRef::new(width, height, &rgb_pixels)
        .map_err(|e| SpriteError::Quantization(e.to_string()))?;

    let indexed_image = Pipeline::new()
        .palette_size(palette_size)
        .quantize_method(QuantizeMethod::Wu)
        .ditherer(FloydSteinberg::new())
        .input_image(image)
        .output_srgb8_indexed_image();

    let palette: Vec<Color> = indexed_image
        .palette()
        .iter()
        .map(|c| Color::rgb(c.red, c.green, c.blue))
        .collect();

    let pixels = colors
        .iter()
        .zip(indexed_image.indices())
        .map(|(original, &index)| {
            if original.a < ALPHA_THRESHOLD {
                Color::TRANSPARENT
            } else {
                palette
                    .get(index as usize)
                    .copied()
                    .unwrap_or(Color::TRANSPARENT)
            }
        })
        .collect();

    debug!(
        "reduced {}x{} image to {} colors",
        width,
        height,
        palette.len()
    );
    SourceImage::new(width, height, pixels)
}
