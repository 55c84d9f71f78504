use log::debug;

use crate::{ImageSource, Palette, Result, SpriteError};

/// Output of [`quantize`]: a palette and one index per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantized {
    pub palette: Palette,
    pub indices: Vec<u8>,
}

/// Maps every pixel of `source` to an index into a palette.
///
/// Without a `target` the palette is discovered from the image: the image's
/// own color table when it is indexed, otherwise its distinct colors in scan
/// order. With a `target`, every pixel color must be present in it exactly.
///
/// Both paths run the same exact-match lookup, so discovered palettes go
/// through an identity mapping.
///
/// # Errors
///
/// - [`SpriteError::PaletteOverflow`] if discovery finds more than 255 colors
/// - [`SpriteError::ColorNotFound`] with the pixel position of the first color
///   missing from the palette; no indices are returned in that case
pub fn quantize<S>(source: &S, target: Option<&Palette>) -> Result<Quantized>
where
    S: ImageSource + ?Sized,
{
    let (width, height) = (source.width(), source.height());
    let palette = match target {
        Some(palette) => palette.clone(),
        None => discover_palette(source)?,
    };

    let mut indices = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let color = source.pixel_at(x, y);
            let index = palette
                .index_of(color)
                .map_err(|_| SpriteError::ColorNotFound {
                    color,
                    position: Some((x, y)),
                })?;
            indices.push(index);
        }
    }

    debug!(
        "quantized {}x{} image onto {} colors ({})",
        width,
        height,
        palette.len(),
        if target.is_some() { "fixed" } else { "discovered" }
    );

    Ok(Quantized { palette, indices })
}

fn discover_palette<S>(source: &S) -> Result<Palette>
where
    S: ImageSource + ?Sized,
{
    if let Some(table) = source.indexed_palette_colors() {
        return Palette::from_indexed_source(table);
    }
    let (width, height) = (source.width(), source.height());
    Palette::from_unique_pixels(
        (0..height).flat_map(move |y| (0..width).map(move |x| source.pixel_at(x, y))),
    )
}
