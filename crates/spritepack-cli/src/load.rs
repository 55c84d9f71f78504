//! Image file loading for the sprite packer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use image::ImageFormat;
use log::debug;
use png::ColorType;
use spritepack::{Color, ImageSource, Palette, SourceImage};

/// Loads any supported image as resolved RGBA pixels.
///
/// Indexed PNGs also carry their color table (with `tRNS` alpha), so the
/// packer keeps the artist's palette order.
pub fn load_image(path: &Path) -> Result<SourceImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let source = SourceImage::from_rgba(width, height, img.as_raw())?;

    match read_png_table(path)? {
        Some(table) => {
            debug!("'{}' is indexed with {} colors", path.display(), table.len());
            Ok(source.with_table(table))
        }
        None => Ok(source),
    }
}

/// Loads a target palette: an indexed PNG's color table, or otherwise the
/// distinct pixel colors in scan order.
pub fn load_palette(path: &Path) -> Result<Palette> {
    let image = load_image(path)?;
    let palette = match image.indexed_palette_colors() {
        Some(table) => Palette::from_indexed_source(table),
        None => Palette::from_unique_pixels(image.pixels().iter().copied()),
    }
    .with_context(|| format!("Failed to read palette from '{}'", path.display()))?;
    Ok(palette)
}

fn read_png_table(path: &Path) -> Result<Option<Vec<Color>>> {
    if ImageFormat::from_path(path).ok() != Some(ImageFormat::Png) {
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    let reader = png::Decoder::new(BufReader::new(file))
        .read_info()
        .with_context(|| format!("Failed to read PNG info from '{}'", path.display()))?;
    let info = reader.info();

    if info.color_type != ColorType::Indexed {
        return Ok(None);
    }
    let Some(palette) = info.palette.as_deref() else {
        return Ok(None);
    };
    let trns = info.trns.as_deref();

    let table = palette
        .chunks_exact(3)
        .enumerate()
        .map(|(i, c)| {
            let alpha = trns.and_then(|t| t.get(i).copied()).unwrap_or(255);
            Color::rgba(c[0], c[1], c[2], alpha)
        })
        .collect();
    Ok(Some(table))
}
