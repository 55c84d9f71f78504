//! Sprite sheet → asset bytes.
//!
//! Both asset types share the layout
//!
//! ```text
//! tag[8] size:u16 width:u16 height:u16 columns:u16 rows:u16 format:u8 body
//! ```
//!
//! with all integers little-endian. A packed body is `count:u8`, `count` RGBA
//! entries and the index bitstream; a raw body is the pixel samples.

use byteorder::{ByteOrder, LE};
use log::debug;

use crate::bits;
use crate::{
    AssetHeader, AssetType, Result, SpriteError, SpritePixels, SpriteSheet, ASSET_SIZE_MAX,
    HEADER_LEN, FIXED_FIELDS_LEN,
};

/// Encodes a paletted sheet as a `SPRITEPK` asset.
///
/// # Errors
///
/// - [`SpriteError::FormatMismatch`] if the sheet is not paletted
/// - [`SpriteError::AssetTooLarge`] if the asset would exceed 65535 bytes
///
/// Nothing is returned on failure; there is no fallback compression.
#[must_use = "this returns the encoded asset"]
pub fn encode_packed(sheet: &SpriteSheet) -> Result<Vec<u8>> {
    let SpritePixels::Paletted { palette, indices } = sheet.pixels() else {
        return Err(SpriteError::FormatMismatch {
            asset_type: AssetType::Packed,
            format: sheet.format(),
        });
    };

    let bit_width = palette.bit_width();
    let data = bits::pack(indices, bit_width)?;

    let mut body = Vec::with_capacity(FIXED_FIELDS_LEN + 1 + palette.len() * 4 + data.len());
    write_fixed_fields(&mut body, sheet);
    body.push(palette.len() as u8);
    for color in palette.colors() {
        body.extend_from_slice(&color.to_array());
    }
    body.extend_from_slice(&data);

    let out = finish(AssetType::Packed, body)?;
    debug!(
        "packed {}x{} sheet: {} colors, {} bits per pixel, {} bytes",
        sheet.width(),
        sheet.height(),
        palette.len(),
        bit_width,
        out.len()
    );
    Ok(out)
}

/// Encodes a direct color sheet as a `SPRITERW` asset.
///
/// Pixels are written as `r,g,b,a` (RGBA), `r,g,b` (RGB888) or a
/// little-endian `r5 g6 b5` word (RGB565).
///
/// # Errors
///
/// - [`SpriteError::FormatMismatch`] if the sheet is paletted
/// - [`SpriteError::AssetTooLarge`] if the asset would exceed 65535 bytes
#[must_use = "this returns the encoded asset"]
pub fn encode_raw(sheet: &SpriteSheet) -> Result<Vec<u8>> {
    let format = sheet.format();
    let bytes_per_pixel = format.bytes_per_pixel().unwrap_or(0);

    let mut body = Vec::with_capacity(FIXED_FIELDS_LEN + sheet.pixels().len() * bytes_per_pixel);
    write_fixed_fields(&mut body, sheet);
    match sheet.pixels() {
        SpritePixels::Rgba(pixels) => {
            for c in pixels {
                body.extend_from_slice(&c.to_array());
            }
        }
        SpritePixels::Rgb888(pixels) => {
            for c in pixels {
                body.extend_from_slice(&c.to_bytes());
            }
        }
        SpritePixels::Rgb565(pixels) => {
            for c in pixels {
                put_u16(&mut body, c.to_u16());
            }
        }
        SpritePixels::Paletted { .. } => {
            return Err(SpriteError::FormatMismatch {
                asset_type: AssetType::Raw,
                format,
            })
        }
    }

    let out = finish(AssetType::Raw, body)?;
    debug!(
        "raw {}x{} {:?} sheet: {} bytes",
        sheet.width(),
        sheet.height(),
        format,
        out.len()
    );
    Ok(out)
}

/// Encodes a sheet as whichever asset type its format requires.
#[must_use = "this returns the encoded asset"]
pub fn encode(sheet: &SpriteSheet) -> Result<Vec<u8>> {
    match sheet.format().asset_type() {
        AssetType::Packed => encode_packed(sheet),
        AssetType::Raw => encode_raw(sheet),
    }
}

/// Prefixes the assembled body with its header once the total size is known.
fn finish(asset_type: AssetType, body: Vec<u8>) -> Result<Vec<u8>> {
    let size = HEADER_LEN + body.len();
    if size > ASSET_SIZE_MAX {
        return Err(SpriteError::AssetTooLarge { size });
    }
    let mut out = Vec::with_capacity(size);
    AssetHeader {
        asset_type,
        size: size as u16,
    }
    .write(&mut out);
    out.extend_from_slice(&body);
    Ok(out)
}

fn write_fixed_fields(out: &mut Vec<u8>, sheet: &SpriteSheet) {
    put_u16(out, sheet.width());
    put_u16(out, sheet.height());
    put_u16(out, sheet.columns());
    put_u16(out, sheet.rows());
    out.push(sheet.format().tag());
}

#[inline]
fn put_u16(out: &mut Vec<u8>, value: u16) {
    let mut buf = [0u8; 2];
    LE::write_u16(&mut buf, value);
    out.extend_from_slice(&buf);
}
