use byteorder::{ByteOrder, LE};
use log::debug;

use crate::bits;
use crate::{
    AssetHeader, Color, Palette, Result, Rgb565, Rgb888, SpriteError, SpriteFormat, SpritePixels,
    SpriteSheet, HEADER_LEN,
};

/// Decodes a complete `SPRITEPK` or `SPRITERW` asset.
///
/// The body length is derived from the width, height, format and palette
/// count; the header's size field is only checked against it.
///
/// # Errors
///
/// - [`SpriteError::UnknownAssetType`] for an unrecognized tag
/// - [`SpriteError::UnknownFormat`] for an unknown format byte, and
///   [`SpriteError::FormatMismatch`] when the format does not belong to the
///   tagged asset type
/// - [`SpriteError::TruncatedData`] if `data` ends before the structure does
/// - [`SpriteError::SizeMismatch`] if the size field, or the length of `data`,
///   differs from the structural length
/// - [`SpriteError::DuplicateColor`] / [`SpriteError::IndexOutOfRange`] for a
///   palette or index stream that cannot form a valid sheet
///
/// # Example
///
/// ```rust
/// use spritepack::{decode, encode_raw, Color, SpriteFormat, SpritePixels, SpriteSheet, TileSize};
///
/// let sheet = SpriteSheet::new(
///     1,
///     1,
///     TileSize::default(),
///     SpritePixels::Rgba(vec![Color::rgb(1, 2, 3)]),
/// )?;
/// let bytes = encode_raw(&sheet)?;
/// assert_eq!(decode(&bytes)?, sheet);
/// # Ok::<(), spritepack::SpriteError>(())
/// ```
#[must_use = "this returns the decoded SpriteSheet"]
pub fn decode(data: &[u8]) -> Result<SpriteSheet> {
    let header = AssetHeader::read(data)?;
    let mut reader = Reader::new(data, HEADER_LEN);

    let width = reader.u16()?;
    let height = reader.u16()?;
    let columns = reader.u16()?;
    let rows = reader.u16()?;
    let format = SpriteFormat::from_tag(reader.u8()?)?;
    if format.asset_type() != header.asset_type {
        return Err(SpriteError::FormatMismatch {
            asset_type: header.asset_type,
            format,
        });
    }

    let pixel_count = width as usize * height as usize;
    let pixels = match format {
        SpriteFormat::Paletted => {
            let count = reader.u8()? as usize;
            let colors = reader
                .take(count * 4)?
                .chunks_exact(4)
                .map(|c| Color::rgba(c[0], c[1], c[2], c[3]))
                .collect();
            let palette = Palette::from_colors(colors)?;
            let bit_width = palette.bit_width();
            let packed = reader.take(bits::packed_len(pixel_count, bit_width))?;
            let indices = bits::unpack(packed, bit_width, pixel_count)?;
            SpritePixels::Paletted { palette, indices }
        }
        SpriteFormat::Rgba => SpritePixels::Rgba(
            reader
                .take(pixel_count * 4)?
                .chunks_exact(4)
                .map(|c| Color::rgba(c[0], c[1], c[2], c[3]))
                .collect(),
        ),
        SpriteFormat::Rgb888 => SpritePixels::Rgb888(
            reader
                .take(pixel_count * 3)?
                .chunks_exact(3)
                .map(|c| Rgb888::new(c[0], c[1], c[2]))
                .collect(),
        ),
        SpriteFormat::Rgb565 => SpritePixels::Rgb565(
            reader
                .take(pixel_count * 2)?
                .chunks_exact(2)
                .map(|c| Rgb565::from_u16(LE::read_u16(c)))
                .collect(),
        ),
    };

    let required = reader.position();
    if header.size as usize != required {
        return Err(SpriteError::SizeMismatch {
            expected: required,
            actual: header.size as usize,
        });
    }
    if data.len() != required {
        return Err(SpriteError::SizeMismatch {
            expected: required,
            actual: data.len(),
        });
    }

    debug!(
        "decoded {:?} asset: {}x{} {:?}, {} bytes",
        header.asset_type, width, height, format, required
    );
    SpriteSheet::with_grid(width, height, columns, rows, pixels)
}

/// Bounds-checked cursor over the asset bytes.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(SpriteError::TruncatedData {
                expected: self.pos.saturating_add(len),
                actual: self.data.len(),
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(LE::read_u16(self.take(2)?))
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }
}
