use crate::convert::{to_rgb565, to_rgb888};
use crate::{
    quantize, AssetType, Color, ImageSource, Palette, Result, Rgb565, Rgb888, SpriteError,
};

/// Pixel storage of a sprite sheet, as written in the format byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpriteFormat {
    /// 32-bit direct color
    Rgba = 0,
    /// 24-bit direct color, no alpha
    Rgb888 = 1,
    /// 16-bit direct color, 5/6/5 bits, no alpha
    Rgb565 = 2,
    /// Palette indices
    Paletted = 3,
}

impl SpriteFormat {
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Self::Rgba),
            1 => Ok(Self::Rgb888),
            2 => Ok(Self::Rgb565),
            3 => Ok(Self::Paletted),
            _ => Err(SpriteError::UnknownFormat(tag)),
        }
    }

    /// Bytes per pixel of the raw formats.
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            Self::Rgba => Some(4),
            Self::Rgb888 => Some(3),
            Self::Rgb565 => Some(2),
            Self::Paletted => None,
        }
    }

    /// Asset type able to carry this format.
    pub const fn asset_type(self) -> AssetType {
        match self {
            Self::Paletted => AssetType::Packed,
            Self::Rgba | Self::Rgb888 | Self::Rgb565 => AssetType::Raw,
        }
    }
}

impl TryFrom<u8> for SpriteFormat {
    type Error = SpriteError;

    fn try_from(tag: u8) -> Result<Self> {
        Self::from_tag(tag)
    }
}

/// Size of one tile of the sheet's tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
    width: u16,
    height: u16,
}

impl TileSize {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SpriteError::InvalidTileSize { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub const fn width(self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> u16 {
        self.height
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
        }
    }
}

/// Pixel payload of a sprite sheet, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpritePixels {
    Paletted { palette: Palette, indices: Vec<u8> },
    Rgba(Vec<Color>),
    Rgb888(Vec<Rgb888>),
    Rgb565(Vec<Rgb565>),
}

impl SpritePixels {
    pub fn format(&self) -> SpriteFormat {
        match self {
            Self::Paletted { .. } => SpriteFormat::Paletted,
            Self::Rgba(_) => SpriteFormat::Rgba,
            Self::Rgb888(_) => SpriteFormat::Rgb888,
            Self::Rgb565(_) => SpriteFormat::Rgb565,
        }
    }

    /// Number of pixels stored.
    pub fn len(&self) -> usize {
        match self {
            Self::Paletted { indices, .. } => indices.len(),
            Self::Rgba(p) => p.len(),
            Self::Rgb888(p) => p.len(),
            Self::Rgb565(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sprite sheet: dimensions, tile grid and pixels in one of the
/// [`SpriteFormat`]s.
///
/// Constructors check that the payload holds exactly `width * height` pixels
/// and that every palette index is in range; the sheet is immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    width: u16,
    height: u16,
    columns: u16,
    rows: u16,
    pixels: SpritePixels,
}

impl SpriteSheet {
    /// Creates a sheet whose grid is `width / tile.width()` by
    /// `height / tile.height()` tiles. The division truncates; dimensions need
    /// not be multiples of the tile size.
    pub fn new(width: u16, height: u16, tile: TileSize, pixels: SpritePixels) -> Result<Self> {
        Self::with_grid(
            width,
            height,
            width / tile.width(),
            height / tile.height(),
            pixels,
        )
    }

    /// Creates a sheet with an explicit tile grid, as stored in an asset.
    pub fn with_grid(
        width: u16,
        height: u16,
        columns: u16,
        rows: u16,
        pixels: SpritePixels,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SpriteError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        if let SpritePixels::Paletted { palette, indices } = &pixels {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= palette.len()) {
                return Err(SpriteError::IndexOutOfRange {
                    index,
                    palette_len: palette.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            columns,
            rows,
            pixels,
        })
    }

    /// Quantizes `source` into a paletted sheet.
    ///
    /// See [`quantize`] for how the palette is chosen and the failure modes.
    pub fn packed_from_image<S>(source: &S, target: Option<&Palette>, tile: TileSize) -> Result<Self>
    where
        S: ImageSource + ?Sized,
    {
        let (width, height) = checked_dimensions(source)?;
        let quantized = quantize(source, target)?;
        Self::new(
            width,
            height,
            tile,
            SpritePixels::Paletted {
                palette: quantized.palette,
                indices: quantized.indices,
            },
        )
    }

    /// Converts `source` into a direct color sheet of the given raw `format`.
    pub fn raw_from_image<S>(source: &S, format: SpriteFormat, tile: TileSize) -> Result<Self>
    where
        S: ImageSource + ?Sized,
    {
        let (width, height) = checked_dimensions(source)?;
        let colors = (0..height as u32)
            .flat_map(move |y| (0..width as u32).map(move |x| source.pixel_at(x, y)));
        let pixels = match format {
            SpriteFormat::Rgba => SpritePixels::Rgba(colors.collect()),
            SpriteFormat::Rgb888 => SpritePixels::Rgb888(colors.map(to_rgb888).collect()),
            SpriteFormat::Rgb565 => SpritePixels::Rgb565(colors.map(to_rgb565).collect()),
            SpriteFormat::Paletted => {
                return Err(SpriteError::FormatMismatch {
                    asset_type: AssetType::Raw,
                    format,
                })
            }
        };
        Self::new(width, height, tile, pixels)
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn columns(&self) -> u16 {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    #[inline]
    pub fn format(&self) -> SpriteFormat {
        self.pixels.format()
    }

    #[inline]
    pub fn pixels(&self) -> &SpritePixels {
        &self.pixels
    }

    pub fn palette(&self) -> Option<&Palette> {
        match &self.pixels {
            SpritePixels::Paletted { palette, .. } => Some(palette),
            _ => None,
        }
    }

    /// Reconstructs row-major RGBA bytes (4 bytes per pixel).
    ///
    /// Formats without alpha come back opaque, RGB565 channels are widened by
    /// bit replication.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let colors: Box<dyn Iterator<Item = Color> + '_> = match &self.pixels {
            SpritePixels::Paletted { palette, indices } => Box::new(
                indices
                    .iter()
                    .map(|&i| palette.get(i).unwrap_or(Color::TRANSPARENT)),
            ),
            SpritePixels::Rgba(p) => Box::new(p.iter().copied()),
            SpritePixels::Rgb888(p) => Box::new(p.iter().map(|c| c.to_color())),
            SpritePixels::Rgb565(p) => Box::new(p.iter().map(|c| c.to_color())),
        };
        colors.flat_map(Color::to_array).collect()
    }
}

fn checked_dimensions<S>(source: &S) -> Result<(u16, u16)>
where
    S: ImageSource + ?Sized,
{
    let (width, height) = (source.width(), source.height());
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(SpriteError::InvalidDimensions {
            width: width as usize,
            height: height as usize,
        }),
    }
}
