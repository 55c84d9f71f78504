//! # spritepack
//!
//! Converts images into the compact sprite-sheet assets read by the handheld
//! engine, and reconstructs images from those assets.
//!
//! ## Features
//!
//! - **Packed assets** (`SPRITEPK`): a deduplicated palette of up to 255 colors
//!   followed by a bit-packed index stream using the minimum index width.
//! - **Raw assets** (`SPRITERW`): direct RGBA, RGB888 or RGB565 samples.
//! - **Exact-match quantizer**: maps every pixel onto an auto-discovered or a
//!   caller-supplied palette, failing loudly when a color has no entry.
//!
//! ## Quick Start
//!
//! ### Packing an image
//!
//! ```ignore
//! use spritepack::{encode_packed, SourceImage, SpriteSheet, TileSize};
//!
//! // RGBA image data (4 bytes per pixel)
//! let rgba = vec![255u8, 0, 0, 255, 0, 255, 0, 255]; // red and green pixels
//! let image = SourceImage::from_rgba(2, 1, &rgba)?;
//! let sheet = SpriteSheet::packed_from_image(&image, None, TileSize::default())?;
//! let bytes = encode_packed(&sheet)?;
//! ```
//!
//! ### Decoding an asset
//!
//! ```ignore
//! use spritepack::decode;
//!
//! let sheet = decode(&bytes)?;
//! println!("{}x{} {:?}", sheet.width(), sheet.height(), sheet.format());
//! let rgba = sheet.to_rgba8();
//! ```

use thiserror::Error;

pub mod bits;
pub mod color;
pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod header;
pub mod palette;
pub mod quantize;
pub mod reduce;
pub mod sheet;
pub mod source;

pub use color::{Color, PALETTE_MAX};
pub use convert::{Rgb565, Rgb888};
pub use decoder::decode;
pub use encoder::{encode, encode_packed, encode_raw};
pub use header::{peek_header, AssetHeader, AssetType};
pub use palette::Palette;
pub use quantize::{quantize, Quantized};
pub use reduce::reduce_colors;
pub use sheet::{SpriteFormat, SpritePixels, SpriteSheet, TileSize};
pub use source::{ImageSource, SourceImage};

/// Errors that can occur while building, encoding or decoding sprite assets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpriteError {
    /// More than 255 distinct colors would be needed
    #[error("palette overflow: more than {} distinct colors", PALETTE_MAX)]
    PaletteOverflow,

    /// A source color has no exact entry in the target palette
    ///
    /// `position` is the pixel (x, y) when the lookup came from quantizing an
    /// image, and `None` for a bare [`Palette::index_of`] lookup.
    #[error(
        "color {color}{} not found in palette",
        .position.map(|(x, y)| format!(" at ({x}, {y})")).unwrap_or_default()
    )]
    ColorNotFound {
        color: Color,
        position: Option<(u32, u32)>,
    },

    /// Encoded asset exceeds the 16-bit size field
    #[error("asset too large: {size} bytes (limit {})", ASSET_SIZE_MAX)]
    AssetTooLarge { size: usize },

    /// Header tag is neither `SPRITEPK` nor `SPRITERW`
    #[error("unknown asset type {:?}", String::from_utf8_lossy(.0))]
    UnknownAssetType([u8; 8]),

    /// Declared size disagrees with the structural length of the asset
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Buffer ends before the structure it describes
    #[error("truncated data: need {expected} bytes, have {actual}")]
    TruncatedData { expected: usize, actual: usize },

    /// Format byte is not a known sprite format
    #[error("unknown sprite format tag {0}")]
    UnknownFormat(u8),

    /// Sprite format cannot be stored in the given asset type
    #[error("format {format:?} cannot be stored as {asset_type:?} asset")]
    FormatMismatch {
        asset_type: AssetType,
        format: SpriteFormat,
    },

    /// A strict palette contains the same color twice
    #[error("duplicate palette color at index {index}")]
    DuplicateColor { index: usize },

    /// A pixel index points past the end of the palette
    #[error("palette index {index} out of range for {palette_len} colors")]
    IndexOutOfRange { index: u8, palette_len: usize },

    /// Image dimensions do not fit the 16-bit size fields
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Tile width or height is zero
    #[error("invalid tile size: {width}x{height}")]
    InvalidTileSize { width: u16, height: u16 },

    /// Packed values are limited to 8 bits
    #[error("invalid bit width {0}")]
    InvalidBitWidth(u8),

    /// Value does not fit in the requested bit width
    #[error("value {value} does not fit in {bit_width} bits")]
    ValueOutOfRange { value: u8, bit_width: u8 },

    /// Color reduction failed
    #[error("quantization error: {0}")]
    Quantization(String),
}

/// Result type for sprite asset operations.
pub type Result<T> = core::result::Result<T, SpriteError>;

/// Largest asset the 16-bit size field can describe, header included.
pub const ASSET_SIZE_MAX: usize = u16::MAX as usize;

// Serialized field sizes
pub(crate) const TAG_LEN: usize = 8;
pub(crate) const HEADER_LEN: usize = TAG_LEN + 2;
pub(crate) const FIXED_FIELDS_LEN: usize = 4 * 2 + 1;
