use byteorder::{ByteOrder, LE};

use crate::{Result, SpriteError, HEADER_LEN, TAG_LEN};

pub const PACKED_TAG: &[u8; TAG_LEN] = b"SPRITEPK";
pub const RAW_TAG: &[u8; TAG_LEN] = b"SPRITERW";

/// Kind of sprite sheet that follows an [`AssetHeader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    /// Palette plus bit-packed indices (`SPRITEPK`)
    Packed,
    /// Direct color samples (`SPRITERW`)
    Raw,
}

impl AssetType {
    pub const fn tag(self) -> &'static [u8; TAG_LEN] {
        match self {
            Self::Packed => PACKED_TAG,
            Self::Raw => RAW_TAG,
        }
    }

    pub fn from_tag(tag: &[u8; TAG_LEN]) -> Result<Self> {
        match tag {
            PACKED_TAG => Ok(Self::Packed),
            RAW_TAG => Ok(Self::Raw),
            _ => Err(SpriteError::UnknownAssetType(*tag)),
        }
    }
}

/// The 10-byte asset header: type tag and total asset size (header
/// included), little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetHeader {
    pub asset_type: AssetType,
    pub size: u16,
}

impl AssetHeader {
    pub const LEN: usize = HEADER_LEN;

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.asset_type.tag());
        let mut size = [0u8; 2];
        LE::write_u16(&mut size, self.size);
        out.extend_from_slice(&size);
    }

    pub(crate) fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(SpriteError::TruncatedData {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&bytes[..TAG_LEN]);
        Ok(Self {
            asset_type: AssetType::from_tag(&tag)?,
            size: LE::read_u16(&bytes[TAG_LEN..HEADER_LEN]),
        })
    }
}

/// Reads only the header of an asset, without validating the body.
pub fn peek_header(bytes: &[u8]) -> Result<AssetHeader> {
    AssetHeader::read(bytes)
}
