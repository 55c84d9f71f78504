//! Fixed-width bit packing for palette indices.
//!
//! Values are written most significant bit first with no padding between
//! them. The final byte is zero-filled on the low end.

use bitvec::prelude::*;

use crate::{Result, SpriteError};

const MAX_BIT_WIDTH: u8 = 8;

/// Bits needed to address every index of a palette with `palette_len` entries.
///
/// This is the bit length of `palette_len - 1`, so palettes of zero or one
/// color need no bits at all.
#[inline]
pub fn bit_width(palette_len: usize) -> u8 {
    match palette_len {
        0 | 1 => 0,
        n => (usize::BITS - (n - 1).leading_zeros()) as u8,
    }
}

/// Byte length of `count` packed values of `bit_width` bits.
#[inline]
pub fn packed_len(count: usize, bit_width: u8) -> usize {
    (count * bit_width as usize).div_ceil(8)
}

/// Packs `values` into a contiguous big-endian bitstream.
pub fn pack(values: &[u8], bit_width: u8) -> Result<Vec<u8>> {
    if bit_width > MAX_BIT_WIDTH {
        return Err(SpriteError::InvalidBitWidth(bit_width));
    }
    let width = bit_width as usize;
    let mut bits = bitvec![u8, Msb0; 0; values.len() * width];

    for (chunk, &value) in bits.chunks_exact_mut(width.max(1)).zip(values) {
        if width < 8 && value >> width != 0 {
            return Err(SpriteError::ValueOutOfRange { value, bit_width });
        }
        for (i, mut bit) in chunk.iter_mut().enumerate() {
            *bit = (value >> (width - 1 - i)) & 1 == 1;
        }
    }

    // A zero-width stream never enters the loop above.
    if width == 0 {
        if let Some(&value) = values.iter().find(|&&v| v != 0) {
            return Err(SpriteError::ValueOutOfRange { value, bit_width });
        }
    }

    Ok(bits.into_vec())
}

/// Unpacks exactly `count` values of `bit_width` bits from `data`.
///
/// Bytes past the packed length are not read. A buffer shorter than the
/// packed length is [`SpriteError::TruncatedData`].
pub fn unpack(data: &[u8], bit_width: u8, count: usize) -> Result<Vec<u8>> {
    if bit_width > MAX_BIT_WIDTH {
        return Err(SpriteError::InvalidBitWidth(bit_width));
    }
    let expected = packed_len(count, bit_width);
    if data.len() < expected {
        return Err(SpriteError::TruncatedData {
            expected,
            actual: data.len(),
        });
    }
    if bit_width == 0 {
        return Ok(vec![0; count]);
    }

    let width = bit_width as usize;
    let bits = &data[..expected].view_bits::<Msb0>()[..count * width];
    Ok(bits
        .chunks_exact(width)
        .map(|chunk| {
            chunk
                .iter()
                .by_vals()
                .fold(0u8, |acc, bit| (acc << 1) | u8::from(bit))
        })
        .collect())
}
