//! Unsigned LEB128 varints, as used for run-length counts.
//!
//! Seven bits per byte, least significant group first, high bit set on
//! every byte but the last. At most ten bytes encode a `u64`.

use thiserror::Error;

/// Longest encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Varint decoding errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// Input ended while the continuation bit was still set.
    #[error("varint truncated")]
    Truncated,

    /// Value does not fit in 64 bits.
    #[error("varint overflows u64")]
    Overflow,
}

/// Decodes a varint from the start of `data`.
///
/// Returns the value and the number of bytes it occupied. Bytes after the
/// varint are ignored.
pub fn decode(data: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut value = 0u64;
    let mut shift = 0u32;

    for (i, &byte) in data.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return Err(VarintError::Overflow);
        }
        if byte < 0x80 {
            // The tenth byte carries only the top bit of a u64.
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(VarintError::Overflow);
            }
            return Ok((value | (byte as u64) << shift, i + 1));
        }
        value |= ((byte & 0x7f) as u64) << shift;
        shift += 7;
    }

    Err(VarintError::Truncated)
}

/// Appends the varint encoding of `value` to `dst`.
pub fn encode(mut value: u64, dst: &mut Vec<u8>) {
    while value >= 0x80 {
        dst.push(value as u8 | 0x80);
        value >>= 7;
    }
    dst.push(value as u8);
}
