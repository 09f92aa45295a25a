//! Table ids and the decoding strategy each one selects.
//!
//! Ids are stable across versions. The top six ids are sentinels for the
//! built-in strategies; everything below them is a static dictionary slot.

use std::fmt;

/// Maximum length of a decoded name, in bytes.
pub const MAX_LENGTH: usize = 256;

/// Payload is the name itself.
pub const TABLE_UNCOMPRESSED: u8 = 63;
/// Static dictionary whose output is an SCSU stream.
pub const TABLE_SCSU: u8 = 62;
/// Payload is an SCSU stream.
pub const TABLE_SCSU_PLAIN: u8 = 61;
/// Payload is a repeat count and one byte.
pub const TABLE_RLE: u8 = 60;
/// Payload carries its own Huffman table.
pub const TABLE_CUSTOM: u8 = 59;
/// No meaning assigned yet.
pub const TABLE_RESERVED: u8 = 58;

/// Number of static dictionary slots, ids `0..DICTIONARY_SLOTS`.
///
/// Slot [`TABLE_SCSU`] overlaps this range; the other sentinels shadow
/// their slots.
pub const DICTIONARY_SLOTS: usize = 63;

/// Typed table id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Uncompressed,
    Reserved,
    UnicodePlain,
    RunLength,
    Custom,
    /// Static dictionary slot. Includes the SCSU-layered slot 62.
    Dictionary(u8),
    /// Id past the configured set.
    Unknown(u8),
}

impl Table {
    pub fn from_id(id: u8) -> Self {
        match id {
            TABLE_UNCOMPRESSED => Table::Uncompressed,
            TABLE_SCSU_PLAIN => Table::UnicodePlain,
            TABLE_RLE => Table::RunLength,
            TABLE_CUSTOM => Table::Custom,
            TABLE_RESERVED => Table::Reserved,
            id if (id as usize) < DICTIONARY_SLOTS => Table::Dictionary(id),
            id => Table::Unknown(id),
        }
    }

    pub fn id(&self) -> u8 {
        match *self {
            Table::Uncompressed => TABLE_UNCOMPRESSED,
            Table::Reserved => TABLE_RESERVED,
            Table::UnicodePlain => TABLE_SCSU_PLAIN,
            Table::RunLength => TABLE_RLE,
            Table::Custom => TABLE_CUSTOM,
            Table::Dictionary(id) | Table::Unknown(id) => id,
        }
    }
}

impl From<u8> for Table {
    fn from(id: u8) -> Self {
        Table::from_id(id)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Uncompressed => write!(f, "uncompressed"),
            Table::Reserved => write!(f, "reserved"),
            Table::UnicodePlain => write!(f, "scsu"),
            Table::RunLength => write!(f, "rle"),
            Table::Custom => write!(f, "custom"),
            Table::Dictionary(id) => write!(f, "dictionary {}", id),
            Table::Unknown(id) => write!(f, "unknown {}", id),
        }
    }
}
