//! SCSU decoding errors.

use thiserror::Error;

/// Result type for SCSU operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding an SCSU stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The stream ended inside a tag or a UTF-16 unit.
    #[error("unexpected end of input at offset {0}")]
    Truncated(usize),

    /// A reserved tag byte was found.
    #[error("reserved tag {tag:#04x} at offset {offset}")]
    ReservedTag { tag: u8, offset: usize },

    /// A window definition used a reserved offset index.
    #[error("reserved window offset index {index:#04x} at offset {offset}")]
    ReservedWindow { index: u8, offset: usize },

    /// A surrogate code unit was not part of a valid pair.
    #[error("unpaired surrogate {unit:#06x} at offset {offset}")]
    UnpairedSurrogate { unit: u16, offset: usize },

    /// A window produced a value that is not a Unicode scalar value.
    #[error("invalid code point {code:#x} at offset {offset}")]
    InvalidCodePoint { code: u32, offset: usize },
}

impl Error {
    /// Byte offset in the input where decoding stopped.
    pub fn offset(&self) -> usize {
        match *self {
            Error::Truncated(offset)
            | Error::ReservedTag { offset, .. }
            | Error::ReservedWindow { offset, .. }
            | Error::UnpairedSurrogate { offset, .. }
            | Error::InvalidCodePoint { offset, .. } => offset,
        }
    }
}
