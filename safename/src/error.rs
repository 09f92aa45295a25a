//! Error types for name decoding.
//!
//! Only two outcomes are reported. Codec-level detail (bad Huffman table,
//! truncated SCSU stream, varint overflow) is logged and then folded into
//! [`Error::Corrupted`].

use thiserror::Error;

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding an encoded name.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input is malformed for the strategy it claims.
    ///
    /// Retrying will not help: the selector is unknown, the base64 payload
    /// is invalid, or the payload failed to decode.
    #[error("file name corrupt")]
    Corrupted,

    /// The input names a strategy this build does not implement.
    ///
    /// The name may have been produced by a newer encoder.
    #[error("file name possibly generated by a newer encoder version")]
    Unsupported,
}

impl Error {
    /// Returns true if the input is malformed.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Error::Corrupted)
    }

    /// Returns true if the input may be valid for a newer encoder.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported)
    }
}
