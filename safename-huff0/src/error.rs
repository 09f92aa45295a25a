//! Error types for huff0 table and stream operations.
//!
//! Every variant describes a malformed or unsupported input. Callers that
//! only care about "valid or not" can treat all of them alike; the detail is
//! kept for diagnostics.

use thiserror::Error;

/// Result type for huff0 operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading tables or coding streams.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input was empty where at least one byte is required.
    #[error("empty input")]
    EmptyInput,

    /// The table description claims more bytes than were supplied.
    #[error("table description truncated: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    /// A symbol weight is larger than the maximum table log allows.
    #[error("weight {0} exceeds maximum table log")]
    WeightTooLarge(u8),

    /// The weights do not describe a complete prefix code.
    #[error("invalid table: {0}")]
    InvalidTable(&'static str),

    /// The FSE-compressed weight block is malformed.
    #[error("fse weights: {0}")]
    Fse(&'static str),

    /// The last byte of a bitstream does not carry the end marker.
    #[error("missing end-of-stream marker")]
    MissingMarker,

    /// A code ran past the start of the bitstream.
    #[error("bitstream overrun")]
    Overrun,

    /// Decoding produced more bytes than the configured limit.
    #[error("decoded size exceeds limit of {0} bytes")]
    SizeLimit(usize),

    /// The table has more explicit weights than the direct representation holds.
    #[error("too many symbols for direct weight representation: {0}")]
    TooManySymbols(usize),

    /// A histogram or weight list describes fewer than two symbols.
    #[error("table needs at least two symbols")]
    SingleSymbol,

    /// The input contains a symbol the table cannot encode.
    #[error("symbol {0:#04x} is not present in table")]
    UnknownSymbol(u8),
}

impl Error {
    /// Returns true if the error was caused by the size guard rather than
    /// by malformed data.
    pub fn is_size_limit(&self) -> bool {
        matches!(self, Error::SizeLimit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit_flag() {
        assert!(Error::SizeLimit(256).is_size_limit());
        assert!(!Error::Overrun.is_size_limit());
    }

    #[test]
    fn test_display() {
        let err = Error::Truncated { need: 5, have: 2 };
        assert_eq!(
            err.to_string(),
            "table description truncated: need 5 bytes, have 2"
        );
        assert_eq!(
            Error::UnknownSymbol(0x7f).to_string(),
            "symbol 0x7f is not present in table"
        );
    }
}
