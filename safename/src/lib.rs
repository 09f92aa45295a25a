//! safename: decoder for filesystem-safe encoded names.
//!
//! An encoded name is one selector character followed by a base64url
//! payload. The selector picks the strategy used to recover the original
//! bytes: stored as-is, SCSU text, a run of one byte, a Huffman table carried
//! in the payload, or one of the static Huffman dictionaries.
//!
//! # Features
//!
//! - **Bounded**: No strategy produces more than [`MAX_LENGTH`] bytes, and
//!   run-length counts are checked before allocating.
//! - **Forward compatible**: Names from strategies this build does not know
//!   return [`Error::Unsupported`] rather than [`Error::Corrupted`].
//! - **Thread-safe**: One [`Decoder`] serves any number of threads.
//!
//! # Example
//!
//! ```rust
//! let name = safename::decode("_aGVsbG8udHh0").unwrap();
//! assert_eq!(name, "hello.txt");
//!
//! // Run-length: five times 'A'.
//! let name = safename::decode_bytes(60, &[0x05, 0x41]).unwrap();
//! assert_eq!(name, "AAAAA");
//!
//! assert!(safename::decode("6aGVsbG8").unwrap_err().is_unsupported());
//! ```

pub mod decoder;
pub mod dictionary;
pub mod error;
pub mod selector;
pub mod table;
pub mod varint;

// Re-export main types
pub use decoder::Decoder;
pub use dictionary::{Dictionaries, Dictionary};
pub use error::{Error, Result};
pub use table::{Table, DICTIONARY_SLOTS, MAX_LENGTH};

// Codec crates, for building payloads in tests and tools
pub use safename_huff0 as huff0;
pub use safename_scsu as scsu;

use bytes::Bytes;

/// Decodes an encoded name with the process-wide decoder.
pub fn decode(encoded: &str) -> Result<Bytes> {
    Decoder::global().decode(encoded)
}

/// Decodes a raw table id and payload with the process-wide decoder.
pub fn decode_bytes(id: u8, payload: &[u8]) -> Result<Bytes> {
    Decoder::global().decode_bytes(id, payload)
}

/// Builds the static dictionaries and the process-wide decoder now rather
/// than on first use.
pub fn init() {
    Decoder::global();
}
