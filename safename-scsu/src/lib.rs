//! SCSU: Standard Compression Scheme for Unicode (UTS #6) decoder.
//!
//! SCSU packs text from small scripts into one byte per character through
//! movable 128-character windows, and falls back to raw UTF-16 for
//! everything else. This crate implements the full decoder: both modes,
//! all window tags, quoting and surrogate pairing.
//!
//! # Example
//!
//! ```rust
//! // SC2 selects the Cyrillic window.
//! let text = safename_scsu::decode(&[0x12, 0x9c, 0xbe, 0xc1, 0xba, 0xb2, 0xb0]).unwrap();
//! assert_eq!(text, "Москва");
//! ```

pub mod decoder;
pub mod error;

pub use decoder::{window_offset, Decoder, DEFAULT_DYNAMIC_WINDOWS, STATIC_WINDOWS};
pub use error::{Error, Result};

/// Decodes a complete SCSU stream into a string.
pub fn decode(input: &[u8]) -> Result<String> {
    Decoder::new(input).decode()
}
