//! huff0: single-stream Huffman coding in the Zstandard literals format.
//!
//! This crate reads and writes the Huffman table descriptions and bitstreams
//! used by Zstandard literal blocks, restricted to the single-stream (1X)
//! layout.
//!
//! # Features
//!
//! - **Wire compatible**: Tables in both direct (4-bit weight) and
//!   FSE-compressed form are accepted, so streams produced by `zstd` decode
//!   unchanged.
//! - **Strict**: Truncated tables, incomplete codes, overruns and missing
//!   end markers are all reported as errors.
//! - **Bounded**: Every decode carries an output limit.
//!
//! # Example
//!
//! ```rust
//! use safename_huff0::{Scratch, Table};
//!
//! let sample = b"holiday-photos-2019";
//! let table = Table::from_sample(sample).unwrap();
//!
//! // Table description followed by the stream.
//! let mut payload = Vec::new();
//! table.write(&mut payload).unwrap();
//! payload.extend(table.encoder().compress_1x(sample).unwrap());
//!
//! let mut scratch = Scratch::new();
//! let stream = scratch.read_table(&payload).unwrap();
//! assert_eq!(scratch.decompress_1x(stream).unwrap(), sample);
//! ```

pub mod bits;
pub mod decoder;
pub mod encoder;
pub mod error;
mod fse;
mod lengths;
pub mod table;

// Re-export main types
pub use decoder::{Decoder, Scratch, DEFAULT_MAX_DECODED_SIZE};
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use table::{Table, MAX_SYMBOLS, TABLE_LOG_MAX};
