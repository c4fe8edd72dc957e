//! Ykcmp: the `YKCMP_V1` sliding-window codec in Rust.
//!
//! YKCMP is the byte-oriented LZ compressor used for raw pixel payloads
//! inside NLTX texture containers (*The Liar Princess and the Blind
//! Prince*, PS Vita/Switch). The crate provides:
//! - The codec itself (`format`): header, tier constants, decoder, encoder
//! - The greedy three-tier match finder (`matcher`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! Both codec operations are pure in-memory transformations; container
//! parsing, palette handling and image conversion belong to callers.
//!
//! # Quick Start
//!
//! ```
//! let payload = b"AAAAAAAAribbit ribbit ribbit";
//! let packed = ykcmp::compress(payload).unwrap();
//! let unpacked = ykcmp::decompress(&packed).unwrap();
//! assert_eq!(unpacked, payload);
//! ```

pub mod format;
pub mod io;
pub mod matcher;

#[cfg(feature = "cli")]
pub mod cli;

pub use format::decoder::{DecodeError, DecodeOptions, decompress, decompress_with};
pub use format::encoder::{EncodeError, compress};
