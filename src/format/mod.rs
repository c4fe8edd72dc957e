// YKCMP_V1 container format.
//
// Encoding and decoding of the framed YKCMP stream: a 0x14-byte header
// followed by a flag-byte token stream.
//
// # Modules
//
// - `tiers`   flag-byte grammar ranges and match-tier constants
// - `header`  container header parse/emit
// - `decoder` token-stream decoding and output reconstruction
// - `encoder` literal/match token emission and header finalization

pub mod decoder;
pub mod encoder;
pub mod header;
pub mod tiers;

// Re-export key types for convenience.
pub use decoder::{DecodeError, DecodeOptions, decode_stream, decompress, decompress_with};
pub use encoder::{EncodeError, compress};
pub use header::{HEADER_LEN, Header, MAGIC};
