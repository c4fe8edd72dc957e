// File-level helpers for packing and unpacking YKCMP payloads.
//
// The codec is a whole-buffer transformation, so both helpers read the
// input file fully into memory, run the codec, and write the result.
// When the `file-io` feature is enabled, SHA-256 digests of both sides
// are included in the returned stats.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::format::decoder::{DecodeError, DecodeOptions, decompress_with};
use crate::format::encoder::{EncodeError, compress};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `compress_file()`.
#[derive(Debug, Clone)]
pub struct CompressStats {
    /// Raw payload size in bytes.
    pub input_size: u64,
    /// Framed YKCMP output size in bytes (header included).
    pub output_size: u64,
    /// SHA-256 of the raw payload (if the `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
    /// SHA-256 of the framed output (if the `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

/// Statistics returned by `decompress_file()`.
#[derive(Debug, Clone)]
pub struct DecompressStats {
    /// Framed YKCMP input size in bytes.
    pub input_size: u64,
    /// Reconstructed payload size in bytes.
    pub output_size: u64,
    /// SHA-256 of the reconstructed payload (if `file-io` is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

impl CompressStats {
    /// Output bytes per input byte; 1.0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            1.0
        } else {
            self.output_size as f64 / self.input_size as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Compression error.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    /// Decompression error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

// ---------------------------------------------------------------------------
// Digests
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
fn digest(data: &[u8]) -> Option<[u8; 32]> {
    use sha2::{Digest, Sha256};
    Some(Sha256::digest(data).into())
}

#[cfg(not(feature = "file-io"))]
fn digest(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

// ---------------------------------------------------------------------------
// compress_file / decompress_file
// ---------------------------------------------------------------------------

/// Compress a raw payload file into a framed YKCMP file.
pub fn compress_file(input_path: &Path, output_path: &Path) -> Result<CompressStats, IoError> {
    let input = fs::read(input_path)?;
    debug!(
        "compressing {} ({} bytes)",
        input_path.display(),
        input.len()
    );

    let output = compress(&input)?;
    fs::write(output_path, &output)?;

    info!(
        "packed {} -> {} ({} -> {} bytes)",
        input_path.display(),
        output_path.display(),
        input.len(),
        output.len()
    );

    Ok(CompressStats {
        input_size: input.len() as u64,
        output_size: output.len() as u64,
        input_sha256: digest(&input),
        output_sha256: digest(&output),
    })
}

/// Decompress a framed YKCMP file back into the raw payload.
pub fn decompress_file(
    input_path: &Path,
    output_path: &Path,
    opts: &DecodeOptions,
) -> Result<DecompressStats, IoError> {
    let input = fs::read(input_path)?;
    debug!(
        "decompressing {} ({} bytes)",
        input_path.display(),
        input.len()
    );

    let output = decompress_with(&input, opts)?;
    fs::write(output_path, &output)?;

    info!(
        "unpacked {} -> {} ({} -> {} bytes)",
        input_path.display(),
        output_path.display(),
        input.len(),
        output.len()
    );

    Ok(DecompressStats {
        input_size: input.len() as u64,
        output_size: output.len() as u64,
        output_sha256: digest(&output),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
