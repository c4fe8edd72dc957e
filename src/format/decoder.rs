// YKCMP token-stream decoder.
//
// Parses the 0x14-byte container header, then replays tokens until the
// token stream or the output budget runs out. Match copies advance the
// read and write cursors together, one byte at a time, so a match whose
// distance is smaller than its length reproduces a cyclic repeat; a bulk
// block copy would read output bytes that have not been written yet.

use thiserror::Error;

use super::header::{HEADER_LEN, Header};
use super::tiers::{LONG_FLAG_BASE, MATCH_FLAG_BASE, MEDIUM_FLAG_BASE};

// ---------------------------------------------------------------------------
// Decoder error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input does not begin with the `YKCMP_V1` magic.
    #[error("unsupported format: first bytes {found:02X?} are not the YKCMP_V1 magic")]
    UnsupportedFormat { found: [u8; 8] },

    /// The token stream ended before the output buffer was filled.
    #[error("truncated stream at input offset {offset}: {reason}")]
    TruncatedStream { offset: usize, reason: &'static str },

    /// A match token reads from before the start of the output.
    #[error("match distance {distance} reaches before output start at position {position}")]
    InvalidDistance { distance: usize, position: usize },
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Decoding options.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Return inputs without the YKCMP magic unchanged instead of failing.
    ///
    /// Some shipped assets store payloads uncompressed; passthrough lets
    /// callers feed both kinds through one path. Off by default; a magic
    /// mismatch is normally `DecodeError::UnsupportedFormat`.
    pub passthrough: bool,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decompress a YKCMP buffer (header plus token stream).
pub fn decompress(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decompress_with(input, &DecodeOptions::default())
}

/// Decompress with explicit options.
pub fn decompress_with(input: &[u8], opts: &DecodeOptions) -> Result<Vec<u8>, DecodeError> {
    let header = match Header::parse(input) {
        Err(DecodeError::UnsupportedFormat { .. }) if opts.passthrough => {
            return Ok(input.to_vec());
        }
        other => other?,
    };
    decode_stream(input, &header)
}

/// Decode the token stream described by an already-parsed header.
///
/// `input` is the whole buffer the header was parsed from; the token
/// stream occupies `HEADER_LEN..header.stream_end`.
pub fn decode_stream(input: &[u8], header: &Header) -> Result<Vec<u8>, DecodeError> {
    let stream_end = header.stream_end as usize;
    let out_len = header.uncompressed_size as usize;

    if stream_end > input.len() {
        return Err(DecodeError::TruncatedStream {
            offset: input.len(),
            reason: "stream end lies past the input buffer",
        });
    }

    let mut out: Vec<u8> = Vec::with_capacity(out_len);
    let mut pos = HEADER_LEN;

    // Two cursors, two budgets: stop at whichever runs out first.
    while pos < stream_end && out.len() < out_len {
        let flag = input[pos];
        pos += 1;

        if flag < MATCH_FLAG_BASE {
            // Literal run: `flag` raw bytes follow.
            let run = flag as usize;
            if pos + run > stream_end {
                return Err(DecodeError::TruncatedStream {
                    offset: pos,
                    reason: "literal run extends past stream end",
                });
            }
            let take = run.min(out_len - out.len());
            out.extend_from_slice(&input[pos..pos + take]);
            pos += run;
            continue;
        }

        let (length, distance) = if flag < MEDIUM_FLAG_BASE {
            // Short: length and distance packed into the flag nibbles.
            let length = (flag >> 4) as usize - 0x08 + 1;
            let distance = (flag & 0x0F) as usize + 1;
            (length, distance)
        } else if flag < LONG_FLAG_BASE {
            // Medium: the operand byte carries the distance.
            if pos + 1 > stream_end {
                return Err(DecodeError::TruncatedStream {
                    offset: pos,
                    reason: "match operand extends past stream end",
                });
            }
            let b1 = input[pos] as usize;
            pos += 1;
            (flag as usize - 0xC0 + 2, b1 + 1)
        } else {
            // Long: twelve-bit length and distance split across two
            // operand bytes.
            if pos + 2 > stream_end {
                return Err(DecodeError::TruncatedStream {
                    offset: pos,
                    reason: "match operand extends past stream end",
                });
            }
            let b1 = input[pos] as usize;
            let b2 = input[pos + 1] as usize;
            pos += 2;
            let length = ((flag as usize) << 4 | b1 >> 4) - 0xE00 + 3;
            let distance = ((b1 & 0x0F) << 8 | b2) + 1;
            (length, distance)
        };

        if distance > out.len() {
            return Err(DecodeError::InvalidDistance {
                distance,
                position: out.len(),
            });
        }

        // Byte-wise copy; the source window slides over bytes this same
        // match has just produced when distance < length.
        for _ in 0..length {
            if out.len() == out_len {
                break;
            }
            let byte = out[out.len() - distance];
            out.push(byte);
        }
    }

    if out.len() < out_len {
        return Err(DecodeError::TruncatedStream {
            offset: pos,
            reason: "token stream exhausted before output complete",
        });
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
