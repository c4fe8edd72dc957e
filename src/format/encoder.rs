// YKCMP token emission and header finalization.
//
// The encoder walks the input with the greedy matcher, accumulating
// unmatched bytes into a pending literal run that is flushed at the
// 127-byte cap or immediately before any match token. The header is
// emitted first with a zero `stream_end`, then patched once the token
// stream length is known.

use thiserror::Error;

use super::header::{HEADER_LEN, Header, RESERVED};
use super::tiers::{LONG, MAX_LITERAL_RUN, MEDIUM, SHORT};
use crate::matcher::{self, Match};

// ---------------------------------------------------------------------------
// Encoder error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The header stores sizes as u32; larger payloads cannot be framed.
    #[error("input too large: {0} bytes exceed the u32 header fields")]
    InputTooLarge(usize),
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Compress `input` into a framed YKCMP buffer.
///
/// `decompress(compress(x)?) == x` for every input. The parse is local
/// greedy: the best gain at each position, no backtracking.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if input.len() > u32::MAX as usize {
        return Err(EncodeError::InputTooLarge(input.len()));
    }

    // Worst case: all literals, one flag byte per 127 input bytes.
    let mut out = Vec::with_capacity(HEADER_LEN + input.len() + input.len() / MAX_LITERAL_RUN + 1);
    Header {
        reserved: RESERVED,
        stream_end: 0,
        uncompressed_size: input.len() as u32,
    }
    .emit(&mut out);

    let mut pos = 0;
    let mut run_start = 0; // first input byte of the pending literal run

    while pos < input.len() {
        match matcher::find_match(input, pos) {
            Some(m) => {
                flush_literals(&mut out, &input[run_start..pos]);
                emit_match(&mut out, m);
                pos += m.length;
                run_start = pos;
            }
            None => {
                if pos - run_start == MAX_LITERAL_RUN {
                    flush_literals(&mut out, &input[run_start..pos]);
                    run_start = pos;
                }
                pos += 1;
            }
        }
    }
    flush_literals(&mut out, &input[run_start..]);

    let stream_end =
        u32::try_from(out.len()).map_err(|_| EncodeError::InputTooLarge(input.len()))?;
    Header::patch_stream_end(&mut out, stream_end);
    Ok(out)
}

/// Emit a pending literal run (no-op when empty).
fn flush_literals(out: &mut Vec<u8>, run: &[u8]) {
    debug_assert!(run.len() <= MAX_LITERAL_RUN);
    if run.is_empty() {
        return;
    }
    out.push(run.len() as u8);
    out.extend_from_slice(run);
}

/// Emit a match token in the narrowest tier that admits it.
///
/// The matcher's gain rule guarantees the winning candidate is not
/// expressible in any narrower tier than the one it was selected under,
/// so narrowest-admitting here reproduces the selection exactly.
fn emit_match(out: &mut Vec<u8>, m: Match) {
    let Match { length, distance } = m;
    debug_assert!(length >= 1 && distance >= 1);

    if length <= SHORT.max_len && distance <= SHORT.max_distance {
        out.push(((length << 4) + 0x70 + (distance - 1)) as u8);
    } else if length <= MEDIUM.max_len && distance <= MEDIUM.max_distance {
        out.push((0xC0 + length - 2) as u8);
        out.push((distance - 1) as u8);
    } else {
        debug_assert!(LONG.admits(length, distance));
        let biased = length + 0xE00 - 3;
        out.push((biased >> 4) as u8);
        out.push(((biased & 0x0F) << 4 | (distance - 1) >> 8) as u8);
        out.push(((distance - 1) & 0xFF) as u8);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::decoder::decompress;

    fn tokens(buf: &[u8]) -> &[u8] {
        &buf[HEADER_LEN..]
    }

    #[test]
    fn short_match_token_layout() {
        let mut out = Vec::new();
        emit_match(
            &mut out,
            Match {
                length: 1,
                distance: 1,
            },
        );
        assert_eq!(out, [0x80]);

        out.clear();
        emit_match(
            &mut out,
            Match {
                length: 4,
                distance: 16,
            },
        );
        assert_eq!(out, [0xBF]);
    }

    #[test]
    fn medium_match_token_layout() {
        let mut out = Vec::new();
        emit_match(
            &mut out,
            Match {
                length: 2,
                distance: 17,
            },
        );
        assert_eq!(out, [0xC0, 0x10]);

        out.clear();
        emit_match(
            &mut out,
            Match {
                length: 33,
                distance: 256,
            },
        );
        assert_eq!(out, [0xDF, 0xFF]);
    }

    #[test]
    fn long_match_token_layout() {
        let mut out = Vec::new();
        emit_match(
            &mut out,
            Match {
                length: 34,
                distance: 257,
            },
        );
        // biased length = 34 + 0xE00 - 3 = 0xE1F; distance - 1 = 0x100.
        assert_eq!(out, [0xE1, 0xF1, 0x00]);

        out.clear();
        emit_match(
            &mut out,
            Match {
                length: 514,
                distance: 514,
            },
        );
        // biased length = 0xFFF; distance - 1 = 0x201.
        assert_eq!(out, [0xFF, 0xF2, 0x01]);
    }

    #[test]
    fn narrower_tier_preferred_when_it_admits() {
        let mut out = Vec::new();
        emit_match(
            &mut out,
            Match {
                length: 4,
                distance: 16,
            },
        );
        assert_eq!(out.len(), 1);

        out.clear();
        emit_match(
            &mut out,
            Match {
                length: 4,
                distance: 17,
            },
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn empty_input_is_header_only() {
        let buf = compress(b"").unwrap();
        assert_eq!(buf.len(), HEADER_LEN);
        let hdr = Header::parse(&buf).unwrap();
        assert_eq!(hdr.stream_end as usize, HEADER_LEN);
        assert_eq!(hdr.uncompressed_size, 0);
        assert_eq!(hdr.reserved, RESERVED);
    }

    #[test]
    fn literal_runs_flush_at_cap() {
        // 128 distinct bytes: no matches anywhere, so the encoder must
        // split the literals into a 127-run and a 1-run.
        let input: Vec<u8> = (0u8..128).collect();
        let buf = compress(&input).unwrap();
        let toks = tokens(&buf);
        assert_eq!(toks[0], 0x7F);
        assert_eq!(&toks[1..128], &input[..127]);
        assert_eq!(toks[128], 0x01);
        assert_eq!(toks[129], 127);
        assert_eq!(toks.len(), 130);
    }

    #[test]
    fn exact_cap_literal_run_uses_one_flag() {
        let input: Vec<u8> = (0u8..127).collect();
        let buf = compress(&input).unwrap();
        let toks = tokens(&buf);
        assert_eq!(toks[0], 0x7F);
        assert_eq!(toks.len(), 128);
    }

    #[test]
    fn literals_flush_before_match_token() {
        // "xyz" then an 8-byte repeat of "xyz": literal run, then one
        // overlapping match token.
        let input = b"xyzxyzxyzxy";
        let buf = compress(input).unwrap();
        let toks = tokens(&buf);
        assert_eq!(&toks[..4], &[0x03, b'x', b'y', b'z']);
        assert_eq!(decompress(&buf).unwrap(), input);
    }

    #[test]
    fn stream_end_matches_buffer_length() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let buf = compress(input).unwrap();
        let hdr = Header::parse(&buf).unwrap();
        assert_eq!(hdr.stream_end as usize, buf.len());
        assert_eq!(hdr.uncompressed_size as usize, input.len());
    }

    #[test]
    fn self_overlap_roundtrip() {
        let input = b"AAAAAAAA";
        let buf = compress(input).unwrap();
        assert_eq!(decompress(&buf).unwrap(), input);
        // One literal plus one match token: the run is encoded as a
        // distance-1 copy longer than its distance.
        assert!(buf.len() < HEADER_LEN + input.len());
    }
}
