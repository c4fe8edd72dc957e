// YKCMP container header (0x14 bytes, little-endian integers).
//
// Layout:
//   0x00  8 bytes  magic "YKCMP_V1" (ASCII, no terminator)
//   0x08  u32     reserved (the encoder always writes 4)
//   0x0C  u32     stream_end, absolute end offset of the token stream
//                 measured from byte 0 of the buffer (header included)
//   0x10  u32     uncompressed_size
//
// Header fields are a plain value threaded explicitly through calls;
// nothing format-related lives in process-wide state, so decoding and
// encoding are reentrant.

use super::decoder::DecodeError;

/// Stream magic, first 8 bytes of every YKCMP buffer.
pub const MAGIC: [u8; 8] = *b"YKCMP_V1";

/// Total header length in bytes; the token stream starts here.
pub const HEADER_LEN: usize = 0x14;

/// Value the encoder writes into the reserved field.
pub const RESERVED: u32 = 4;

/// Parsed YKCMP container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Reserved field; observed as 4 in shipped assets, not interpreted.
    pub reserved: u32,
    /// Absolute end offset of the token stream (from byte 0 of the buffer).
    pub stream_end: u32,
    /// Exact length of the decoded payload.
    pub uncompressed_size: u32,
}

#[inline]
fn read_u32_le(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

impl Header {
    /// Parse a header from the start of `input`.
    ///
    /// A buffer that does not begin with the magic is
    /// `DecodeError::UnsupportedFormat`; a buffer with a valid magic but
    /// fewer than `HEADER_LEN` bytes is `DecodeError::TruncatedStream`.
    pub fn parse(input: &[u8]) -> Result<Self, DecodeError> {
        if input.len() < MAGIC.len() || input[..MAGIC.len()] != MAGIC {
            let mut found = [0u8; 8];
            let n = input.len().min(found.len());
            found[..n].copy_from_slice(&input[..n]);
            return Err(DecodeError::UnsupportedFormat { found });
        }
        if input.len() < HEADER_LEN {
            return Err(DecodeError::TruncatedStream {
                offset: input.len(),
                reason: "header incomplete",
            });
        }

        Ok(Self {
            reserved: read_u32_le(input, 0x08),
            stream_end: read_u32_le(input, 0x0C),
            uncompressed_size: read_u32_le(input, 0x10),
        })
    }

    /// Append the header to `out`.
    ///
    /// The encoder emits this with `stream_end = 0` and patches the real
    /// value in once the token stream length is known.
    pub fn emit(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.reserved.to_le_bytes());
        out.extend_from_slice(&self.stream_end.to_le_bytes());
        out.extend_from_slice(&self.uncompressed_size.to_le_bytes());
    }

    /// Patch `stream_end` into an already-emitted buffer.
    pub fn patch_stream_end(buf: &mut [u8], stream_end: u32) {
        buf[0x0C..0x10].copy_from_slice(&stream_end.to_le_bytes());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
