//! Constants and header layout of the Yay0 container.
//!
//! ```text
//! 0x00  "Yay0"             magic
//! 0x04  decompressed size  u32 BE
//! 0x08  link table offset  u32 BE
//! 0x0C  chunk table offset u32 BE
//! 0x10  mask bitmap        1 bit per operation, MSB first, padded to 4 bytes
//! ```
//!
//! A mask bit of `1` selects a literal byte from the chunk table, `0` selects
//! the next u16 from the link table.

use crate::error::DecodeError;

/// Magic word identifying a Yay0 container (`"Yay0"`).
pub const MAGIC: [u8; 4] = *b"Yay0";

/// Size of the fixed header preceding the mask bitmap.
pub const HEADER_SIZE: usize = 0x10;

/// Shortest back-reference worth encoding.
pub const MIN_LINK_LENGTH: usize = 3;

/// Longest back-reference: 4-bit field exhausted, overflow byte `0xFF` + 16 + 2.
pub const MAX_LINK_LENGTH: usize = 273;

/// Longest back-reference that fits the link's 4-bit length field.
pub const MAX_DIRECT_LENGTH: usize = 17;

/// Maximum look-back distance (12-bit field + 1).
pub const MAX_OFFSET: usize = 4096;

/// Inputs below this size are rejected by the encoder.
pub const MIN_INPUT_SIZE: usize = 64;

/// Largest input whose size fits the header.
pub const MAX_INPUT_SIZE: u64 = u32::MAX as u64;

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub decompressed_size: u32,
    pub link_offset: u32,
    pub chunk_offset: u32,
}

impl Header {
    /// Reads the header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < MAGIC.len() {
            return Err(DecodeError::Truncated);
        }
        if data[..4] != MAGIC {
            return Err(DecodeError::BadMagic);
        }
        if data.len() < HEADER_SIZE {
            return Err(DecodeError::Truncated);
        }

        Ok(Self {
            decompressed_size: read_u32(data, 4),
            link_offset: read_u32(data, 8),
            chunk_offset: read_u32(data, 12),
        })
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0; HEADER_SIZE];
        out[..4].copy_from_slice(&MAGIC);
        out[4..8].copy_from_slice(&self.decompressed_size.to_be_bytes());
        out[8..12].copy_from_slice(&self.link_offset.to_be_bytes());
        out[12..16].copy_from_slice(&self.chunk_offset.to_be_bytes());
        out
    }
}

/// Caller guarantees `pos + 4 <= data.len()`.
#[inline]
fn read_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}
