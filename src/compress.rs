use alloc::vec::Vec;
use core::fmt;

use crate::error::EncodeError;
use crate::format::{HEADER_SIZE, Header, MAX_INPUT_SIZE, MIN_INPUT_SIZE};
use crate::operation::{Link, Operation};
use crate::optimize::plan;

/// Value of the mask cursor before any bit of the current byte is written.
const FIRST_MASK_BIT: u8 = 1 << 7;

/// Accumulates operations into the three Yay0 streams.
///
/// Each operation takes one mask bit (MSB first, `1` = literal). Literals and
/// length overflow bytes share the chunk table, in the order the decoder
/// consumes them.
pub struct Packer {
    decompressed_size: usize,
    masks: Vec<u8>,
    links: Vec<u16>,
    chunks: Vec<u8>,
    mask: u8,
    mask_bit: u8,
}

impl Packer {
    /// Creates a packer sized for the worst case of one operation per byte.
    #[must_use]
    pub fn new(decompressed_size: usize) -> Self {
        Self {
            decompressed_size,
            masks: Vec::with_capacity(decompressed_size.div_ceil(8)),
            links: Vec::with_capacity(decompressed_size / 3),
            chunks: Vec::with_capacity(decompressed_size),
            mask: 0,
            mask_bit: FIRST_MASK_BIT,
        }
    }

    pub fn push(&mut self, op: Operation) {
        match op {
            Operation::Copy(byte) => self.push_copy(byte),
            Operation::Link(link) => self.push_link(link),
        }
    }

    fn push_copy(&mut self, byte: u8) {
        self.chunks.push(byte);
        self.mask |= self.mask_bit;
        self.advance_mask();
    }

    /// Link = `((length - 2) << 12) | (distance - 1)`. Lengths over 17 leave the
    /// top nibble zero and store `length - 18` in the chunk table instead.
    fn push_link(&mut self, link: Link) {
        let length = (link.length() - 2) as u16;
        let distance = (link.distance() - 1) as u16;

        let value = if link.is_long() {
            self.chunks.push((length - 16) as u8);
            distance
        } else {
            (length << 12) | distance
        };

        self.links.push(value);
        self.advance_mask();
    }

    fn advance_mask(&mut self) {
        self.mask_bit >>= 1;
        if self.mask_bit == 0 {
            self.masks.push(self.mask);
            self.mask = 0;
            self.mask_bit = FIRST_MASK_BIT;
        }
    }

    /// Flushes the partial mask byte and assembles the container.
    ///
    /// # Panics
    ///
    /// Panics if the decompressed size or a table offset does not fit the
    /// header's u32 fields. [`encode`] rejects such inputs beforehand.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.mask_bit != FIRST_MASK_BIT {
            self.masks.push(self.mask);
        }
        tracing::trace!("packed streams\n{}", self);

        let link_offset = (HEADER_SIZE + self.masks.len()).next_multiple_of(4);
        let chunk_offset = link_offset + 2 * self.links.len();
        let total = (chunk_offset + self.chunks.len()).next_multiple_of(2);

        let header = Header {
            decompressed_size: header_field(self.decompressed_size),
            link_offset: header_field(link_offset),
            chunk_offset: header_field(chunk_offset),
        };

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&self.masks);
        out.resize(link_offset, 0);
        for link in &self.links {
            out.extend_from_slice(&link.to_be_bytes());
        }
        out.extend_from_slice(&self.chunks);
        out.resize(total, 0);
        out
    }
}

fn header_field(value: usize) -> u32 {
    u32::try_from(value).expect("container exceeds the 4 GiB header limit")
}

/// Inputs must fit the header's u32 size field.
#[inline]
const fn check_size(len: usize) -> Result<(), EncodeError> {
    if len < MIN_INPUT_SIZE {
        return Err(EncodeError::TooSmall { len });
    }
    if len as u64 > MAX_INPUT_SIZE {
        return Err(EncodeError::TooLarge { len });
    }
    Ok(())
}

impl fmt::Display for Packer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " Mask Buffer:")?;
        for group in self.masks.chunks(4) {
            write!(f, " ")?;
            for byte in group {
                write!(f, "{byte:02X}")?;
            }
        }
        writeln!(f)?;

        write!(f, " Link Buffer:")?;
        for group in self.links.chunks(2) {
            write!(f, " ")?;
            for link in group {
                write!(f, "{link:04X}")?;
            }
        }
        writeln!(f)?;

        write!(f, "Chunk Buffer:")?;
        for group in self.chunks.chunks(4) {
            write!(f, " ")?;
            for byte in group {
                write!(f, "{byte:02X}")?;
            }
        }
        writeln!(f)
    }
}

/// Serializes a finished operation list into a Yay0 container.
#[must_use]
pub fn pack(ops: &[Operation], decompressed_size: usize) -> Vec<u8> {
    let mut packer = Packer::new(decompressed_size);
    for &op in ops {
        packer.push(op);
    }
    packer.finish()
}

/// Compresses `source` into a Yay0 container.
///
/// Inputs shorter than 64 bytes, or too large for the header's u32 size
/// field, are rejected.
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn encode(source: &[u8]) -> Result<Vec<u8>, EncodeError> {
    check_size(source.len())?;

    let ops = plan(source);
    let out = pack(&ops, source.len());
    tracing::debug!(ops = ops.len(), packed = out.len(), "encoded");
    Ok(out)
}
