use crate::error::DecodeError;
use crate::format::{HEADER_SIZE, Header, MAX_LINK_LENGTH};
use alloc::vec::Vec;

type Result<T> = core::result::Result<T, DecodeError>;

/// Length field value signalling that the length is stored in the chunk table.
const OVERFLOW_LENGTH: u16 = 0;

/// Number of mask bits per command byte.
const MASK_BITS: u32 = 8;

/// Bounds-checked read position inside the container.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    #[inline]
    fn u8(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.pos).ok_or(DecodeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn u16(&mut self) -> Result<u16> {
        let bytes = self
            .data
            .get(self.pos..)
            .and_then(|rest| rest.get(..2))
            .ok_or(DecodeError::Truncated)?;
        self.pos += 2;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}

/// Decompresses a Yay0 container into a new vector.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decode_into(data, &mut output)?;
    Ok(output)
}

/// Decompresses a Yay0 container, appending to `output`.
///
/// Links never reach into bytes that were in `output` before the call. On
/// error, `output` may hold a partially decoded prefix.
#[tracing::instrument(skip_all, fields(len = data.len()))]
pub fn decode_into(data: &[u8], output: &mut Vec<u8>) -> Result<()> {
    let header = Header::parse(data)?;
    let size = header.decompressed_size as usize;
    tracing::debug!(?header, "decoding");

    // A corrupt header may claim any size; every mask bit expands to at most
    // MAX_LINK_LENGTH bytes.
    let max_expansion = data.len().saturating_mul(8 * MAX_LINK_LENGTH);
    output.reserve(size.min(max_expansion));

    let start = output.len();
    let end = start.saturating_add(size);

    let mut masks = Cursor::new(data, HEADER_SIZE);
    let mut links = Cursor::new(data, header.link_offset as usize);
    let mut chunks = Cursor::new(data, header.chunk_offset as usize);

    let mut command = 0u8;
    let mut remaining_bits = 0;

    while output.len() < end {
        if remaining_bits == 0 {
            command = masks.u8()?;
            remaining_bits = MASK_BITS;
        }

        if command & 0x80 != 0 {
            output.push(chunks.u8()?);
        } else {
            let link = links.u16()?;
            let distance = (link & 0x0FFF) as usize + 1;
            let length = match link >> 12 {
                OVERFLOW_LENGTH => chunks.u8()? as usize + 16,
                field => field as usize,
            } + 2;

            if distance > output.len() - start {
                return Err(DecodeError::InvalidOffset);
            }
            if length > end - output.len() {
                return Err(DecodeError::Overrun);
            }
            apply_link(output, length, distance);
        }

        command <<= 1;
        remaining_bits -= 1;
    }

    Ok(())
}

/// Copies `length` bytes from `distance` back, one at a time so the source may
/// overlap the bytes being written. Caller checks `distance <= output.len()`.
#[inline]
fn apply_link(output: &mut Vec<u8>, length: usize, distance: usize) {
    if distance == 1 {
        let last = output[output.len() - 1];
        output.resize(output.len() + length, last);
    } else {
        let src = output.len() - distance;
        for k in 0..length {
            let byte = output[src + k];
            output.push(byte);
        }
    }
}
