use core::fmt;

use crate::format::{MAX_DIRECT_LENGTH, MAX_LINK_LENGTH, MAX_OFFSET, MIN_LINK_LENGTH};

/// A back-reference copying `length` bytes from `distance` bytes behind the
/// current output position. The source range may overlap the bytes being written.
///
/// Only constructible through [`Link::new`], so `length` is always in `3..=273`
/// and `distance` in `1..=4096`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    length: u16,
    distance: u16,
}

impl Link {
    /// Returns `None` if `length` is outside `3..=273` or `distance` outside `1..=4096`.
    #[must_use]
    pub fn new(length: usize, distance: usize) -> Option<Self> {
        if !(MIN_LINK_LENGTH..=MAX_LINK_LENGTH).contains(&length) {
            return None;
        }
        if !(1..=MAX_OFFSET).contains(&distance) {
            return None;
        }
        Some(Self {
            length: length as u16,
            distance: distance as u16,
        })
    }

    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length as usize
    }

    #[inline]
    #[must_use]
    pub const fn distance(&self) -> usize {
        self.distance as usize
    }

    /// Whether the length needs an overflow byte in the chunk table.
    #[inline]
    #[must_use]
    pub const fn is_long(&self) -> bool {
        self.length as usize > MAX_DIRECT_LENGTH
    }
}

/// One encode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A literal byte.
    Copy(u8),
    /// A back-reference into already produced output.
    Link(Link),
}

impl Operation {
    #[inline]
    #[must_use]
    pub const fn copy(byte: u8) -> Self {
        Self::Copy(byte)
    }

    #[inline]
    #[must_use]
    pub fn link(length: usize, distance: usize) -> Option<Self> {
        Link::new(length, distance).map(Self::Link)
    }

    /// Number of output bytes this operation produces.
    #[inline]
    #[must_use]
    pub const fn decoded_len(&self) -> usize {
        match self {
            Self::Copy(_) => 1,
            Self::Link(link) => link.length as usize,
        }
    }

    /// Number of container bytes this operation costs, mask bit excluded.
    #[inline]
    #[must_use]
    pub const fn cost(&self) -> usize {
        match self {
            Self::Copy(_) => 1,
            Self::Link(link) if link.is_long() => 3,
            Self::Link(_) => 2,
        }
    }
}

impl From<Link> for Operation {
    fn from(link: Link) -> Self {
        Self::Link(link)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy(byte) => write!(f, "C:{byte:02X}"),
            Self::Link(link) => write!(f, "L:{}@{}", link.length, link.distance),
        }
    }
}
