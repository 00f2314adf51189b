//! # Yay0 Compression
//!
//! `yay0` is a safe, pure-Rust implementation of the Yay0 format, an LZSS
//! variant used to pack N64-era game assets.
//!
//! A container holds a 16-byte header followed by three streams: a mask bitmap
//! selecting literal or back-reference per operation, a table of packed u16
//! links, and a table of literal bytes and length overflow bytes.
//!
//! ## Example
//!
//! ```rust
//! let original = b"Yay0 packs repeated bytes. Yay0 packs repeated bytes. Yay0!!!!!!!!!";
//!
//! let packed = yay0::encode(original).expect("input is at least 64 bytes");
//! assert_eq!(&packed[..4], b"Yay0");
//!
//! let unpacked = yay0::decode(&packed).expect("Decompression failed");
//! assert_eq!(unpacked, original);
//! ```
//!
//! Only round-trip correctness is guaranteed. The encoder is a greedy matcher
//! with a local re-optimization step; its output is deterministic but not
//! byte-identical to other Yay0 encoders.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod compress;
pub mod decompress;
pub mod error;
pub mod format;
#[cfg(feature = "std")]
pub mod fs;
pub mod matcher;
pub mod operation;
pub mod optimize;

pub use compress::{Packer, encode, pack};
pub use decompress::{decode, decode_into};
pub use error::{DecodeError, EncodeError};
pub use format::{
    Header, MAGIC, MAX_INPUT_SIZE, MAX_LINK_LENGTH, MAX_OFFSET, MIN_INPUT_SIZE, MIN_LINK_LENGTH,
};
pub use matcher::find_match;
pub use operation::{Link, Operation};
pub use optimize::{Step, plan, step};
