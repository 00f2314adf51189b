//! Whole-file helpers for asset pipelines.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::error::{DecodeError, EncodeError};

#[derive(Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Reads and decodes a Yay0 file.
pub fn read_compressed(path: impl AsRef<Path>) -> Result<Vec<u8>, FileError> {
    let data = fs::read(path)?;
    Ok(crate::decode(&data)?)
}

/// Compresses the file at `src` into a Yay0 container written to `dst`.
#[tracing::instrument(skip_all, fields(src = %src.as_ref().display()))]
pub fn compress_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<(), FileError> {
    let source = fs::read(src.as_ref())?;
    let packed = crate::encode(&source)?;
    fs::write(dst.as_ref(), &packed)?;
    tracing::info!(dst = %dst.as_ref().display(), "{} -> {} bytes", source.len(), packed.len());
    Ok(())
}

/// Decompresses the Yay0 file at `src` and writes the raw bytes to `dst`.
#[tracing::instrument(skip_all, fields(src = %src.as_ref().display()))]
pub fn decompress_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<(), FileError> {
    let decoded = read_compressed(src.as_ref())?;
    fs::write(dst.as_ref(), &decoded)?;
    tracing::info!(dst = %dst.as_ref().display(), "{} bytes", decoded.len());
    Ok(())
}
