use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Input of {len} bytes is too small to compress")]
    TooSmall { len: usize },

    #[error("Input of {len} bytes does not fit a Yay0 header")]
    TooLarge { len: usize },
}

/// Reasons a container cannot be decoded.
///
/// Reading past the end of the container (including input shorter than the
/// magic word) is always [`Truncated`](DecodeError::Truncated). A stream that
/// stays in bounds but references bytes outside the output is reported as
/// [`InvalidOffset`](DecodeError::InvalidOffset) or
/// [`Overrun`](DecodeError::Overrun).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Not a Yay0 container")]
    BadMagic,

    #[error("Unexpected end of container")]
    Truncated,

    #[error("Link distance reaches before the start of the output")]
    InvalidOffset,

    #[error("Link writes past the declared decompressed size")]
    Overrun,
}
