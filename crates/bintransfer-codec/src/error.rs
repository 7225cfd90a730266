use thiserror::Error;

/// Errors that can occur while writing or reading wire values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Not enough data in buffer to decode
    #[error("buffer underrun: requested {requested} bytes, buffer length {buffer_len}, end offset {end}")]
    BufferUnderrun {
        requested: usize,
        buffer_len: usize,
        end: usize,
    },

    /// Value does not fit the wire width
    #[error("value {value} is out of range for {kind}")]
    OutOfRange { kind: &'static str, value: String },

    /// Boolean byte other than 0 or 1
    #[error("invalid bool value {0}, expected 0 or 1")]
    InvalidBool(u8),

    /// `0x` string with odd length or non-hex digits
    #[error("invalid hex string \"{0}\"")]
    InvalidHexString(String),

    /// String that is not a 64-bit integer
    #[error("invalid long value \"{0}\"")]
    InvalidLong(String),

    /// String payload that is not valid UTF-8
    #[error("invalid utf-8 in string payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Payload longer than a u32 length prefix can describe
    #[error("payload of {0} bytes exceeds the length prefix")]
    PayloadTooLarge(usize),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
