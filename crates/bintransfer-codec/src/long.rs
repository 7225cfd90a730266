//! 64-bit values.
//!
//! Longs travel as 8 little-endian bytes and surface to callers as
//! `0x`-prefixed, zero-padded, big-endian hex strings, so they survive any
//! host that lacks native 64-bit integers.

use crate::error::{CodecError, CodecResult};
use std::fmt;

/// Accepted input forms for a long or ulong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LongInput {
    Int(i64),
    UInt(u64),
    /// Decimal text, or `0x` hex with an even total length
    Str(String),
}

impl From<i64> for LongInput {
    fn from(value: i64) -> Self {
        LongInput::Int(value)
    }
}

impl From<u64> for LongInput {
    fn from(value: u64) -> Self {
        LongInput::UInt(value)
    }
}

impl From<&str> for LongInput {
    fn from(value: &str) -> Self {
        LongInput::Str(value.to_string())
    }
}

impl From<String> for LongInput {
    fn from(value: String) -> Self {
        LongInput::Str(value)
    }
}

impl fmt::Display for LongInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LongInput::Int(v) => write!(f, "{}", v),
            LongInput::UInt(v) => write!(f, "{}", v),
            LongInput::Str(s) => f.write_str(s),
        }
    }
}

impl LongInput {
    /// Two's-complement bit pattern for a signed long.
    ///
    /// Unsigned inputs above `i64::MAX` keep their bits.
    pub fn to_signed_bits(&self) -> CodecResult<u64> {
        match self {
            LongInput::Int(v) => Ok(*v as u64),
            LongInput::UInt(v) => Ok(*v),
            LongInput::Str(s) => parse_long_str(s, true),
        }
    }

    /// Bit pattern for an unsigned long; negative inputs are rejected.
    pub fn to_unsigned_bits(&self) -> CodecResult<u64> {
        match self {
            LongInput::Int(v) => u64::try_from(*v).map_err(|_| CodecError::OutOfRange {
                kind: "ulong",
                value: v.to_string(),
            }),
            LongInput::UInt(v) => Ok(*v),
            LongInput::Str(s) => parse_long_str(s, false),
        }
    }
}

fn parse_long_str(s: &str, signed: bool) -> CodecResult<u64> {
    if let Some(digits) = s.strip_prefix("0x") {
        return parse_hex(s, digits);
    }

    if let Ok(v) = s.parse::<u64>() {
        return Ok(v);
    }
    match s.parse::<i64>() {
        Ok(v) if signed => Ok(v as u64),
        Ok(v) => Err(CodecError::OutOfRange {
            kind: "ulong",
            value: v.to_string(),
        }),
        Err(_) => Err(CodecError::InvalidLong(s.to_string())),
    }
}

fn parse_hex(s: &str, digits: &str) -> CodecResult<u64> {
    if s.len() % 2 != 0 {
        return Err(CodecError::InvalidHexString(s.to_string()));
    }
    let bytes = hex::decode(digits).map_err(|_| CodecError::InvalidHexString(s.to_string()))?;
    if bytes.len() > 8 {
        return Err(CodecError::InvalidLong(s.to_string()));
    }
    let mut be = [0u8; 8];
    be[8 - bytes.len()..].copy_from_slice(&bytes);
    Ok(u64::from_be_bytes(be))
}

/// Render wire bytes (little-endian) as `0x` + 16 big-endian hex digits.
pub fn format_long(le_bytes: [u8; 8]) -> String {
    let mut be = le_bytes;
    be.reverse();
    format!("0x{}", hex::encode(be))
}
