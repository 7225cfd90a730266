//! Append-only wire writer.

use crate::error::{CodecError, CodecResult};
use crate::long::LongInput;

/// Number of zero bytes written after a `len`-byte payload.
///
/// This is `len % 4`, not the distance to the next multiple of four.
/// Existing encoded data depends on it.
#[inline]
pub fn padding_len(len: usize) -> usize {
    len % 4
}

/// Growable little-endian writer.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    buf: Vec<u8>,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    #[inline]
    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn checked<T: TryFrom<i64>>(kind: &'static str, value: i64) -> CodecResult<T> {
        T::try_from(value).map_err(|_| CodecError::OutOfRange {
            kind,
            value: value.to_string(),
        })
    }

    pub fn write_int(&mut self, value: i64) -> CodecResult<()> {
        let v: i32 = Self::checked("int", value)?;
        self.buf.extend_from_slice(&v.to_le_bytes());
        Ok(())
    }

    pub fn write_uint(&mut self, value: i64) -> CodecResult<()> {
        let v: u32 = Self::checked("uint", value)?;
        self.buf.extend_from_slice(&v.to_le_bytes());
        Ok(())
    }

    pub fn write_short(&mut self, value: i64) -> CodecResult<()> {
        let v: i16 = Self::checked("short", value)?;
        self.buf.extend_from_slice(&v.to_le_bytes());
        Ok(())
    }

    pub fn write_ushort(&mut self, value: i64) -> CodecResult<()> {
        let v: u16 = Self::checked("ushort", value)?;
        self.buf.extend_from_slice(&v.to_le_bytes());
        Ok(())
    }

    pub fn write_float(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_double(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Signed 64-bit value from any [`LongInput`] form.
    pub fn write_long(&mut self, value: impl Into<LongInput>) -> CodecResult<()> {
        let bits = value.into().to_signed_bits()?;
        self.buf.extend_from_slice(&bits.to_le_bytes());
        Ok(())
    }

    /// Unsigned 64-bit value from any [`LongInput`] form.
    pub fn write_ulong(&mut self, value: impl Into<LongInput>) -> CodecResult<()> {
        let bits = value.into().to_unsigned_bits()?;
        self.buf.extend_from_slice(&bits.to_le_bytes());
        Ok(())
    }

    /// `uint32` length, payload, then [`padding_len`] zero bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let len = u32::try_from(bytes.len()).map_err(|_| CodecError::PayloadTooLarge(bytes.len()))?;
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(bytes);
        self.buf.resize(self.buf.len() + padding_len(bytes.len()), 0);
        Ok(())
    }

    /// UTF-8 bytes framed as [`Serializer::write_bytes`].
    pub fn write_string(&mut self, value: &str) -> CodecResult<()> {
        self.write_bytes(value.as_bytes())
    }

    /// Bytes with no framing.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}
