//! Cursor-based wire reader.

use crate::error::{CodecError, CodecResult};
use crate::long::format_long;
use crate::serializer::padding_len;

/// Little-endian reader over a borrowed buffer.
///
/// Every read advances `offset`; nothing is consumed on error.
#[derive(Debug, Clone)]
pub struct Deserializer<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Deserializer<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current cursor position.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left after the cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn underrun(&self, requested: usize) -> CodecError {
        CodecError::BufferUnderrun {
            requested,
            buffer_len: self.buf.len(),
            end: self.offset.saturating_add(requested),
        }
    }

    fn slice_at(&self, len: usize) -> CodecResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or_else(|| self.underrun(len))?;
        self.buf.get(self.offset..end).ok_or_else(|| self.underrun(len))
    }

    fn array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice_at(N)?);
        self.offset += N;
        Ok(out)
    }

    /// Exactly `len` bytes with no framing.
    pub fn read_raw(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let bytes = self.slice_at(len)?;
        self.offset += len;
        Ok(bytes)
    }

    /// Next `uint32` without moving the cursor.
    pub fn peek_uint(&self) -> CodecResult<u32> {
        let bytes = self.slice_at(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_int(&mut self) -> CodecResult<i32> {
        self.array().map(i32::from_le_bytes)
    }

    pub fn read_uint(&mut self) -> CodecResult<u32> {
        self.array().map(u32::from_le_bytes)
    }

    pub fn read_short(&mut self) -> CodecResult<i16> {
        self.array().map(i16::from_le_bytes)
    }

    pub fn read_ushort(&mut self) -> CodecResult<u16> {
        self.array().map(u16::from_le_bytes)
    }

    pub fn read_float(&mut self) -> CodecResult<f32> {
        self.array().map(f32::from_le_bytes)
    }

    pub fn read_double(&mut self) -> CodecResult<f64> {
        self.array().map(f64::from_le_bytes)
    }

    pub fn read_bool(&mut self) -> CodecResult<bool> {
        let value = match self.slice_at(1)?[0] {
            0 => false,
            1 => true,
            other => return Err(CodecError::InvalidBool(other)),
        };
        self.offset += 1;
        Ok(value)
    }

    /// Signed long as `0x` + 16 hex digits.
    pub fn read_long(&mut self) -> CodecResult<String> {
        self.array().map(format_long)
    }

    /// Unsigned long as `0x` + 16 hex digits.
    pub fn read_ulong(&mut self) -> CodecResult<String> {
        self.array().map(format_long)
    }

    /// Length-prefixed payload, skipping its padding.
    pub fn read_bytes(&mut self) -> CodecResult<&'a [u8]> {
        let start = self.offset;
        let len = self.read_uint()? as usize;
        let total = match len.checked_add(padding_len(len)) {
            Some(total) => total,
            None => {
                self.offset = start;
                return Err(self.underrun(len));
            }
        };
        if self.remaining() < total {
            let err = self.underrun(total);
            self.offset = start;
            return Err(err);
        }
        let payload = &self.buf[self.offset..self.offset + len];
        self.offset += total;
        Ok(payload)
    }

    /// UTF-8 string framed as bytes.
    pub fn read_string(&mut self) -> CodecResult<String> {
        let start = self.offset;
        let bytes = self.read_bytes()?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            Err(e) => {
                self.offset = start;
                Err(e.into())
            }
        }
    }
}
