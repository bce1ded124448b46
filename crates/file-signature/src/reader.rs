//! Bounds-checked cursor over a borrowed byte buffer.
//!
//! Every read either returns a value or a [`ReadError`]; nothing here can
//! panic on a truncated or corrupt file, and a failed read leaves the cursor
//! where it was.

use thiserror::Error;

/// Byte order for multi-byte reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("Read of {width} byte(s) at offset {offset} runs past end of buffer ({len} bytes)")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
}

impl ReadError {
    pub fn offset(&self) -> usize {
        match self {
            Self::OutOfBounds { offset, .. } => *offset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CursorReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> CursorReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    //  Cursor movement

    /// Advance by `count` bytes without reading; stops at the buffer end.
    pub fn skip(&mut self, count: usize) -> &mut Self {
        self.cursor = self.cursor.saturating_add(count).min(self.buffer.len());
        self
    }

    /// Move to an absolute position; clamped to the buffer end.
    pub fn seek(&mut self, position: usize) -> &mut Self {
        self.cursor = position.min(self.buffer.len());
        self
    }

    pub fn reset_cursor(&mut self) -> &mut Self {
        self.cursor = 0;
        self
    }

    //  Raw bytes

    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8], ReadError> {
        self.cursor
            .checked_add(count)
            .and_then(|end| self.buffer.get(self.cursor..end))
            .ok_or(ReadError::OutOfBounds {
                offset: self.cursor,
                width: count,
                len: self.buffer.len(),
            })
    }

    pub fn consume_bytes(&mut self, count: usize) -> Result<&'a [u8], ReadError> {
        let bytes = self.peek_bytes(count)?;
        self.cursor += count;
        Ok(bytes)
    }

    fn peek_array<const N: usize>(&self) -> Result<[u8; N], ReadError> {
        let bytes = self.peek_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    //  Integers

    pub fn peek_u8(&self) -> Result<u8, ReadError> {
        Ok(self.peek_array::<1>()?[0])
    }

    pub fn peek_u16(&self, endian: Endian) -> Result<u16, ReadError> {
        let raw = self.peek_array::<2>()?;
        Ok(match endian {
            Endian::Big => u16::from_be_bytes(raw),
            Endian::Little => u16::from_le_bytes(raw),
        })
    }

    pub fn peek_u32(&self, endian: Endian) -> Result<u32, ReadError> {
        let raw = self.peek_array::<4>()?;
        Ok(match endian {
            Endian::Big => u32::from_be_bytes(raw),
            Endian::Little => u32::from_le_bytes(raw),
        })
    }

    pub fn peek_u64(&self, endian: Endian) -> Result<u64, ReadError> {
        let raw = self.peek_array::<8>()?;
        Ok(match endian {
            Endian::Big => u64::from_be_bytes(raw),
            Endian::Little => u64::from_le_bytes(raw),
        })
    }

    pub fn consume_u8(&mut self) -> Result<u8, ReadError> {
        let v = self.peek_u8()?;
        self.cursor += 1;
        Ok(v)
    }

    pub fn consume_u16(&mut self, endian: Endian) -> Result<u16, ReadError> {
        let v = self.peek_u16(endian)?;
        self.cursor += 2;
        Ok(v)
    }

    pub fn consume_u32(&mut self, endian: Endian) -> Result<u32, ReadError> {
        let v = self.peek_u32(endian)?;
        self.cursor += 4;
        Ok(v)
    }

    pub fn consume_u64(&mut self, endian: Endian) -> Result<u64, ReadError> {
        let v = self.peek_u64(endian)?;
        self.cursor += 8;
        Ok(v)
    }
}
