//! Bounds-checked sequential reader over a borrowed byte slice.

use super::error::CrxError;

/// Cursor over an immutable buffer. Every read checks bounds first and
/// reports `TruncatedInput` instead of panicking on a short slice.
#[derive(Debug, Clone)]
pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes not consumed yet.
    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume `len` bytes and return them as a sub-slice of the original buffer.
    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8], CrxError> {
        if len > self.remaining() {
            return Err(self.truncated(len));
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CrxError> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32, CrxError> {
        self.read_array::<4>().map(u32::from_le_bytes)
    }

    /// Everything after the cursor. Always succeeds (possibly empty).
    pub(crate) fn rest(self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn truncated(&self, len: usize) -> CrxError {
        CrxError::TruncatedInput {
            needed: self.pos as u64 + len as u64,
            available: self.buf.len(),
        }
    }
}
