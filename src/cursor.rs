//! Sequential little-endian reader over a storage file.

use crate::error::DecodeError;
use crate::storage::StorageFile;

/// Byte cursor over an open [`StorageFile`].
///
/// All multi-byte reads decode little-endian explicitly from byte arrays —
/// BMP fields are LE on disk regardless of the host. A read that comes up
/// short yields [`DecodeError::Truncated`].
pub struct BinaryCursor<F> {
    file: F,
    consumed: u64,
}

impl<F: StorageFile> BinaryCursor<F> {
    pub fn new(file: F) -> Self {
        Self { file, consumed: 0 }
    }

    /// Total bytes read so far (seeks don't count).
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Reposition to an absolute byte offset.
    pub fn seek(&mut self, offset: u64) -> Result<(), DecodeError> {
        self.file.seek(offset)
    }

    /// Take the underlying file back, e.g. to close it.
    pub fn into_inner(self) -> F {
        self.file
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.file.read(&mut buf[filled..])?;
            if n == 0 {
                return Err(DecodeError::Truncated);
            }
            filled += n;
            self.consumed += n as u64;
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let [b] = self.read_fixed_bytes::<1>()?;
        Ok(b)
    }

    pub fn get_u16_le(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes::<2>()?))
    }

    pub fn get_u32_le(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes::<4>()?))
    }

    pub fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Consume and discard `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        let mut scratch = [0u8; 16];
        let mut remaining = n;
        while remaining > 0 {
            let take = remaining.min(scratch.len());
            self.read_exact(&mut scratch[..take])?;
            remaining -= take;
        }
        Ok(())
    }
}
