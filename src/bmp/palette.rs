//! Color table loading for indexed pixel formats.

use alloc::format;
use alloc::vec::Vec;

use crate::bmp::header::BmpDescriptor;
use crate::cursor::BinaryCursor;
use crate::error::DecodeError;
use crate::storage::StorageFile;

/// Hard cap on color-table entries. RLE8 indices are a single byte, so no
/// well-formed file can use more; larger declared counts are rejected
/// instead of trusted.
pub const MAX_PALETTE_ENTRIES: u32 = 256;

/// One color-table record, in file storage order (blue, green, red, alpha).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// Ordered color table, owned by a single render call.
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Read the color table for an 8bpp image.
    ///
    /// The table sits at `infoHeaderSize + 14` bytes from the start of the
    /// file; every entry is a fixed 4-byte record regardless of what the
    /// header claims about entry semantics.
    pub fn load<F: StorageFile>(
        cursor: &mut BinaryCursor<F>,
        desc: &BmpDescriptor,
    ) -> Result<Self, DecodeError> {
        let count = desc.palette_len();
        if count > MAX_PALETTE_ENTRIES {
            return Err(DecodeError::LimitExceeded(format!(
                "declared palette count {count} above maximum {MAX_PALETTE_ENTRIES}"
            )));
        }

        cursor.seek(desc.color_table_offset())?;

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let [blue, green, red, alpha] = cursor.read_fixed_bytes::<4>()?;
            entries.push(PaletteEntry {
                red,
                green,
                blue,
                alpha,
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a pixel's color by palette index.
    pub fn get(&self, index: u8) -> Result<PaletteEntry, DecodeError> {
        self.entries
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| {
                DecodeError::InvalidData(format!(
                    "palette index {index} out of range (palette has {} entries)",
                    self.entries.len()
                ))
            })
    }
}
