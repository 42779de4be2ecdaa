//! Pixel stream decoders.
//!
//! Both decoders reconstruct the pixel stream directly from file bytes and
//! hand each pixel to an emitter callback — no image buffer exists at any
//! point, so memory stays O(1) in the image size. Rows come out in the
//! bottom-up order BMP stores them (row `height-1` first), which is already
//! final device row order.

use alloc::format;
use log::warn;

use crate::bmp::header::BmpDescriptor;
use crate::bmp::palette::Palette;
use crate::cursor::BinaryCursor;
use crate::error::DecodeError;
use crate::storage::StorageFile;

/// The two pixel encodings this decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32 bits per pixel, no compression (`compression = 0`).
    Uncompressed32,
    /// 8 bits per pixel, RLE compressed, palette indexed (`compression = 1`).
    Indexed8Rle,
}

/// One decoded pixel in source-image coordinates. Produced and consumed one
/// at a time; never materialized in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedPixel {
    pub x: u32,
    pub y: u32,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Decode a 32bpp uncompressed pixel array.
///
/// Each pixel is a 4-byte `{blue, green, red, alpha}` record; alpha is
/// discarded. Rows are 4-byte aligned by construction at this depth, so no
/// padding skip is needed (24bpp would need one, and is not supported).
/// Stops at the first short read; pixels already emitted stay emitted —
/// a partial frame is deliberate, there is no rollback.
pub fn decode_uncompressed32<F: StorageFile>(
    cursor: &mut BinaryCursor<F>,
    desc: &BmpDescriptor,
    emit: &mut dyn FnMut(DecodedPixel),
) -> Result<(), DecodeError> {
    let width = desc.width as u32;
    let height = desc.height as u32;

    for y in (0..height).rev() {
        for x in 0..width {
            let [blue, green, red, _alpha] = cursor.read_fixed_bytes::<4>()?;
            emit(DecodedPixel {
                x,
                y,
                red,
                green,
                blue,
            });
        }
    }
    Ok(())
}

/// Upper bound on RLE records before the stream is declared malformed.
///
/// Derived from the header's image-size field when present (records are two
/// bytes each), otherwise from the worst well-formed case: one record per
/// pixel, an end-of-row per row, and the end-of-bitmap marker. Without this
/// bound a stream missing its end marker would spin forever.
pub fn rle_record_budget(desc: &BmpDescriptor) -> u64 {
    if desc.image_size_bytes != 0 {
        // Records are two bytes each; the declared size already covers the
        // end marker.
        u64::from(desc.image_size_bytes) / 2
    } else {
        let w = desc.width as u64;
        let h = desc.height as u64;
        w * h + h + 1
    }
}

/// Decode an 8bpp RLE pixel stream.
///
/// The stream is a sequence of 2-byte `(count, index)` records:
/// - `count > 0` emits `count` pixels of `palette[index]`, advancing `x`.
///   `x` wraps to 0 at the row width — a defensive clamp for malformed
///   files, not part of the format.
/// - `(0, 0)` ends the row: `y` drops by one, `x` resets. Runs after the
///   bottom row has been passed are consumed but emit nothing.
/// - `(0, 1)` ends the bitmap.
/// - Any other `(0, n)` escape (delta, absolute run) is unsupported and
///   rejected rather than skipped.
pub fn decode_indexed8_rle<F: StorageFile>(
    cursor: &mut BinaryCursor<F>,
    desc: &BmpDescriptor,
    palette: &Palette,
    max_records: u64,
    emit: &mut dyn FnMut(DecodedPixel),
) -> Result<(), DecodeError> {
    let width = desc.width as u32;
    let mut x: u32 = 0;
    let mut y: i64 = i64::from(desc.height) - 1;
    let mut records: u64 = 0;

    loop {
        if records >= max_records {
            // No end-of-bitmap marker within the record budget.
            return Err(DecodeError::Truncated);
        }
        records += 1;

        let [count, index] = cursor.read_fixed_bytes::<2>()?;

        if count == 0 {
            match index {
                0 => {
                    // End of row.
                    y -= 1;
                    x = 0;
                }
                1 => return Ok(()), // end of bitmap
                escape => {
                    return Err(DecodeError::UnsupportedFormat(format!(
                        "RLE escape code {escape} unsupported"
                    )));
                }
            }
            continue;
        }

        let entry = palette.get(index)?;
        for i in 0..count {
            if y >= 0 {
                emit(DecodedPixel {
                    x,
                    y: y as u32,
                    red: entry.red,
                    green: entry.green,
                    blue: entry.blue,
                });
            }
            x += 1;
            if x == width {
                x = 0;
                if i + 1 < count {
                    warn!("RLE run overflowed row {y}, wrapping to column 0");
                }
            }
        }
    }
}
