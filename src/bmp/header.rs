//! BMP file header + BITMAPINFOHEADER parsing and validation.

use alloc::format;
use log::trace;

use crate::bmp::pixels::PixelFormat;
use crate::cursor::BinaryCursor;
use crate::error::DecodeError;
use crate::storage::StorageFile;

/// `"BM"` read as a little-endian u16.
const BMP_MAGIC: u16 = 0x4D42;

/// Size of the fixed file header preceding the info header.
pub(crate) const FILE_HEADER_SIZE: u32 = 14;

/// Parsed and validated BMP metadata, immutable for the rest of the render.
///
/// Only fields up to the 40-byte BITMAPINFOHEADER are ever read; larger
/// headers (V4/V5 bit masks, gamma, ICC data) are accepted but their extra
/// fields are never touched — the pipeline seeks to `pixel_data_offset`
/// explicitly instead of assuming the cursor lands there.
#[derive(Debug, Clone)]
pub struct BmpDescriptor {
    pub file_type: u16,
    pub file_size_bytes: u32,
    pub pixel_data_offset: u32,
    pub info_header_size: u32,
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size_bytes: u32,
    pub palette_color_count: u32,
}

impl BmpDescriptor {
    /// Number of color-table entries: the declared count, or the format
    /// default of `2^bitsPerPixel` when the field is zero.
    pub fn palette_len(&self) -> u32 {
        if self.palette_color_count != 0 {
            self.palette_color_count
        } else {
            1u32 << self.bits_per_pixel.min(31)
        }
    }

    /// Byte offset of the color table from the start of the file.
    ///
    /// Widened to u64: `info_header_size` is an untrusted file field with no
    /// upper bound, so the sum must not overflow.
    pub fn color_table_offset(&self) -> u64 {
        u64::from(self.info_header_size) + u64::from(FILE_HEADER_SIZE)
    }

    /// The pixel encoding this file uses. Always succeeds on a descriptor
    /// that came out of [`parse`] — validation already pinned the pair down.
    pub fn pixel_format(&self) -> PixelFormat {
        match self.bits_per_pixel {
            8 => PixelFormat::Indexed8Rle,
            _ => PixelFormat::Uncompressed32,
        }
    }
}

/// Read and validate the file header + info header.
///
/// Reads exactly the legacy BITMAPINFOHEADER field sequence: 2-byte fields
/// for the magic, plane count, and bit depth; 4-byte little-endian fields
/// for everything else.
pub fn parse<F: StorageFile>(cursor: &mut BinaryCursor<F>) -> Result<BmpDescriptor, DecodeError> {
    let file_type = cursor.get_u16_le()?;
    if file_type != BMP_MAGIC {
        return Err(DecodeError::UnsupportedHeader(format!(
            "bad magic bytes {file_type:#06x}, expected \"BM\""
        )));
    }
    let file_size_bytes = cursor.get_u32_le()?;
    cursor.skip(4)?; // reserved
    let pixel_data_offset = cursor.get_u32_le()?;

    let info_header_size = cursor.get_u32_le()?;
    if info_header_size < 40 {
        return Err(DecodeError::UnsupportedHeader(format!(
            "info header size {info_header_size} below BITMAPINFOHEADER minimum (40)"
        )));
    }

    let width = cursor.get_u32_le()? as i32;
    let height = cursor.get_u32_le()? as i32;
    let planes = cursor.get_u16_le()?;
    let bits_per_pixel = cursor.get_u16_le()?;
    let compression = cursor.get_u32_le()?;
    let image_size_bytes = cursor.get_u32_le()?;
    let x_pixels_per_meter = cursor.get_u32_le()?;
    let y_pixels_per_meter = cursor.get_u32_le()?;
    let palette_color_count = cursor.get_u32_le()?;
    let important_colors = cursor.get_u32_le()?;

    trace!("file size: {file_size_bytes}");
    trace!("pixel data offset: {pixel_data_offset}");
    trace!("info header size: {info_header_size}");
    trace!("width: {width}, height: {height}");
    trace!("planes: {planes}");
    trace!("bits per pixel: {bits_per_pixel}");
    trace!("compression: {compression}");
    trace!("image size: {image_size_bytes}");
    trace!("resolution: {x_pixels_per_meter}x{y_pixels_per_meter} px/m");
    trace!("total colors: {palette_color_count}, important: {important_colors}");

    if planes != 1 {
        return Err(DecodeError::UnsupportedHeader(format!(
            "planes field is {planes}, expected 1"
        )));
    }
    if width <= 0 {
        return Err(DecodeError::UnsupportedHeader(format!(
            "non-positive image width ({width})"
        )));
    }
    if height < 0 {
        return Err(DecodeError::UnsupportedHeader(
            "top-down row order not supported".into(),
        ));
    }
    if height == 0 {
        return Err(DecodeError::UnsupportedHeader("image height is zero".into()));
    }
    if file_size_bytes != 0 && pixel_data_offset >= file_size_bytes {
        return Err(DecodeError::UnsupportedHeader(format!(
            "pixel data offset ({pixel_data_offset}) beyond declared file size ({file_size_bytes})"
        )));
    }

    match (bits_per_pixel, compression) {
        (32, 0) | (8, 1) => {}
        (32, c) => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "32bpp must be uncompressed, got compression {c}"
            )));
        }
        (8, c) => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "8bpp must be RLE compressed, got compression {c}"
            )));
        }
        (bpp, _) => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "bit depth {bpp} unsupported (only 8 and 32)"
            )));
        }
    }

    Ok(BmpDescriptor {
        file_type,
        file_size_bytes,
        pixel_data_offset,
        info_header_size,
        width,
        height,
        bits_per_pixel,
        compression,
        image_size_bytes,
        palette_color_count,
    })
}
