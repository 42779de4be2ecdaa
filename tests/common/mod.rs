//! Shared test fixtures: a recording display sink and synthetic BMP builders.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use bmpmatrix::DisplaySink;

/// Sink that records every call so tests can assert on the exact pixel
/// stream the pipeline produced.
#[derive(Default)]
pub struct RecordingSink {
    pub pixels: Vec<(u32, u32, u16)>,
    pub presents: usize,
    pub brightness: Vec<u8>,
    pub errors: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last color written at a coordinate, if any.
    pub fn color_at(&self, x: u32, y: u32) -> Option<u16> {
        self.pixels
            .iter()
            .rev()
            .find(|(px, py, _)| *px == x && *py == y)
            .map(|(_, _, c)| *c)
    }
}

impl DisplaySink for RecordingSink {
    fn set_pixel(&mut self, x: u32, y: u32, color: u16) {
        self.pixels.push((x, y, color));
    }

    fn present(&mut self) {
        self.presents += 1;
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness.push(level);
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// File header + BITMAPINFOHEADER with the given fields.
pub fn bmp_header(
    file_size: u32,
    pixel_data_offset: u32,
    info_header_size: u32,
    width: i32,
    height: i32,
    bits_per_pixel: u16,
    compression: u32,
    image_size: u32,
    total_colors: u32,
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    push_u32(&mut out, file_size);
    push_u32(&mut out, 0); // reserved
    push_u32(&mut out, pixel_data_offset);
    push_u32(&mut out, info_header_size);
    push_u32(&mut out, width as u32);
    push_u32(&mut out, height as u32);
    push_u16(&mut out, 1); // planes
    push_u16(&mut out, bits_per_pixel);
    push_u32(&mut out, compression);
    push_u32(&mut out, image_size);
    push_u32(&mut out, 2835); // x pixels per meter
    push_u32(&mut out, 2835); // y pixels per meter
    push_u32(&mut out, total_colors);
    push_u32(&mut out, 0); // important colors
    out
}

/// 32bpp uncompressed BMP. `pixel(x, y)` gives the RGB color at device
/// coordinates (y = 0 is the top row); rows are stored bottom-up as the
/// format requires.
pub fn bmp32(width: u32, height: u32, pixel: impl Fn(u32, u32) -> (u8, u8, u8)) -> Vec<u8> {
    let pixel_data_offset = 14 + 40;
    let image_size = width * height * 4;
    let mut out = bmp_header(
        pixel_data_offset + image_size,
        pixel_data_offset,
        40,
        width as i32,
        height as i32,
        32,
        0,
        image_size,
        0,
    );
    for y in (0..height).rev() {
        for x in 0..width {
            let (r, g, b) = pixel(x, y);
            out.extend_from_slice(&[b, g, r, 0xFF]);
        }
    }
    out
}

/// 8bpp RLE BMP with the given palette (RGB triples, stored as BGRA
/// records) and raw RLE stream. `total_colors` is the header field;
/// the table written always has `palette.len()` entries.
pub fn bmp8_rle(
    width: u32,
    height: u32,
    palette: &[(u8, u8, u8)],
    rle: &[u8],
    total_colors: u32,
    image_size: u32,
) -> Vec<u8> {
    let table_size = palette.len() as u32 * 4;
    let pixel_data_offset = 14 + 40 + table_size;
    let mut out = bmp_header(
        pixel_data_offset + rle.len() as u32,
        pixel_data_offset,
        40,
        width as i32,
        height as i32,
        8,
        1,
        image_size,
        total_colors,
    );
    for (r, g, b) in palette {
        out.extend_from_slice(&[*b, *g, *r, 0x00]);
    }
    out.extend_from_slice(rle);
    out
}

/// RLE stream for a solid-color image: full-width runs, one end-of-row per
/// row, then the end-of-bitmap marker.
pub fn solid_rle(width: u32, height: u32, index: u8) -> Vec<u8> {
    assert!(width <= 255, "one run per row only");
    let mut out = Vec::new();
    for _ in 0..height {
        out.extend_from_slice(&[width as u8, index]);
        out.extend_from_slice(&[0, 0]);
    }
    out.extend_from_slice(&[0, 1]);
    out
}
