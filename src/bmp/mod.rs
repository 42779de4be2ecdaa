//! BMP container decoding: header, color table, and pixel streams.
//!
//! Only the BITMAPINFOHEADER layout (`infoHeaderSize >= 40`) with bottom-up
//! rows is handled, in exactly two pixel encodings: 32 bpp uncompressed and
//! 8 bpp RLE. Everything else is rejected with a descriptive error before a
//! single pixel is written.

pub mod header;
pub mod palette;
pub mod pixels;
