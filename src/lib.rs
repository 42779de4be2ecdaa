//! # bmpmatrix
//!
//! BMP decoder and render pipeline for HUB75-style RGB LED matrix panels.
//!
//! Decodes bitmap images from removable storage and streams them, pixel by
//! pixel, onto a fixed-resolution RGB matrix. No intermediate image buffer is
//! ever allocated: pixels flow storage → decoder → coordinate mapper → display
//! sink one at a time, so memory stays O(1) in the image size — small enough
//! for a microcontroller, convenient enough for a host-side simulator.
//!
//! ## Supported Formats
//!
//! - BMP with a BITMAPINFOHEADER (`infoHeaderSize >= 40`), bottom-up row order
//! - **32 bpp uncompressed** (`compression = 0`)
//! - **8 bpp RLE** (`compression = 1`) with a color table
//!
//! ## Non-Goals
//!
//! - PNG/JPEG or any other container
//! - Other bit depths, top-down images, RLE delta/absolute escapes
//! - Color management beyond straight RGB565 truncation
//!
//! ## Usage
//!
//! ```no_run
//! use bmpmatrix::{DisplaySink, MatrixGeometry, MemStorage, RenderPipeline};
//!
//! struct Panel;
//! impl DisplaySink for Panel {
//!     fn set_pixel(&mut self, _x: u32, _y: u32, _color: u16) {}
//!     fn present(&mut self) {}
//!     fn set_brightness(&mut self, _level: u8) {}
//!     fn show_error(&mut self, _message: &str) {}
//! }
//!
//! let storage = MemStorage::new();
//! let mut pipeline = RenderPipeline::new(storage, MatrixGeometry::new(64, 32));
//! let mut panel = Panel;
//!
//! if let Err(err) = pipeline.render("bitmaps/logo.bmp", &mut panel, Some(128)) {
//!     // A bad file is skipped; it never takes the device down.
//!     panel.show_error("logo.bmp failed");
//!     let _ = err;
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod config;
mod cursor;
mod error;
mod limits;
mod mapper;
mod pipeline;
mod sink;
mod slideshow;
mod storage;

pub mod bmp;

// Re-exports
pub use bmp::header::BmpDescriptor;
pub use bmp::palette::{Palette, PaletteEntry};
pub use bmp::pixels::{DecodedPixel, PixelFormat};
pub use config::{DisplayMode, MatrixConfig, SettingsStore};
pub use cursor::BinaryCursor;
pub use error::{DecodeError, SettingsError};
pub use limits::Limits;
pub use mapper::MatrixGeometry;
pub use pipeline::RenderPipeline;
pub use sink::{DisplaySink, pack_rgb565, scale_channel};
pub use slideshow::run_folder;
pub use storage::{MemStorage, Storage, StorageFile};

#[cfg(feature = "std")]
pub use storage::fs::FsStorage;
