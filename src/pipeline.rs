//! Render orchestration: open → validate → decode → present → close.

use alloc::string::String;
use log::{debug, trace};

use crate::bmp::header::{self, BmpDescriptor};
use crate::bmp::palette::Palette;
use crate::bmp::pixels::{self, PixelFormat};
use crate::cursor::BinaryCursor;
use crate::error::DecodeError;
use crate::limits::Limits;
use crate::mapper::MatrixGeometry;
use crate::sink::{DisplaySink, pack_rgb565, scale_channel};
use crate::storage::{Storage, StorageFile};

/// Streams bitmap files from storage onto a display sink.
///
/// One image is fully decoded and presented before the next begins; the
/// pipeline holds no state across calls beyond its storage handle, panel
/// geometry, and limits.
pub struct RenderPipeline<S: Storage> {
    storage: S,
    geometry: MatrixGeometry,
    limits: Limits,
}

impl<S: Storage> RenderPipeline<S> {
    pub fn new(storage: S, geometry: MatrixGeometry) -> Self {
        Self {
            storage,
            geometry,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Render one bitmap file onto `sink`.
    ///
    /// When `brightness` is given it is forwarded to the sink and also
    /// applied as channel scaling before RGB565 packing, so sinks without
    /// native brightness control still dim correctly.
    ///
    /// Once the file is open, `present()` and `close()` each happen exactly
    /// once no matter how decoding ends; a decode error leaves any pixels
    /// already written on the panel (partial frame, no rollback).
    pub fn render(
        &mut self,
        path: &str,
        sink: &mut dyn DisplaySink,
        brightness: Option<u8>,
    ) -> Result<(), DecodeError> {
        if !self.storage.exists(path) {
            return Err(DecodeError::NotFound(String::from(path)));
        }
        let file = self.storage.open(path)?;
        let mut cursor = BinaryCursor::new(file);

        let result = self.render_stream(&mut cursor, sink, brightness);
        sink.present();
        let close_result = cursor.into_inner().close();

        debug!("rendered {path}: {result:?}");
        result?;
        close_result
    }

    fn render_stream<F: StorageFile>(
        &self,
        cursor: &mut BinaryCursor<F>,
        sink: &mut dyn DisplaySink,
        brightness: Option<u8>,
    ) -> Result<(), DecodeError> {
        let desc = header::parse(cursor)?;
        self.limits.check(desc.width as u32, desc.height as u32)?;

        if let Some(level) = brightness {
            sink.set_brightness(level);
        }
        let level = brightness.unwrap_or(255);

        let geometry = self.geometry;
        let mut emit = |px: pixels::DecodedPixel| {
            if let Some((x, y)) = geometry.map(px.x, px.y) {
                let color = pack_rgb565(
                    scale_channel(px.red, level),
                    scale_channel(px.green, level),
                    scale_channel(px.blue, level),
                );
                sink.set_pixel(x, y, color);
            }
        };

        match desc.pixel_format() {
            PixelFormat::Uncompressed32 => {
                cursor.seek(u64::from(desc.pixel_data_offset))?;
                pixels::decode_uncompressed32(cursor, &desc, &mut emit)?;
            }
            PixelFormat::Indexed8Rle => {
                let palette = Palette::load(cursor, &desc)?;
                cursor.seek(u64::from(desc.pixel_data_offset))?;
                let budget = self.limits.clamp_rle_budget(pixels::rle_record_budget(&desc));
                pixels::decode_indexed8_rle(cursor, &desc, &palette, budget, &mut emit)?;
            }
        }

        trace!("decoded {} bytes", cursor.consumed());
        Ok(())
    }

    /// Header-only probe: parse and validate without touching the sink.
    pub fn probe(&mut self, path: &str) -> Result<BmpDescriptor, DecodeError> {
        if !self.storage.exists(path) {
            return Err(DecodeError::NotFound(String::from(path)));
        }
        let file = self.storage.open(path)?;
        let mut cursor = BinaryCursor::new(file);
        let result = header::parse(&mut cursor);
        let close_result = cursor.into_inner().close();
        let desc = result?;
        close_result?;
        Ok(desc)
    }
}
