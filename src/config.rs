//! Shared runtime configuration and its persistence interface.
//!
//! Brightness and slideshow delay are the only state shared between the
//! render loop and the control surface. Each lives in its own atomic and is
//! read with a single load per use; no multi-field transaction exists or is
//! needed, the scalars are independent.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::error::SettingsError;

/// What the panel does between renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Cycle through the image folder.
    #[default]
    Slideshow = 0,
    /// Keep the current image up.
    Hold = 1,
}

impl DisplayMode {
    /// Lossy decode from the persisted byte; unknown values fall back to
    /// slideshow.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Hold,
            _ => Self::Slideshow,
        }
    }
}

/// Runtime configuration shared between the render loop and control-plane
/// tasks. `Sync`; control handlers store while a render loads.
pub struct MatrixConfig {
    brightness: AtomicU8,
    slideshow_delay_ms: AtomicU32,
    mode: AtomicU8,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixConfig {
    pub const DEFAULT_BRIGHTNESS: u8 = 255;
    pub const DEFAULT_SLIDESHOW_DELAY_MS: u32 = 5000;

    pub const fn new() -> Self {
        Self {
            brightness: AtomicU8::new(Self::DEFAULT_BRIGHTNESS),
            slideshow_delay_ms: AtomicU32::new(Self::DEFAULT_SLIDESHOW_DELAY_MS),
            mode: AtomicU8::new(0),
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    pub fn set_brightness(&self, level: u8) {
        self.brightness.store(level, Ordering::Relaxed);
    }

    pub fn slideshow_delay_ms(&self) -> u32 {
        self.slideshow_delay_ms.load(Ordering::Relaxed)
    }

    pub fn set_slideshow_delay_ms(&self, delay_ms: u32) {
        self.slideshow_delay_ms.store(delay_ms, Ordering::Relaxed);
    }

    pub fn mode(&self) -> DisplayMode {
        DisplayMode::from_u8(self.mode.load(Ordering::Relaxed))
    }

    pub fn set_mode(&self, mode: DisplayMode) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }

    /// Load whatever the store has; missing keys keep their current value.
    pub fn restore_from(&self, store: &mut dyn SettingsStore) {
        if let Some(v) = store.load(keys::BRIGHTNESS) {
            self.set_brightness(v.min(255) as u8);
        }
        if let Some(v) = store.load(keys::SLIDESHOW_DELAY_MS) {
            self.set_slideshow_delay_ms(v);
        }
        if let Some(v) = store.load(keys::MODE) {
            self.set_mode(DisplayMode::from_u8(v.min(255) as u8));
        }
    }

    /// Write all settings to the store.
    pub fn persist_to(&self, store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
        store.save(keys::BRIGHTNESS, u32::from(self.brightness()))?;
        store.save(keys::SLIDESHOW_DELAY_MS, self.slideshow_delay_ms())?;
        store.save(keys::MODE, self.mode() as u32)
    }
}

/// Key-value persistence for [`MatrixConfig`].
///
/// The device side backs this with a settings file on the card; tests back
/// it with a map.
pub trait SettingsStore {
    fn load(&mut self, key: &str) -> Option<u32>;
    fn save(&mut self, key: &str, value: u32) -> Result<(), SettingsError>;
}

mod keys {
    pub const BRIGHTNESS: &str = "brightness";
    pub const SLIDESHOW_DELAY_MS: &str = "slideshow-delay-ms";
    pub const MODE: &str = "mode";
}
