//! Display collaborator surface and RGB565 color packing.

/// The matrix driver as the pipeline sees it.
///
/// The driver's internal scanning, bit planes, and double buffering are its
/// own business; the pipeline only pushes pixels, presents whole frames, and
/// surfaces user-visible errors. Implementations must tolerate any
/// coordinate order and must never fault on writes — bounds are already
/// enforced by [`MatrixGeometry`](crate::MatrixGeometry).
pub trait DisplaySink {
    /// Write one pixel in device coordinates (top-left origin), RGB565.
    fn set_pixel(&mut self, x: u32, y: u32, color: u16);

    /// Make everything written since the last present visible.
    fn present(&mut self);

    /// Global panel brightness, 0 (off) to 255 (full).
    fn set_brightness(&mut self, level: u8);

    /// Show a user-visible error message on the panel.
    fn show_error(&mut self, message: &str);
}

/// Pack 8-bit RGB into RGB565 by truncation.
pub fn pack_rgb565(red: u8, green: u8, blue: u8) -> u16 {
    (u16::from(red & 0xF8) << 8) | (u16::from(green & 0xFC) << 3) | u16::from(blue >> 3)
}

/// Scale one channel by brightness: 0 blacks out, 255 passes through.
pub fn scale_channel(channel: u8, brightness: u8) -> u8 {
    ((u16::from(channel) * u16::from(brightness)) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::{pack_rgb565, scale_channel};

    #[test]
    fn rgb565_packing() {
        assert_eq!(pack_rgb565(0, 0, 0), 0x0000);
        assert_eq!(pack_rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(pack_rgb565(255, 0, 0), 0xF800);
        assert_eq!(pack_rgb565(0, 255, 0), 0x07E0);
        assert_eq!(pack_rgb565(0, 0, 255), 0x001F);
    }

    #[test]
    fn brightness_extremes() {
        for c in [0u8, 1, 127, 128, 254, 255] {
            assert_eq!(scale_channel(c, 0), 0);
            assert_eq!(scale_channel(c, 255), c);
        }
    }

    #[test]
    fn brightness_midpoint_rounds_down() {
        assert_eq!(scale_channel(255, 128), 128);
        assert_eq!(scale_channel(100, 128), 50);
    }
}
