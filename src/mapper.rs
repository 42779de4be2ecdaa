//! Source-to-device coordinate mapping.

/// Physical dimensions of the LED matrix, in pixels.
///
/// Decoded pixels already arrive in device row order (BMP stores rows
/// bottom-up, and row `height-1` is drawn first), so mapping is a pure
/// bounds check: anything outside the panel is dropped, never faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixGeometry {
    pub width: u32,
    pub height: u32,
}

impl MatrixGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Map a source pixel to a device coordinate, or `None` when it falls
    /// off the panel.
    pub fn map(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        if x < self.width && y < self.height {
            Some((x, y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MatrixGeometry;

    #[test]
    fn in_bounds_maps_identity() {
        let geo = MatrixGeometry::new(64, 32);
        assert_eq!(geo.map(0, 0), Some((0, 0)));
        assert_eq!(geo.map(63, 31), Some((63, 31)));
    }

    #[test]
    fn out_of_bounds_is_dropped() {
        let geo = MatrixGeometry::new(64, 32);
        assert_eq!(geo.map(64, 0), None);
        assert_eq!(geo.map(0, 32), None);
        assert_eq!(geo.map(1000, 1000), None);
    }
}
