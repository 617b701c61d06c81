use super::{BinaryBitmap, RasterImage};

/// Intensity cutoff: pixels strictly darker than it become foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(pub u8);

impl Threshold {
    pub const DEFAULT: Self = Self(128);

    /// Clamp an arbitrary integer into `0..=255`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 255) as u8)
    }

    #[inline]
    pub const fn is_foreground(self, intensity: u8) -> bool {
        intensity < self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Threshold `raster` into a bitmap of identical dimensions.
///
/// `T = 0` yields an all-background bitmap; at `T = 255` only pure white
/// stays background.
pub fn binarize(raster: &RasterImage, threshold: Threshold) -> BinaryBitmap {
    let width = raster.width();
    let mut bitmap = BinaryBitmap::new(width, raster.height());
    if width == 0 {
        return bitmap;
    }

    for (y, row) in raster.as_raw().chunks_exact(width as usize).enumerate() {
        for (x, &intensity) in row.iter().enumerate() {
            if threshold.is_foreground(intensity) {
                bitmap.set(x as u32, y as u32, true);
            }
        }
    }
    bitmap
}
