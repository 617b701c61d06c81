use anyhow::{Result, ensure};
use image::{GrayImage, Luma};

/// Bilevel bitmap, packed 1 bit per pixel.
///
/// Rows are stored top to bottom, each padded to a whole byte, most
/// significant bit first. A set bit marks a foreground pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBitmap {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl BinaryBitmap {
    /// All-background bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        }
    }

    /// Wrap already-packed row data.
    #[allow(dead_code)]
    pub fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let stride = (width as usize).div_ceil(8);
        let expected = stride * height as usize;
        ensure!(
            data.len() == expected,
            "packed bitmap length mismatch: got {} bytes, {}x{} needs {}",
            data.len(),
            width,
            height,
            expected
        );
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    #[allow(dead_code)]
    pub fn as_packed(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn locate(&self, x: u32, y: u32) -> (usize, u8) {
        let index = y as usize * self.stride + (x as usize >> 3);
        (index, 0x80 >> (x & 7))
    }

    /// Foreground test; coordinates outside the bitmap read as background.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return false;
        }
        let (index, mask) = self.locate(x as u32, y as u32);
        self.data[index] & mask != 0
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, foreground: bool) {
        debug_assert!(x < self.width && y < self.height);
        let (index, mask) = self.locate(x, y);
        if foreground {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }

    #[inline]
    pub fn toggle(&mut self, x: u32, y: u32) {
        let (index, mask) = self.locate(x, y);
        self.data[index] ^= mask;
    }

    pub fn count_foreground(&self) -> usize {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .filter(|&x| self.get(i64::from(x), i64::from(y)))
                    .count()
            })
            .sum()
    }

    /// Foreground as 255, background as 0.
    pub fn to_mask(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.get(i64::from(x), i64::from(y)) {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }
}
