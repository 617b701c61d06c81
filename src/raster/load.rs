use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat};

/// Decoded image reduced to 8-bit intensity.
///
/// Immutable once built; the pipeline owns it for one conversion.
#[derive(Debug, Clone)]
pub struct RasterImage {
    luma: GrayImage,
}

impl RasterImage {
    /// Decode PNG bytes and convert to luma.
    ///
    /// Colour images go through `image`'s luma conversion; any alpha channel
    /// is dropped without compositing.
    pub fn decode_png(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .context("not a decodable PNG image")?;
        Ok(Self {
            luma: img.to_luma8(),
        })
    }

    #[cfg(test)]
    pub fn from_luma(luma: GrayImage) -> Self {
        Self { luma }
    }

    pub fn width(&self) -> u32 {
        self.luma.width()
    }

    pub fn height(&self) -> u32 {
        self.luma.height()
    }

    /// Row-major intensity samples.
    pub fn as_raw(&self) -> &[u8] {
        self.luma.as_raw()
    }
}
