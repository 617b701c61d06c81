//! Raster input: decoding and thresholding.
//!
//! # Modules
//!
//! - [`load`]: PNG decoding into single-channel intensity
//! - [`bitmap`]: packed 1-bit bitmap handed to the tracer
//! - [`binarize`]: intensity → bitmap thresholding
//!
//! ```text
//! PNG bytes ──► RasterImage (luma8) ──► BinaryBitmap (1 bit/pixel)
//! ```

mod binarize;
mod bitmap;
mod load;

pub use binarize::{Threshold, binarize};
pub use bitmap::BinaryBitmap;
pub use load::RasterImage;
