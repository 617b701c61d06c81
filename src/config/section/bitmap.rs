//! `[bitmap]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [bitmap]
//! threshold = 128    # Pixels darker than this become foreground
//! ```

use serde::{Deserialize, Serialize};

use crate::raster::Threshold;

/// Binarization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitmapConfig {
    /// Intensity cut-off. Values outside `0..=255` are clamped.
    pub threshold: i64,
}

impl Default for BitmapConfig {
    fn default() -> Self {
        Self {
            threshold: i64::from(Threshold::DEFAULT.0),
        }
    }
}

impl BitmapConfig {
    pub fn threshold(&self) -> Threshold {
        Threshold::clamped(self.threshold)
    }
}
