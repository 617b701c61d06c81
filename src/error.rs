//! Conversion error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why a PNG → SVG conversion did not produce a file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unsupported input `{}`: {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// Tracing, encoding, or writing failed; carries the full cause chain.
    #[error("conversion failed: {0}")]
    Conversion(String),
}

impl ConvertError {
    pub fn unsupported(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap any stage failure, keeping every `context` layer in the message.
    pub fn conversion(err: &anyhow::Error) -> Self {
        Self::Conversion(format!("{err:#}"))
    }
}
