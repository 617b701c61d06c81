//! Converter configuration from `png2svg.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [bitmap], [trace], [svg]
//! ├── error          # ConfigError
//! ├── util           # find_config_file
//! └── mod.rs         # Config (this file)
//! ```
//!
//! The file is optional. Every value resolves as
//! CLI flag > config file > built-in default.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{BitmapConfig, SvgConfig, TraceConfig};

use util::find_config_file;

use crate::{
    cli::{Cli, TraceArgs},
    log,
    pipeline::ConvertOptions,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing png2svg.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub bitmap: BitmapConfig,

    #[serde(default)]
    pub trace: TraceConfig,

    #[serde(default)]
    pub svg: SvgConfig,
}

impl Config {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for `cli.config`; a missing file means
    /// defaults. Command-line flags are applied on top.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cwd, &cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => Self::default(),
        };

        config.apply_cli(cli.threshold(), cli.trace_args());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Overlay command-line values that were actually given.
    pub fn apply_cli(&mut self, threshold: Option<i64>, args: &TraceArgs) {
        if let Some(threshold) = threshold {
            self.bitmap.threshold = threshold;
        }

        let trace = &mut self.trace;
        if let Some(tracer) = args.tracer {
            trace.tracer = tracer;
        }
        if let Some(policy) = args.turn_policy {
            trace.turn_policy = policy;
        }
        if let Some(turd_size) = args.turd_size {
            trace.turd_size = turd_size;
        }
        if let Some(tolerance) = args.tolerance {
            trace.tolerance = tolerance;
        }
        if let Some(angle) = args.corner_angle {
            trace.corner_angle = angle;
        }
        if let Some(alpha) = args.alpha {
            trace.alpha = alpha;
        }

        if let Some(fill_rule) = args.fill_rule {
            self.svg.fill_rule = fill_rule;
        }
        if args.precision.is_some() {
            self.svg.precision = args.precision;
        }
    }

    /// Check value ranges the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        self.trace
            .to_options()
            .validate()
            .map_err(|err| ConfigError::Validation(format!("[trace] {err}")))?;
        Ok(())
    }

    /// Resolved options for the conversion pipeline.
    pub fn to_convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            threshold: self.bitmap.threshold(),
            trace: self.trace.to_options(),
            fill_rule: self.svg.fill_rule,
            precision: self.svg.precision,
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
