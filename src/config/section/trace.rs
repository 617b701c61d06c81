//! `[trace]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [trace]
//! tracer = "outline"          # "outline" (pixel edges) or "border" (pixel centres)
//! turn_policy = "minority"    # black | white | left | right | minority | majority
//! turd_size = 2               # Drop outlines enclosing at most this many pixels
//! tolerance = 1.0             # Douglas-Peucker tolerance, 0 keeps every vertex
//! corner_angle = 60.0         # Sharper turns (degrees) stay corners
//! alpha = 0.667               # Curve handle position toward the vertex
//! ```

use serde::{Deserialize, Serialize};

use crate::trace::{TraceOptions, TracerKind, TurnPolicy};

/// Tracer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub tracer: TracerKind,
    pub turn_policy: TurnPolicy,
    pub turd_size: u32,
    pub tolerance: f64,
    pub corner_angle: f64,
    pub alpha: f64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        let defaults = TraceOptions::default();
        Self {
            tracer: defaults.tracer,
            turn_policy: defaults.turn_policy,
            turd_size: defaults.turd_size,
            tolerance: defaults.tolerance,
            corner_angle: defaults.corner_angle,
            alpha: defaults.alpha,
        }
    }
}

impl TraceConfig {
    pub fn to_options(&self) -> TraceOptions {
        TraceOptions {
            tracer: self.tracer,
            turn_policy: self.turn_policy,
            turd_size: self.turd_size,
            tolerance: self.tolerance,
            corner_angle: self.corner_angle,
            alpha: self.alpha,
        }
    }
}
