//! Bitmap tracing: 1-bit bitmap → closed outlines of corner/curve segments.
//!
//! The pipeline only depends on the [`Tracer`] trait, so callers can plug in
//! any tracing backend (or synthetic fixtures in tests). The built-in
//! backend works in two stages:
//!
//! ```text
//! BinaryBitmap
//!      │
//!      ▼
//! ┌──────────┐   outline: pixel-edge boundary following (default)
//! │ polygons │   border:  Suzuki-Abe border following (imageproc)
//! └────┬─────┘
//!      │  despeckle (turd_size), Douglas-Peucker (tolerance)
//!      ▼
//! ┌──────────┐
//! │   fit    │ ──► Corner / Curve per polygon vertex
//! └──────────┘
//! ```

mod border;
mod fit;
mod outline;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::geom::{Contour, Orientation, Point};
use crate::raster::BinaryBitmap;

/// Turns a bitmap into contours.
pub trait Tracer {
    /// Trace every outline in `bitmap`, in discovery order.
    fn trace(&self, bitmap: &BinaryBitmap) -> Result<Vec<Contour>>;
}

/// Which polygon extractor the built-in tracer runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TracerKind {
    /// Follow pixel edges; vertices land on pixel corners.
    #[default]
    Outline,
    /// Suzuki-Abe border following; vertices land on pixel centres.
    Border,
}

/// How the outline tracer resolves two diagonally touching pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TurnPolicy {
    /// Always join foreground pixels.
    Black,
    /// Always join background pixels.
    White,
    /// Always turn left, which joins the pixels being walked around.
    Left,
    /// Always turn right, which separates them.
    Right,
    /// Join whichever colour is locally rarer.
    #[default]
    Minority,
    /// Join whichever colour is locally dominant.
    Majority,
}

/// Knobs for the built-in tracer.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOptions {
    pub tracer: TracerKind,
    pub turn_policy: TurnPolicy,
    /// Outlines enclosing at most this many pixels are dropped.
    pub turd_size: u32,
    /// Douglas-Peucker tolerance in pixels; `0` keeps every vertex.
    pub tolerance: f64,
    /// Turns sharper than this (degrees) stay corners; gentler ones become curves.
    pub corner_angle: f64,
    /// Curve handle position, as a fraction of the way toward the vertex.
    pub alpha: f64,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            tracer: TracerKind::Outline,
            turn_policy: TurnPolicy::Minority,
            turd_size: 2,
            tolerance: 1.0,
            corner_angle: 60.0,
            alpha: 2.0 / 3.0,
        }
    }
}

impl TraceOptions {
    /// Options that keep the raw pixel polygon: no despeckle, no
    /// simplification, corners everywhere.
    #[cfg(test)]
    pub fn exact() -> Self {
        Self {
            turd_size: 0,
            tolerance: 0.0,
            corner_angle: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tolerance.is_finite() && self.tolerance >= 0.0,
            "tolerance must be a non-negative number, got {}",
            self.tolerance
        );
        ensure!(
            (0.0..=180.0).contains(&self.corner_angle),
            "corner_angle must be within 0..=180 degrees, got {}",
            self.corner_angle
        );
        ensure!(
            self.alpha > 0.0 && self.alpha <= 1.0,
            "alpha must be within (0, 1], got {}",
            self.alpha
        );
        Ok(())
    }
}

/// The tracer shipped with the binary.
#[derive(Debug, Clone, Default)]
pub struct BuiltinTracer {
    options: TraceOptions,
}

impl BuiltinTracer {
    pub fn new(options: TraceOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    fn polygons(&self, bitmap: &BinaryBitmap) -> Vec<(Vec<Point>, Orientation)> {
        match self.options.tracer {
            TracerKind::Outline => outline::trace_outlines(bitmap, self.options.turn_policy),
            TracerKind::Border => border::trace_borders(bitmap),
        }
    }
}

impl Tracer for BuiltinTracer {
    fn trace(&self, bitmap: &BinaryBitmap) -> Result<Vec<Contour>> {
        let opts = &self.options;
        let contours = self
            .polygons(bitmap)
            .into_iter()
            .filter(|(polygon, _)| fit::polygon_area(polygon) > f64::from(opts.turd_size))
            .map(|(polygon, orientation)| {
                let polygon = fit::simplify(&polygon, opts.tolerance);
                Contour::new(fit::fit_segments(&polygon, opts.corner_angle, opts.alpha))
                    .with_orientation(orientation)
            })
            .filter(|contour| !contour.is_empty())
            .inspect(|contour| debug_assert!(contour.is_closed()))
            .collect();
        Ok(contours)
    }
}
