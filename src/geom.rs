//! Geometry shared by the tracer and the SVG encoder.
//!
//! Coordinates live in the bitmap's pixel space (x right, y down) and are
//! never rescaled.

/// A real-valued coordinate in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint of the segment `self`-`other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// One piece of a traced outline.
///
/// The drawing start of every segment except a contour's first is the
/// previous segment's `end`; `start` is only written out for the first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Two straight edges meeting at `vertex`.
    Corner { start: Point, vertex: Point, end: Point },
    /// One cubic Bezier arc.
    Curve {
        start: Point,
        c1: Point,
        c2: Point,
        end: Point,
    },
}

impl Segment {
    pub const fn start(&self) -> Point {
        match *self {
            Self::Corner { start, .. } | Self::Curve { start, .. } => start,
        }
    }

    pub const fn end(&self) -> Point {
        match *self {
            Self::Corner { end, .. } | Self::Curve { end, .. } => end,
        }
    }

    pub const fn is_corner(&self) -> bool {
        matches!(self, Self::Corner { .. })
    }
}

/// Whether an outline bounds foreground (outer) or a knocked-out region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Outer,
    Hole,
}

/// One closed outline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contour {
    pub segments: Vec<Segment>,
    pub orientation: Orientation,
}

impl Contour {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            orientation: Orientation::Outer,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Number of `Curve` segments.
    pub fn curve_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.is_corner()).count()
    }

    /// True when the last segment ends where the first begins.
    pub fn is_closed(&self) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => first.start() == last.end(),
            _ => false,
        }
    }
}
