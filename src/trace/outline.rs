//! Pixel-edge boundary following.
//!
//! Outlines run along the pixel-corner lattice: vertex `(x, y)` is the
//! top-left corner of pixel `(x, y)`, with y growing downward. Each outline
//! is walked with foreground on its right; afterwards every pixel it
//! encloses is inverted in a working copy, which erases the shape and turns
//! its holes into foreground for the next scan.

use crate::geom::{Orientation, Point};
use crate::raster::BinaryBitmap;

use super::TurnPolicy;

/// Unit step along the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Heading {
    dx: i64,
    dy: i64,
}

impl Heading {
    const EAST: Self = Self { dx: 1, dy: 0 };

    #[inline]
    const fn left(self) -> Self {
        Self {
            dx: self.dy,
            dy: -self.dx,
        }
    }

    #[inline]
    const fn right(self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    /// Pixel ahead of vertex `(x, y)` on the left of this heading.
    #[inline]
    const fn ahead_left(self, x: i64, y: i64) -> (i64, i64) {
        (
            x + (self.dx + self.dy - 1) / 2,
            y + (self.dy - self.dx - 1) / 2,
        )
    }

    /// Pixel ahead of vertex `(x, y)` on the right of this heading.
    #[inline]
    const fn ahead_right(self, x: i64, y: i64) -> (i64, i64) {
        (
            x + (self.dx - self.dy - 1) / 2,
            y + (self.dy + self.dx - 1) / 2,
        )
    }
}

/// Trace every outline of `bitmap` as a lattice polygon.
///
/// Polygons list only the vertices where the heading changes.
pub(super) fn trace_outlines(
    bitmap: &BinaryBitmap,
    policy: TurnPolicy,
) -> Vec<(Vec<Point>, Orientation)> {
    let mut work = bitmap.clone();
    let mut polygons = Vec::new();
    let mut cursor = (0, 0);

    while let Some((x, y)) = find_next(&work, cursor) {
        let orientation = if bitmap.get(x, y) {
            Orientation::Outer
        } else {
            Orientation::Hole
        };
        let vertices = follow(&work, (x, y), orientation, policy);
        invert_interior(&mut work, &vertices);

        let polygon = vertices
            .iter()
            .map(|&(vx, vy)| Point::new(vx as f64, vy as f64))
            .collect();
        polygons.push((polygon, orientation));
        cursor = (x, y);
    }
    polygons
}

/// First foreground pixel at or after `from` in row-major order.
///
/// Everything before `from` is already background: inverting an outline
/// never touches pixels ahead of its starting pixel.
fn find_next(work: &BinaryBitmap, from: (i64, i64)) -> Option<(i64, i64)> {
    let width = i64::from(work.width());
    let height = i64::from(work.height());
    let (fx, fy) = from;

    (fy..height)
        .flat_map(|y| {
            let x0 = if y == fy { fx } else { 0 };
            (x0..width).map(move |x| (x, y))
        })
        .find(|&(x, y)| work.get(x, y))
}

/// Walk one outline starting at the top-left corner of pixel `start`.
fn follow(
    work: &BinaryBitmap,
    start: (i64, i64),
    orientation: Orientation,
    policy: TurnPolicy,
) -> Vec<(i64, i64)> {
    let (x0, y0) = start;
    let (mut x, mut y) = start;
    let mut heading = Heading::EAST;
    let mut vertices = vec![start];

    loop {
        x += heading.dx;
        y += heading.dy;
        if (x, y) == (x0, y0) {
            break;
        }

        let (lx, ly) = heading.ahead_left(x, y);
        let (rx, ry) = heading.ahead_right(x, y);
        let left = work.get(lx, ly);
        let right = work.get(rx, ry);

        let next = if left && (right || joins_foreground(policy, orientation, work, x, y)) {
            heading.left()
        } else if !right {
            heading.right()
        } else {
            heading
        };

        if next != heading {
            vertices.push((x, y));
            heading = next;
        }
    }
    vertices
}

/// Whether an ambiguous diagonal at vertex `(x, y)` should connect the
/// foreground pixels of `work`.
fn joins_foreground(
    policy: TurnPolicy,
    orientation: Orientation,
    work: &BinaryBitmap,
    x: i64,
    y: i64,
) -> bool {
    match policy {
        TurnPolicy::Black => orientation == Orientation::Outer,
        TurnPolicy::White => orientation == Orientation::Hole,
        TurnPolicy::Left => true,
        TurnPolicy::Right => false,
        TurnPolicy::Majority => foreground_dominates(work, x, y),
        TurnPolicy::Minority => !foreground_dominates(work, x, y),
    }
}

/// Vote over square rings of growing radius around vertex `(x, y)`.
///
/// The first ring with a strict majority decides; a tie on every ring
/// counts as background.
fn foreground_dominates(work: &BinaryBitmap, x: i64, y: i64) -> bool {
    for radius in 2..5 {
        let (left, right) = (x - radius, x + radius - 1);
        let (top, bottom) = (y - radius, y + radius - 1);

        let mut votes = 0i32;
        for py in top..=bottom {
            for px in left..=right {
                let on_ring = px == left || px == right || py == top || py == bottom;
                if on_ring {
                    votes += if work.get(px, py) { 1 } else { -1 };
                }
            }
        }
        if votes != 0 {
            return votes > 0;
        }
    }
    false
}

/// Invert every pixel enclosed by the lattice polygon `vertices`.
///
/// Each vertical edge flips its rows from the edge to the right border;
/// pixels right of an even number of edges flip back.
fn invert_interior(work: &mut BinaryBitmap, vertices: &[(i64, i64)]) {
    let width = work.width();
    let n = vertices.len();
    for i in 0..n {
        let (ax, ay) = vertices[i];
        let (bx, by) = vertices[(i + 1) % n];
        if ax != bx || ay == by {
            continue;
        }
        for row in ay.min(by)..ay.max(by) {
            for px in ax..i64::from(width) {
                work.toggle(px as u32, row as u32);
            }
        }
    }
}
