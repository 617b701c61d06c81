//! Polygon post-processing: area, simplification, and segment fitting.

use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point as DpPoint;

use crate::geom::{Point, Segment};

/// Absolute shoelace area of a closed polygon.
pub(super) fn polygon_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice.abs() / 2.0
}

/// Douglas-Peucker on a closed polygon.
///
/// The ring is cut at `polygon[0]` and at the vertex farthest from it; each
/// open half is simplified separately so both cut points survive. Results
/// with fewer than three vertices are discarded in favour of the input.
pub(super) fn simplify(polygon: &[Point], tolerance: f64) -> Vec<Point> {
    if tolerance <= 0.0 || polygon.len() <= 3 {
        return polygon.to_vec();
    }

    let origin = polygon[0];
    let far = (1..polygon.len())
        .max_by(|&a, &b| {
            distance_sq(origin, polygon[a]).total_cmp(&distance_sq(origin, polygon[b]))
        })
        .unwrap_or(1);

    let first: Vec<DpPoint<f64>> = polygon[..=far].iter().map(to_dp).collect();
    let second: Vec<DpPoint<f64>> = polygon[far..]
        .iter()
        .chain(std::iter::once(&origin))
        .map(to_dp)
        .collect();

    let mut out = Vec::with_capacity(polygon.len());
    for chain in [first, second] {
        let reduced = approximate_polygon_dp(&chain, tolerance, false);
        // last point of each half is the first point of the next
        out.extend(
            reduced[..reduced.len().saturating_sub(1)]
                .iter()
                .map(|p| Point::new(p.x, p.y)),
        );
    }

    if out.len() < 3 { polygon.to_vec() } else { out }
}

/// One segment per vertex, running between the midpoints of its two edges.
///
/// A vertex turning by more than `corner_angle` degrees becomes a corner;
/// otherwise its corner is rounded by a cubic whose handles sit at `alpha`
/// of the way from each midpoint toward the vertex.
pub(super) fn fit_segments(polygon: &[Point], corner_angle: f64, alpha: f64) -> Vec<Segment> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }

    (0..n)
        .map(|i| {
            let prev = polygon[(i + n - 1) % n];
            let vertex = polygon[i];
            let next = polygon[(i + 1) % n];
            let start = prev.midpoint(vertex);
            let end = vertex.midpoint(next);

            if turn_angle(prev, vertex, next) > corner_angle {
                Segment::Corner { start, vertex, end }
            } else {
                Segment::Curve {
                    start,
                    c1: start.lerp(vertex, alpha),
                    c2: end.lerp(vertex, alpha),
                    end,
                }
            }
        })
        .collect()
}

/// Heading change at `vertex`, in degrees: 0 for straight on, 180 for a U-turn.
fn turn_angle(prev: Point, vertex: Point, next: Point) -> f64 {
    let (ax, ay) = (vertex.x - prev.x, vertex.y - prev.y);
    let (bx, by) = (next.x - vertex.x, next.y - vertex.y);
    if (ax == 0.0 && ay == 0.0) || (bx == 0.0 && by == 0.0) {
        return 180.0;
    }
    let cross = ax * by - ay * bx;
    let dot = ax * bx + ay * by;
    cross.atan2(dot).abs().to_degrees()
}

#[inline]
fn distance_sq(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

#[inline]
fn to_dp(p: &Point) -> DpPoint<f64> {
    DpPoint::new(p.x, p.y)
}
