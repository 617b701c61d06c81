//! Suzuki-Abe border following via `imageproc::contours::find_contours`.

use imageproc::contours::{BorderType, Contour as Border, find_contours};

use crate::geom::{Orientation, Point};
use crate::raster::BinaryBitmap;

/// Trace pixel borders of `bitmap`.
///
/// Border points are integer pixel positions; they are shifted to pixel
/// centres. Borders of fewer than three points (isolated pixels, one-pixel
/// slivers) cannot form a polygon and are skipped.
pub(super) fn trace_borders(bitmap: &BinaryBitmap) -> Vec<(Vec<Point>, Orientation)> {
    let borders: Vec<Border<i32>> = find_contours(&bitmap.to_mask());

    borders
        .into_iter()
        .filter(|border| border.points.len() >= 3)
        .map(|border| {
            let orientation = match border.border_type {
                BorderType::Outer => Orientation::Outer,
                BorderType::Hole => Orientation::Hole,
            };
            let polygon = border
                .points
                .into_iter()
                .map(|p| Point::new(f64::from(p.x) + 0.5, f64::from(p.y) + 0.5))
                .collect();
            (polygon, orientation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bitmap() {
        assert!(trace_borders(&BinaryBitmap::new(4, 4)).is_empty());
    }

    #[test]
    fn test_block_points_on_pixel_centres() {
        let mut bm = BinaryBitmap::new(6, 6);
        for y in 1..5 {
            for x in 1..5 {
                bm.set(x, y, true);
            }
        }
        let borders = trace_borders(&bm);

        assert_eq!(borders.len(), 1);
        let (polygon, orientation) = &borders[0];
        assert_eq!(*orientation, Orientation::Outer);
        for p in polygon {
            assert_eq!(p.x.fract(), 0.5);
            assert_eq!(p.y.fract(), 0.5);
            assert!((1.5..=4.5).contains(&p.x) && (1.5..=4.5).contains(&p.y));
        }
    }

    #[test]
    fn test_isolated_pixel_skipped() {
        let mut bm = BinaryBitmap::new(3, 3);
        bm.set(1, 1, true);
        assert!(trace_borders(&bm).is_empty());
    }
}
