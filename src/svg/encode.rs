use crate::geom::{Contour, Point, Segment};

/// Encode `contour` as path data with coordinates printed verbatim.
///
/// The first segment opens with `M` at its start point; the rest only
/// draw. No closing `Z` is appended: the tracer already ends each outline
/// where it began.
#[allow(dead_code)]
pub fn encode_contour(contour: &Contour) -> String {
    PathEncoder::default().encode(contour)
}

/// Path data writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathEncoder {
    /// Decimal places to round coordinates to; `None` prints `f64` as is.
    pub precision: Option<usize>,
}

impl PathEncoder {
    pub const fn with_precision(precision: Option<usize>) -> Self {
        Self { precision }
    }

    pub fn encode(&self, contour: &Contour) -> String {
        let mut out = String::with_capacity(contour.len() * 32);
        for (i, segment) in contour.segments.iter().enumerate() {
            self.write_segment(&mut out, segment, i == 0);
        }
        out
    }

    fn write_segment(&self, out: &mut String, segment: &Segment, first: bool) {
        if first {
            out.push_str("M ");
            self.write_point(out, segment.start());
            out.push(' ');
        } else {
            out.push(' ');
        }

        match *segment {
            Segment::Corner { vertex, end, .. } => {
                out.push_str("L ");
                self.write_point(out, vertex);
                out.push_str(" L ");
                self.write_point(out, end);
            }
            Segment::Curve { c1, c2, end, .. } => {
                out.push_str("C ");
                self.write_point(out, c1);
                out.push_str(", ");
                self.write_point(out, c2);
                out.push_str(", ");
                self.write_point(out, end);
            }
        }
    }

    fn write_point(&self, out: &mut String, p: Point) {
        self.write_number(out, p.x);
        out.push(' ');
        self.write_number(out, p.y);
    }

    fn write_number(&self, out: &mut String, value: f64) {
        let Some(precision) = self.precision else {
            out.push_str(&value.to_string());
            return;
        };

        let rounded = format!("{value:.precision$}");
        let trimmed = if rounded.contains('.') {
            rounded.trim_end_matches('0').trim_end_matches('.')
        } else {
            rounded.as_str()
        };
        match trimmed {
            "-0" => out.push('0'),
            other => out.push_str(other),
        }
    }
}
