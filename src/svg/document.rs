use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::PathEncoder;
use crate::geom::Contour;

/// How contours are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    /// One solid black `<path>` per contour; holes render filled.
    #[default]
    Solid,
    /// A single compound `<path>` with `fill-rule="evenodd"`; holes are knocked out.
    #[value(name = "evenodd")]
    EvenOdd,
}

/// Minimal SVG document sized to the source bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    pub width: u32,
    pub height: u32,
    /// Path data, one entry per contour, in traversal order.
    pub paths: Vec<String>,
    pub fill_rule: FillRule,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            paths: Vec::new(),
            fill_rule: FillRule::Solid,
        }
    }

    /// Encode `contours` and collect them into a document.
    pub fn from_contours(
        width: u32,
        height: u32,
        contours: &[Contour],
        encoder: &PathEncoder,
    ) -> Self {
        Self {
            paths: contours.iter().map(|c| encoder.encode(c)).collect(),
            ..Self::new(width, height)
        }
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Serialize to SVG text. The output has no trailing newline.
    ///
    /// Writing into a `String` never fails, so the `fmt::Result`s are unwrapped.
    pub fn render(&self) -> String {
        let body: usize = self.paths.iter().map(|p| p.len() + 32).sum();
        let mut out = String::with_capacity(body + 192);

        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        writeln!(
            out,
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">",
            w = self.width,
            h = self.height,
        )
        .unwrap();

        match self.fill_rule {
            FillRule::Solid => {
                for d in &self.paths {
                    writeln!(out, "  <path d=\"{d}\" fill=\"black\"/>").unwrap();
                }
            }
            FillRule::EvenOdd => {
                if !self.paths.is_empty() {
                    let d = self.paths.join(" ");
                    writeln!(out, "  <path d=\"{d}\" fill=\"black\" fill-rule=\"evenodd\"/>")
                        .unwrap();
                }
            }
        }

        out.push_str("</svg>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Segment};

    fn square(x: f64, y: f64, size: f64) -> Contour {
        let p = |dx: f64, dy: f64| Point::new(x + dx, y + dy);
        Contour::new(vec![
            Segment::Corner {
                start: p(0.0, 0.0),
                vertex: p(size, 0.0),
                end: p(size, size),
            },
            Segment::Corner {
                start: p(size, size),
                vertex: p(0.0, size),
                end: p(0.0, 0.0),
            },
        ])
    }

    #[test]
    fn test_empty_document() {
        let doc = SvgDocument::new(2, 2).render();
        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg width=\"2\" height=\"2\" viewBox=\"0 0 2 2\" xmlns=\"http://www.w3.org/2000/svg\">\n\
             </svg>"
        );
    }

    #[test]
    fn test_one_path_per_contour() {
        let contours = [square(0.0, 0.0, 1.0), square(2.0, 2.0, 1.0)];
        let doc = SvgDocument::from_contours(4, 3, &contours, &PathEncoder::default()).render();

        assert!(doc.contains("viewBox=\"0 0 4 3\""));
        assert_eq!(doc.matches("<path ").count(), 2);
        assert!(doc.contains("  <path d=\"M 0 0 L 1 0 L 1 1 L 0 1 L 0 0\" fill=\"black\"/>\n"));
        let first = doc.find("M 0 0").unwrap();
        let second = doc.find("M 2 2").unwrap();
        assert!(first < second);
        assert!(doc.ends_with("</svg>"));
    }

    #[test]
    fn test_even_odd_merges_paths() {
        let contours = [square(0.0, 0.0, 4.0), square(1.0, 1.0, 2.0)];
        let doc = SvgDocument::from_contours(4, 4, &contours, &PathEncoder::default())
            .with_fill_rule(FillRule::EvenOdd)
            .render();

        assert_eq!(doc.matches("<path ").count(), 1);
        assert!(doc.contains("fill-rule=\"evenodd\""));
        assert!(doc.contains("L 0 0 M 1 1"));
    }

    #[test]
    fn test_even_odd_without_contours() {
        let doc = SvgDocument::new(1, 1)
            .with_fill_rule(FillRule::EvenOdd)
            .render();
        assert!(!doc.contains("<path"));
    }

    #[test]
    fn test_parses_as_svg_with_source_size() {
        for (w, h) in [(1, 1), (7, 3), (640, 480)] {
            let contours = [square(0.0, 0.0, 1.0)];
            let text = SvgDocument::from_contours(w, h, &contours, &PathEncoder::default()).render();
            let tree = usvg::Tree::from_str(&text, &usvg::Options::default()).unwrap();
            assert_eq!(tree.size().width(), w as f32);
            assert_eq!(tree.size().height(), h as f32);
        }
    }
}
