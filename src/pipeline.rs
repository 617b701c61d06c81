//! One-shot PNG → SVG conversion.
//!
//! ```text
//! load ──► binarize ──► trace ──► encode × N ──► emit
//! ```
//!
//! [`convert_bytes`] is the pure core: the same bytes and options always
//! give the same SVG text. [`convert_file`] adds the file-system edges:
//! input checks, default output naming, and an atomic write.

use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::debug;
use crate::error::ConvertError;
use crate::geom::Orientation;
use crate::raster::{RasterImage, Threshold, binarize};
use crate::svg::{FillRule, PathEncoder, SvgDocument};
use crate::trace::{BuiltinTracer, TraceOptions, Tracer};

/// Everything that shapes one conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    pub threshold: Threshold,
    pub trace: TraceOptions,
    pub fill_rule: FillRule,
    /// Decimal places for coordinates; `None` writes them verbatim.
    pub precision: Option<usize>,
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub width: u32,
    pub height: u32,
    pub contours: usize,
    /// Contours bounding a knocked-out region.
    pub holes: usize,
    pub corners: usize,
    pub curves: usize,
}

/// Convert PNG bytes to SVG text.
#[allow(dead_code)]
pub fn convert_bytes(
    bytes: &[u8],
    options: &ConvertOptions,
    tracer: &dyn Tracer,
) -> Result<String, ConvertError> {
    convert_bytes_with_report(bytes, options, tracer).map(|(svg, _)| svg)
}

/// [`convert_bytes`], also returning what was traced.
pub fn convert_bytes_with_report(
    bytes: &[u8],
    options: &ConvertOptions,
    tracer: &dyn Tracer,
) -> Result<(String, ConvertReport), ConvertError> {
    let raster = RasterImage::decode_png(bytes)
        .map_err(|err| ConvertError::unsupported(PathBuf::new(), format!("{err:#}")))?;

    let bitmap = binarize(&raster, options.threshold);
    debug!("convert"; "{}x{} bitmap, {} foreground pixels at threshold {}",
        bitmap.width(), bitmap.height(), bitmap.count_foreground(), options.threshold.0);

    let contours = tracer
        .trace(&bitmap)
        .context("trace failed")
        .map_err(|err| ConvertError::conversion(&err))?;

    let encoder = PathEncoder::with_precision(options.precision);
    let document = SvgDocument::from_contours(bitmap.width(), bitmap.height(), &contours, &encoder)
        .with_fill_rule(options.fill_rule);

    let curves = contours.iter().map(|c| c.curve_count()).sum();
    let segments: usize = contours.iter().map(|c| c.len()).sum();
    let report = ConvertReport {
        width: bitmap.width(),
        height: bitmap.height(),
        contours: contours.len(),
        holes: contours
            .iter()
            .filter(|c| c.orientation == Orientation::Hole)
            .count(),
        corners: segments - curves,
        curves,
    };

    Ok((document.render(), report))
}

/// Convert the PNG at `input` with the built-in tracer.
///
/// Returns the path written, `<input-stem>.svg` beside the input unless
/// `output` is given.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<PathBuf, ConvertError> {
    let tracer = BuiltinTracer::new(options.trace.clone())
        .map_err(|err| ConvertError::conversion(&err))?;
    convert_file_with(input, output, options, &tracer).map(|(path, _)| path)
}

/// [`convert_file`] with a caller-supplied tracer.
pub fn convert_file_with(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
    tracer: &dyn Tracer,
) -> Result<(PathBuf, ConvertReport), ConvertError> {
    check_input(input)?;
    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);

    let bytes = fs::read(input)
        .with_context(|| format!("failed to read `{}`", input.display()))
        .map_err(|err| ConvertError::conversion(&err))?;
    let (svg, report) =
        convert_bytes_with_report(&bytes, options, tracer).map_err(|err| err.at(input))?;

    write_atomic(&output, svg.as_bytes()).map_err(|err| ConvertError::conversion(&err))?;
    debug!("convert"; "{} -> {} ({} contours)", input.display(), output.display(), report.contours);
    Ok((output, report))
}

/// `dir/name.png` → `dir/name.svg`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("svg")
}

/// Existence and extension checks; nothing is read or written yet.
fn check_input(input: &Path) -> Result<(), ConvertError> {
    if !input.exists() {
        return Err(ConvertError::FileNotFound(input.to_path_buf()));
    }
    let is_png = input
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(ConvertError::unsupported(input, "input must be a .png file"));
    }
    Ok(())
}

/// Write through a temp file in the destination directory, then rename.
///
/// A failed write leaves any existing `path` untouched.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory `{}`", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in `{}`", dir.display()))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.flush())
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    Ok(())
}

impl ConvertError {
    /// Attach the input path to a format error raised on raw bytes.
    fn at(self, input: &Path) -> Self {
        match self {
            Self::UnsupportedFormat { reason, .. } => Self::unsupported(input, reason),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Contour, Point, Segment};
    use crate::raster::BinaryBitmap;
    use image::{GrayImage, ImageFormat, Luma};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png_bytes(img: &GrayImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn write_png(dir: &Path, name: &str, img: &GrayImage) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, png_bytes(img)).unwrap();
        path
    }

    /// Returns the same fixture regardless of input.
    struct FixedTracer(Vec<Contour>);

    impl Tracer for FixedTracer {
        fn trace(&self, _: &BinaryBitmap) -> Result<Vec<Contour>> {
            Ok(self.0.clone())
        }
    }

    struct FailingTracer;

    impl Tracer for FailingTracer {
        fn trace(&self, _: &BinaryBitmap) -> Result<Vec<Contour>> {
            anyhow::bail!("backend exploded")
        }
    }

    #[test]
    fn test_white_image_has_no_paths() {
        let white = GrayImage::from_pixel(2, 2, Luma([255]));
        let svg = convert_bytes(
            &png_bytes(&white),
            &ConvertOptions::default(),
            &BuiltinTracer::default(),
        )
        .unwrap();

        assert_eq!(
            svg,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg width=\"2\" height=\"2\" viewBox=\"0 0 2 2\" xmlns=\"http://www.w3.org/2000/svg\">\n\
             </svg>"
        );
    }

    #[test]
    fn test_injected_tracer_output_is_encoded() {
        let contour = Contour::new(vec![Segment::Corner {
            start: Point::new(0.0, 0.0),
            vertex: Point::new(1.0, 0.0),
            end: Point::new(1.0, 1.0),
        }]);
        let tracer = FixedTracer(vec![contour]);
        let img = GrayImage::from_pixel(3, 5, Luma([0]));

        let (svg, report) =
            convert_bytes_with_report(&png_bytes(&img), &ConvertOptions::default(), &tracer)
                .unwrap();
        assert!(svg.contains("width=\"3\" height=\"5\" viewBox=\"0 0 3 5\""));
        assert!(svg.contains("  <path d=\"M 0 0 L 1 0 L 1 1\" fill=\"black\"/>\n"));
        assert_eq!(report.contours, 1);
        assert_eq!(report.corners, 1);
        assert_eq!(report.curves, 0);
    }

    #[test]
    fn test_black_square_traced_end_to_end() {
        let mut img = GrayImage::from_pixel(4, 4, Luma([255]));
        for y in 1..3 {
            for x in 1..3 {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        let options = ConvertOptions {
            trace: TraceOptions::exact(),
            ..ConvertOptions::default()
        };
        let tracer = BuiltinTracer::new(options.trace.clone()).unwrap();
        let svg = convert_bytes(&png_bytes(&img), &options, &tracer).unwrap();

        assert_eq!(svg.matches("<path ").count(), 1);
        assert!(svg.contains("d=\"M 1 2 L 1 1 L 2 1 L 3 1 L 3 2 L 3 3 L 2 3 L 1 3 L 1 2\""));
    }

    #[test]
    fn test_deterministic_output() {
        let mut img = GrayImage::from_pixel(12, 12, Luma([255]));
        for (x, y) in [(2, 2), (3, 2), (4, 3), (5, 5), (6, 5), (6, 6), (9, 9)] {
            img.put_pixel(x, y, Luma([10]));
        }
        let bytes = png_bytes(&img);
        let tracer = BuiltinTracer::default();
        let a = convert_bytes(&bytes, &ConvertOptions::default(), &tracer).unwrap();
        let b = convert_bytes(&bytes, &ConvertOptions::default(), &tracer).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tracer_failure_is_conversion_error() {
        let img = GrayImage::from_pixel(1, 1, Luma([0]));
        let err = convert_bytes(&png_bytes(&img), &ConvertOptions::default(), &FailingTracer)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Conversion(_)));
        assert_eq!(
            err.to_string(),
            "conversion failed: trace failed: backend exploded"
        );
    }

    #[test]
    fn test_undecodable_bytes_are_unsupported() {
        let err = convert_bytes(b"GIF89a", &ConvertOptions::default(), &BuiltinTracer::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_convert_file_default_output() {
        let dir = TempDir::new().unwrap();
        let input = write_png(dir.path(), "logo.png", &GrayImage::from_pixel(2, 2, Luma([255])));

        let written = convert_file(&input, None, &ConvertOptions::default()).unwrap();
        assert_eq!(written, dir.path().join("logo.svg"));
        let svg = fs::read_to_string(&written).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_convert_file_overwrites_and_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let input = write_png(dir.path(), "dot.PNG", &GrayImage::from_pixel(3, 3, Luma([0])));
        let output = dir.path().join("out/nested/dot.svg");

        convert_file(&input, Some(&output), &ConvertOptions::default()).unwrap();
        fs::write(&output, "stale").unwrap();
        convert_file(&input, Some(&output), &ConvertOptions::default()).unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<path "));
        let leftovers = fs::read_dir(output.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_unreadable_input_is_conversion_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("folder.png");
        fs::create_dir(&input).unwrap();

        let err = convert_file(&input, None, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Conversion(_)));
        assert!(err.to_string().starts_with("conversion failed: failed to read"));
        assert!(!dir.path().join("folder.svg").exists());
    }

    #[test]
    fn test_report_counts_holes() {
        let mut img = GrayImage::from_pixel(5, 5, Luma([255]));
        for y in 1..4 {
            for x in 1..4 {
                if (x, y) != (2, 2) {
                    img.put_pixel(x, y, Luma([0]));
                }
            }
        }
        let options = ConvertOptions {
            trace: TraceOptions::exact(),
            ..ConvertOptions::default()
        };
        let tracer = BuiltinTracer::new(options.trace.clone()).unwrap();
        let (_, report) = convert_bytes_with_report(&png_bytes(&img), &options, &tracer).unwrap();
        assert_eq!(report.contours, 2);
        assert_eq!(report.holes, 1);
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let err = convert_file(&dir.path().join("nope.png"), None, &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound(_)));
    }

    #[test]
    fn test_jpg_rejected_before_writing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("photo.jpg");
        fs::write(&input, png_bytes(&GrayImage::new(2, 2))).unwrap();

        let err = convert_file(&input, None, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
        assert!(!dir.path().join("photo.svg").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_corrupt_png_names_the_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.png");
        fs::write(&input, b"not really").unwrap();

        let err = convert_file(&input, None, &ConvertOptions::default()).unwrap_err();
        match err {
            ConvertError::UnsupportedFormat { path, .. } => assert_eq!(path, input),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dir.path().join("broken.svg").exists());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("assets/icon.png")),
            PathBuf::from("assets/icon.svg")
        );
        assert_eq!(default_output_path(Path::new("icon")), PathBuf::from("icon.svg"));
    }
}
