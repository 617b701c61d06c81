//! `png2svg convert`: one image, one SVG.

use anyhow::Result;
use std::path::Path;

use crate::{
    debug,
    pipeline::{ConvertOptions, convert_file_with},
    trace::BuiltinTracer,
    utils::path::normalize_path,
};

/// Convert `input` and print where the SVG went.
pub fn run(input: &Path, output: Option<&Path>, options: &ConvertOptions) -> Result<()> {
    let tracer = BuiltinTracer::new(options.trace.clone())?;
    let (written, report) = convert_file_with(input, output, options, &tracer)?;

    debug!("convert"; "{}x{}: {} contours ({} holes), {} corners, {} curves",
        report.width, report.height, report.contours, report.holes, report.corners, report.curves);
    println!("converted to SVG: {}", normalize_path(&written).display());
    Ok(())
}
