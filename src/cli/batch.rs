//! `png2svg batch`: many independent images on the rayon pool.

use anyhow::{Result, anyhow, bail};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{
    debug,
    error::ConvertError,
    log,
    logger::ProgressLine,
    pipeline::{ConvertOptions, convert_file, default_output_path},
    utils::{path::svg_path_in, plural::plural_count},
};

/// Convert every input; each failure is reported and the rest go on.
///
/// Outputs land in `out_dir` as `<stem>.svg` when given, otherwise next
/// to each input.
pub fn run(inputs: &[PathBuf], out_dir: Option<&Path>, options: &ConvertOptions) -> Result<()> {
    options.trace.validate()?;
    let progress = ProgressLine::new(&[("convert", inputs.len())]);

    let failures = convert_all(inputs, out_dir, options, Some(&progress));
    progress.finish();

    let converted = inputs.len() - failures.len();
    log!("batch"; "converted {}", plural_count(converted, "image"));

    if !failures.is_empty() {
        bail!("{} failed", plural_count(failures.len(), "image"));
    }
    Ok(())
}

/// Run the conversions in parallel, returning the failures in input order.
///
/// An input whose output path was already claimed by an earlier input is
/// not converted and counts as a failure.
fn convert_all(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    options: &ConvertOptions,
    progress: Option<&ProgressLine>,
) -> Vec<(PathBuf, ConvertError)> {
    let outputs: Vec<PathBuf> = inputs
        .iter()
        .map(|input| match out_dir {
            Some(dir) => svg_path_in(dir, input),
            None => default_output_path(input),
        })
        .collect();
    let claimed = first_claims(&outputs);

    inputs
        .par_iter()
        .zip(outputs.par_iter())
        .enumerate()
        .filter_map(|(index, (input, output))| {
            let result = match claimed.get(output.as_path()) {
                Some(&owner) if owner != index => Err(ConvertError::conversion(&anyhow!(
                    "output `{}` is also the output of `{}`",
                    output.display(),
                    inputs[owner].display()
                ))),
                _ => convert_file(input, Some(output), options),
            };
            if let Some(p) = progress {
                p.inc("convert");
            }
            match result {
                Ok(written) => {
                    debug!("batch"; "{}", written.display());
                    None
                }
                Err(err) => {
                    log!("error"; "{}: {}", input.display(), err);
                    Some((input.clone(), err))
                }
            }
        })
        .collect()
}

/// Index of the first input writing each output path.
fn first_claims(outputs: &[PathBuf]) -> HashMap<&Path, usize> {
    let mut claimed = HashMap::with_capacity(outputs.len());
    for (index, output) in outputs.iter().enumerate() {
        claimed.entry(output.as_path()).or_insert(index);
    }
    claimed
}
