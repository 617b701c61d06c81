//! png2svg - trace PNG images into SVG outlines.

mod cli;
mod config;
mod error;
mod geom;
mod logger;
mod pipeline;
mod raster;
mod svg;
mod trace;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.trace_args().verbose);

    if let Err(e) = run(&cli) {
        log!("error"; "{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "using {}", path.display());
    }
    let options = config.to_convert_options();

    match &cli.command {
        Commands::Convert { input, output, .. } => {
            cli::convert::run(input, output.as_deref(), &options)
        }
        Commands::Batch {
            inputs, out_dir, ..
        } => cli::batch::run(inputs, out_dir.as_deref(), &options),
    }
}
