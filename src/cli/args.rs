//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::svg::FillRule;
use crate::trace::{TracerKind, TurnPolicy};

/// Trace black-and-white PNG images into SVG outlines
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "png2svg.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert one PNG image to SVG
    #[command(visible_alias = "c")]
    Convert {
        /// PNG image to trace
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Output path (default: input with an .svg extension)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Pixels darker than this become foreground (clamped to 0..=255)
        #[arg(allow_negative_numbers = true)]
        threshold: Option<i64>,

        #[command(flatten)]
        trace_args: TraceArgs,
    },

    /// Convert many PNG images in parallel
    #[command(visible_alias = "b")]
    Batch {
        /// PNG images to trace
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        inputs: Vec<PathBuf>,

        /// Directory for the SVG files (default: next to each input)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        out_dir: Option<PathBuf>,

        /// Pixels darker than this become foreground (clamped to 0..=255)
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<i64>,

        #[command(flatten)]
        trace_args: TraceArgs,
    },
}

/// Tracing and output flags shared by Convert and Batch.
///
/// Unset flags fall back to `png2svg.toml`, then to built-in defaults.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TraceArgs {
    /// Polygon extractor
    #[arg(long, value_enum)]
    pub tracer: Option<TracerKind>,

    /// How ambiguous diagonal pixels are joined
    #[arg(long, value_enum)]
    pub turn_policy: Option<TurnPolicy>,

    /// Drop outlines enclosing at most this many pixels
    #[arg(long)]
    pub turd_size: Option<u32>,

    /// Douglas-Peucker tolerance in pixels (0 keeps every vertex)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Turns sharper than this many degrees stay corners
    #[arg(long)]
    pub corner_angle: Option<f64>,

    /// Curve handle position toward the vertex, in (0, 1]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Path fill mode
    #[arg(long, value_enum)]
    pub fill_rule: Option<FillRule>,

    /// Round coordinates to this many decimal places
    #[arg(long)]
    pub precision: Option<usize>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// The positional or `-t` threshold, if any.
    pub fn threshold(&self) -> Option<i64> {
        match self.command {
            Commands::Convert { threshold, .. } | Commands::Batch { threshold, .. } => threshold,
        }
    }

    pub fn trace_args(&self) -> &TraceArgs {
        match &self.command {
            Commands::Convert { trace_args, .. } | Commands::Batch { trace_args, .. } => {
                trace_args
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_positionals() {
        let cli = Cli::try_parse_from(["png2svg", "convert", "in.png", "out.svg", "90"]).unwrap();
        match &cli.command {
            Commands::Convert { input, output, .. } => {
                assert_eq!(input, &PathBuf::from("in.png"));
                assert_eq!(output.as_deref(), Some(std::path::Path::new("out.svg")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.threshold(), Some(90));
        assert_eq!(cli.config, PathBuf::from("png2svg.toml"));
    }

    #[test]
    fn test_convert_negative_threshold() {
        let cli = Cli::try_parse_from(["png2svg", "convert", "in.png", "out.svg", "-3"]).unwrap();
        assert_eq!(cli.threshold(), Some(-3));
    }

    #[test]
    fn test_non_integer_threshold_rejected() {
        assert!(Cli::try_parse_from(["png2svg", "convert", "in.png", "out.svg", "dark"]).is_err());
    }

    #[test]
    fn test_trace_flags() {
        let cli = Cli::try_parse_from([
            "png2svg",
            "convert",
            "in.png",
            "--tracer",
            "border",
            "--turn-policy",
            "majority",
            "--fill-rule",
            "evenodd",
            "--precision",
            "2",
            "-V",
        ])
        .unwrap();
        let args = cli.trace_args();
        assert_eq!(args.tracer, Some(TracerKind::Border));
        assert_eq!(args.turn_policy, Some(TurnPolicy::Majority));
        assert_eq!(args.fill_rule, Some(FillRule::EvenOdd));
        assert_eq!(args.precision, Some(2));
        assert!(args.verbose);
        assert_eq!(cli.threshold(), None);
    }

    #[test]
    fn test_batch_args() {
        let cli = Cli::try_parse_from([
            "png2svg", "batch", "a.png", "b.png", "-o", "out", "-t", "200", "-C", "alt.toml",
        ])
        .unwrap();
        match &cli.command {
            Commands::Batch {
                inputs, out_dir, ..
            } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(out_dir.as_deref(), Some(std::path::Path::new("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.threshold(), Some(200));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }

    #[test]
    fn test_batch_requires_inputs() {
        assert!(Cli::try_parse_from(["png2svg", "batch"]).is_err());
    }
}
