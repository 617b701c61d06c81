//! Command-line interface module.

mod args;
pub mod batch;
pub mod convert;

pub use args::{Cli, Commands, TraceArgs};
