//! Configuration section definitions.
//!
//! Each module corresponds to a section in `png2svg.toml`:
//!
//! | Module   | TOML Section | Purpose                              |
//! |----------|--------------|--------------------------------------|
//! | `bitmap` | `[bitmap]`   | Grayscale → 1-bit threshold          |
//! | `trace`  | `[trace]`    | Tracer backend and curve fitting     |
//! | `svg`    | `[svg]`      | Fill rule and coordinate precision   |

mod bitmap;
mod svg;
mod trace;

pub use bitmap::BitmapConfig;
pub use svg::SvgConfig;
pub use trace::TraceConfig;
