//! SVG output.
//!
//! # Modules
//!
//! - [`encode`]: contour → path data (`d` attribute)
//! - [`document`]: path data → standalone SVG document
//!
//! ```text
//! Vec<Contour> ──► encode (one string per contour) ──► SvgDocument::render
//! ```

mod document;
mod encode;

pub use document::{FillRule, SvgDocument};
pub use encode::{PathEncoder, encode_contour};
