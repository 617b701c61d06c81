//! `[svg]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [svg]
//! fill_rule = "solid"    # "solid" (one path per contour) or "evenodd" (holes knocked out)
//! precision = 3          # Round coordinates; omit to write them verbatim
//! ```

use serde::{Deserialize, Serialize};

use crate::svg::FillRule;

/// Output document settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    pub fill_rule: FillRule,
    pub precision: Option<usize>,
}
