//! `[scroll]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scroll]
//! selector = 'a[href^="#"]'   # In-page links
//! behavior = "smooth"         # smooth | instant | auto
//! block = "start"             # start | center | end | nearest
//! focus = true                # Move focus to the target after scrolling
//! ```

use serde::{Deserialize, Serialize};

use super::check_selector;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::dom::{ScrollBehavior, ScrollBlock, ScrollOptions};

/// Smooth scrolling for in-page links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub selector: String,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
    pub focus: bool,
}

impl ScrollConfig {
    pub const SELECTOR: FieldPath = FieldPath::new("scroll.selector");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(Self::SELECTOR, &self.selector, diag);
    }

    pub fn options(&self) -> ScrollOptions {
        ScrollOptions {
            behavior: self.behavior,
            block: self.block,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            selector: r##"a[href^="#"]"##.to_string(),
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
            focus: true,
        }
    }
}
