//! `[menu]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [menu]
//! toggle = "[data-mobile-menu-button]"   # Button that opens the menu
//! panel = "[data-mobile-menu]"           # Panel that receives `open_class`
//! expanded_attr = "aria-expanded"        # Written as "true" / "false"
//! open_class = "is-open"
//! ```

use serde::{Deserialize, Serialize};

use super::{check_name, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

/// Mobile menu toggle markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Selector of the toggle control (first match wins).
    pub toggle: String,
    /// Selector of the menu panel (first match wins).
    pub panel: String,
    /// Attribute on the toggle that mirrors the open state.
    pub expanded_attr: String,
    /// Class toggled on the panel.
    pub open_class: String,
}

impl MenuConfig {
    pub const TOGGLE: FieldPath = FieldPath::new("menu.toggle");
    pub const PANEL: FieldPath = FieldPath::new("menu.panel");
    pub const EXPANDED_ATTR: FieldPath = FieldPath::new("menu.expanded_attr");
    pub const OPEN_CLASS: FieldPath = FieldPath::new("menu.open_class");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(Self::TOGGLE, &self.toggle, diag);
        check_selector(Self::PANEL, &self.panel, diag);
        check_name(Self::EXPANDED_ATTR, &self.expanded_attr, diag);
        check_name(Self::OPEN_CLASS, &self.open_class, diag);
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle: "[data-mobile-menu-button]".to_string(),
            panel: "[data-mobile-menu]".to_string(),
            expanded_attr: "aria-expanded".to_string(),
            open_class: "is-open".to_string(),
        }
    }
}
