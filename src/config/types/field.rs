//! Config field path.

use std::fmt;

/// Dotted path of a config field, e.g. `form.messages.required`.
///
/// Each section exposes its paths as constants so diagnostics cannot drift
/// from the TOML layout:
///
/// ```ignore
/// diag.error(MenuConfig::TOGGLE, "selector is empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Top-level table, `form` for `form.messages.required`.
    pub fn section(self) -> &'static str {
        self.0.split_once('.').map_or(self.0, |(section, _)| section)
    }

    /// Path inside the section, `messages.required` for `form.messages.required`.
    pub fn key(self) -> &'static str {
        self.0.split_once('.').map_or(self.0, |(_, key)| key)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
