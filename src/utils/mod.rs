//! Shared helpers.

pub mod html;
mod plural;

pub use plural::plural_count;

/// Remove SGR escape sequences from styled terminal text.
#[cfg(test)]
pub(crate) fn strip_ansi(styled: &str) -> String {
    use regex::Regex;
    use std::sync::LazyLock;

    static SGR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
    SGR.replace_all(styled, "").into_owned()
}
