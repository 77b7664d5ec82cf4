//! Configuration section definitions.
//!
//! Each module corresponds to a section in `enhance.toml`:
//!
//! | Module   | TOML Section | Purpose                              |
//! |----------|--------------|--------------------------------------|
//! | `site`   | `[site]`     | Site name used in the init line      |
//! | `menu`   | `[menu]`     | Mobile menu toggle markers           |
//! | `form`   | `[form]`     | Validated forms, classes, messages   |
//! | `scroll` | `[scroll]`   | Fragment links and scroll options    |
//! | `lazy`   | `[lazy]`     | Deferred images                      |

mod form;
mod lazy;
mod menu;
mod scroll;
mod site;

pub use form::{FormConfig, FormMessages};
pub use lazy::LazyConfig;
pub use menu::MenuConfig;
pub use scroll::ScrollConfig;
pub use site::SiteConfig;

use super::{ConfigDiagnostics, FieldPath};
use crate::dom::Selector;

/// Selector fields must be non-empty and parse with the selector engine.
pub(super) fn check_selector(field: FieldPath, value: &str, diag: &mut ConfigDiagnostics) {
    if value.trim().is_empty() {
        diag.error(field, "selector is empty");
        return;
    }
    if let Err(err) = Selector::parse(value) {
        diag.error_with_hint(
            field,
            err.to_string(),
            "supported: type, *, #id, .class, [attr], [attr=v|^=v|$=v|*=v|~=v], `a b`, `a > b`, `a, b`",
        );
    }
}

/// Class and attribute names must be a single non-empty token.
pub(super) fn check_name(field: FieldPath, value: &str, diag: &mut ConfigDiagnostics) {
    if value.is_empty() {
        diag.error(field, "name is empty");
    } else if value.chars().any(char::is_whitespace) {
        diag.error_with_hint(
            field,
            format!("`{value}` contains whitespace"),
            "use a single class or attribute name",
        );
    }
}
