//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro that only prints with `--verbose`
//!
//! Without the `cli` feature the sink is silent, so the library can run in a
//! browser without pulling in terminal handling. Page-facing output (the init
//! banner) goes through [`DomQuery::console_log`](crate::dom::DomQuery::console_log)
//! instead.
//!
//! # Example
//!
//! ```ignore
//! log!("run"; "replaying {} actions", actions.len());
//! debug!("menu"; "toggle missing, skipping");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Sink
// ============================================================================

/// Log a message with a colored module prefix
#[cfg(feature = "cli")]
pub fn log(module: &str, message: &str) {
    use crossterm::{
        execute,
        terminal::{Clear, ClearType},
    };
    use std::io::{Write, stdout};

    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Silent sink for library-only builds.
#[cfg(not(feature = "cli"))]
#[inline]
pub fn log(_module: &str, _message: &str) {}

/// Apply color to a module prefix based on module type
#[cfg(feature = "cli")]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    use owo_colors::OwoColorize;

    let prefix = format!("[{module}]");
    match module_lower {
        "console" => prefix.bright_blue().bold().to_string(),
        "pass" | "ok" => prefix.bright_green().bold().to_string(),
        "error" | "blocked" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_contains_module_name() {
        use crate::utils::strip_ansi;

        assert_eq!(strip_ansi(&colorize_prefix("menu", "menu")), "[menu]");
        assert_eq!(strip_ansi(&colorize_prefix("Error", "error")), "[Error]");
    }

    #[test]
    fn test_verbose_flag_round_trip() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
