//! Enhancer configuration from `enhance.toml`.
//!
//! Every section is optional and falls back to the markers the site markup
//! already uses, so a missing file means "enhance with defaults".
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── form       # [form], [form.messages]
//! │   ├── lazy       # [lazy]
//! │   ├── menu       # [menu]
//! │   ├── scroll     # [scroll]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # EnhanceConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section           | Purpose                                       |
//! |-------------------|-----------------------------------------------|
//! | `[site]`          | Site name for the console init line           |
//! | `[menu]`          | Mobile menu toggle and panel markers          |
//! | `[form]`          | Validated forms, state classes, messages      |
//! | `[scroll]`        | In-page link selector and scroll options      |
//! | `[lazy]`          | Deferred image selector and source attribute  |

pub mod section;
pub mod types;

pub use section::{FormConfig, FormMessages, LazyConfig, MenuConfig, ScrollConfig, SiteConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, Severity};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file name.
pub const CONFIG_FILE: &str = "enhance.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `enhance.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceConfig {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub menu: MenuConfig,

    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub scroll: ScrollConfig,

    #[serde(default)]
    pub lazy: LazyConfig,
}

impl EnhanceConfig {
    /// Parse configuration from TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path`, or defaults when the file does not exist.
    ///
    /// The result is validated; unknown fields are reported as warnings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::from_path(path)?
        } else {
            crate::debug!("config"; "{} not found, using defaults", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        crate::log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section.
    ///
    /// Collects all errors and returns them at once; warnings are printed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.menu.validate(&mut diag);
        self.form.validate(&mut diag);
        self.scroll.validate(&mut diag);
        self.lazy.validate(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> EnhanceConfig {
    let (parsed, ignored) = EnhanceConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
