//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Semantic Site"      # Shown in the console init line
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Site identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name used in the init line `🚀 <name> initialized`.
    pub name: String,
}

impl SiteConfig {
    pub const NAME: FieldPath = FieldPath::new("site.name");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.warn(Self::NAME, "site name is empty; the init line will read `🚀  initialized`");
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Semantic Site".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.name, "Semantic Site");
    }

    #[test]
    fn test_site_name_override() {
        let config = test_parse_config("[site]\nname = \"Acme\"");
        assert_eq!(config.site.name, "Acme");
    }

    #[test]
    fn test_empty_name_warns() {
        let config = test_parse_config("[site]\nname = \"\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
    }
}
