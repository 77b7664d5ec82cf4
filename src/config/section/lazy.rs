//! `[lazy]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [lazy]
//! selector = "img[data-src]"   # Deferred images
//! source_attr = "data-src"     # Holds the real source
//! pending_class = "lazy"       # Removed once the image is loaded
//! ```

use serde::{Deserialize, Serialize};

use super::{check_name, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

/// Lazy image markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    pub selector: String,
    pub source_attr: String,
    pub pending_class: String,
}

impl LazyConfig {
    pub const SELECTOR: FieldPath = FieldPath::new("lazy.selector");
    pub const SOURCE_ATTR: FieldPath = FieldPath::new("lazy.source_attr");
    pub const PENDING_CLASS: FieldPath = FieldPath::new("lazy.pending_class");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(Self::SELECTOR, &self.selector, diag);
        check_name(Self::SOURCE_ATTR, &self.source_attr, diag);
        check_name(Self::PENDING_CLASS, &self.pending_class, diag);
    }
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            selector: "img[data-src]".to_string(),
            source_attr: "data-src".to_string(),
            pending_class: "lazy".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_lazy_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.lazy.selector, "img[data-src]");
        assert_eq!(config.lazy.source_attr, "data-src");
        assert_eq!(config.lazy.pending_class, "lazy");
    }

    #[test]
    fn test_lazy_custom_attr() {
        let config =
            test_parse_config("[lazy]\nselector = \"img[data-lazy]\"\nsource_attr = \"data-lazy\"");
        let mut diag = ConfigDiagnostics::new();
        config.lazy.validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(config.lazy.source_attr, "data-lazy");
    }
}
