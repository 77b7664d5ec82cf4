//! `[form]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [form]
//! selector = "form[data-validate]"   # Forms validated on submit
//! required_selector = "[required]"   # Fields checked inside each form
//! error_selector = ".error-message"  # Looked up under the field's parent
//! invalid_class = "is-invalid"
//! validated_class = "was-validated"
//!
//! [form.messages]
//! required = "Este campo é obrigatório"
//! invalid_email = "Por favor, insira um email válido"
//! ```

use serde::{Deserialize, Serialize};

use super::{check_name, check_selector};
use crate::config::{ConfigDiagnostics, FieldPath};

/// Form validation markers and messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub selector: String,
    pub required_selector: String,
    /// Error slot selector, scoped to the field's parent element.
    pub error_selector: String,
    pub invalid_class: String,
    /// Added to the form after every submit attempt.
    pub validated_class: String,
    pub messages: FormMessages,
}

/// User-facing validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMessages {
    pub required: String,
    pub invalid_email: String,
}

impl FormConfig {
    pub const SELECTOR: FieldPath = FieldPath::new("form.selector");
    pub const REQUIRED_SELECTOR: FieldPath = FieldPath::new("form.required_selector");
    pub const ERROR_SELECTOR: FieldPath = FieldPath::new("form.error_selector");
    pub const INVALID_CLASS: FieldPath = FieldPath::new("form.invalid_class");
    pub const VALIDATED_CLASS: FieldPath = FieldPath::new("form.validated_class");
    pub const MESSAGE_REQUIRED: FieldPath = FieldPath::new("form.messages.required");
    pub const MESSAGE_INVALID_EMAIL: FieldPath = FieldPath::new("form.messages.invalid_email");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_selector(Self::SELECTOR, &self.selector, diag);
        check_selector(Self::REQUIRED_SELECTOR, &self.required_selector, diag);
        check_selector(Self::ERROR_SELECTOR, &self.error_selector, diag);
        check_name(Self::INVALID_CLASS, &self.invalid_class, diag);
        check_name(Self::VALIDATED_CLASS, &self.validated_class, diag);

        if self.messages.required.trim().is_empty() {
            diag.warn(Self::MESSAGE_REQUIRED, "message is empty; errors will show blank");
        }
        if self.messages.invalid_email.trim().is_empty() {
            diag.warn(Self::MESSAGE_INVALID_EMAIL, "message is empty; errors will show blank");
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            selector: "form[data-validate]".to_string(),
            required_selector: "[required]".to_string(),
            error_selector: ".error-message".to_string(),
            invalid_class: "is-invalid".to_string(),
            validated_class: "was-validated".to_string(),
            messages: FormMessages::default(),
        }
    }
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            required: "Este campo é obrigatório".to_string(),
            invalid_email: "Por favor, insira um email válido".to_string(),
        }
    }
}
