use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::FormConfig;
use crate::debug;
use crate::dom::{DomEvent, DomQuery, EventKind};

/// Loose address shape: something, `@`, something, `.`, something.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const INVALID_ATTR: &str = "aria-invalid";

/// Validate every matching form on submit.
///
/// An invalid form has its submission cancelled and the event stopped from
/// bubbling. Every attempt, valid or not, marks the form as validated.
///
/// Returns how many forms were bound.
pub fn setup_form_validation<D: DomQuery>(doc: &D, config: &FormConfig) -> usize {
    let forms = doc.query_all(&config.selector);
    if forms.is_empty() {
        debug!("form"; "no forms match `{}`", config.selector);
        return 0;
    }

    let config = Rc::new(config.clone());
    for form in &forms {
        let handler_doc = doc.clone();
        let target = form.clone();
        let config = Rc::clone(&config);

        doc.add_listener(
            form,
            EventKind::Submit,
            Box::new(move |event: &D::Event| {
                if !validate_form(&handler_doc, &target, &config) {
                    event.prevent_default();
                    event.stop_propagation();
                }
                handler_doc.add_class(&target, &config.validated_class);
            }),
        );
    }
    forms.len()
}

/// Check the required fields of `form`, updating their error state.
///
/// Fields are visited in document order and all of them are checked; there
/// is no early exit. A field that fails both checks ends up showing the email
/// message, since that check runs second.
pub fn validate_form<D: DomQuery>(doc: &D, form: &D::Node, config: &FormConfig) -> bool {
    let mut valid = true;

    for field in doc.query_all_within(form, &config.required_selector) {
        let value = doc.value(&field);
        let trimmed = value.trim();

        if trimmed.is_empty() {
            valid = false;
            show_field_error(doc, &field, &config.messages.required, config);
        } else {
            clear_field_error(doc, &field, config);
        }

        // The pattern is tested against the raw value, surrounding spaces included.
        if doc.input_type(&field) == "email" && !trimmed.is_empty() && !EMAIL.is_match(&value) {
            valid = false;
            show_field_error(doc, &field, &config.messages.invalid_email, config);
        }
    }
    valid
}

/// The error slot belonging to `field`: first match under its parent.
fn error_slot<D: DomQuery>(doc: &D, field: &D::Node, config: &FormConfig) -> Option<D::Node> {
    let parent = doc.parent(field)?;
    doc.query_within(&parent, &config.error_selector)
}

fn show_field_error<D: DomQuery>(doc: &D, field: &D::Node, message: &str, config: &FormConfig) {
    if let Some(slot) = error_slot(doc, field, config) {
        doc.set_text(&slot, message);
        doc.set_display(&slot, "block");
    }
    doc.set_attr(field, INVALID_ATTR, "true");
    doc.add_class(field, &config.invalid_class);
}

fn clear_field_error<D: DomQuery>(doc: &D, field: &D::Node, config: &FormConfig) {
    if let Some(slot) = error_slot(doc, field, config) {
        doc.set_display(&slot, "none");
    }
    doc.remove_attr(field, INVALID_ATTR);
    doc.remove_class(field, &config.invalid_class);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        for ok in ["a@b.c", "first.last@example.co.uk", "x+y@d.io"] {
            assert!(EMAIL.is_match(ok), "{ok}");
        }
        for bad in ["not-an-email", "a@b", "@b.c", "a@.c", "a b@c.d", " a@b.c", "a@b.c "] {
            assert!(!EMAIL.is_match(bad), "{bad}");
        }
    }
}
