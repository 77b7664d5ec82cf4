//! Page behaviors and the bootstrapper.
//!
//! Every behavior is generic over [`DomQuery`] and reads its markers from the
//! matching config section. A behavior whose targets are absent binds nothing
//! and reports so in its return value; none of them fail.
//!
//! Handlers capture clones of the document handle, so listeners and the
//! document keep each other alive for the life of the page.
//!
//! # Module Structure
//!
//! ```text
//! enhance/
//! ├── menu     # Mobile menu toggle
//! ├── form     # Submit-time validation
//! ├── scroll   # Smooth in-page anchors
//! └── lazy     # Deferred images
//! ```

mod form;
mod lazy;
mod menu;
mod scroll;

#[cfg(test)]
mod tests;

pub use form::{setup_form_validation, validate_form};
pub use lazy::{LazyLoad, LazyMode, setup_lazy_loading};
pub use menu::setup_mobile_menu;
pub use scroll::setup_smooth_scrolling;

use serde::Serialize;

use crate::config::EnhanceConfig;
use crate::debug;
use crate::dom::DomQuery;

/// What [`initialize`] bound. Callers are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Enhanced {
    /// Whether the menu toggle was wired.
    pub menu: bool,
    /// Forms given a submit validator.
    pub forms: usize,
    /// Links given a smooth-scroll handler.
    pub links: usize,
    pub lazy: LazyLoad,
}

/// Enhance `doc`: write the init line to the page console, then set up the
/// menu, form validation, smooth scrolling and lazy images, in that order.
///
/// Call once per document, after its content is available.
pub fn initialize<D: DomQuery>(doc: &D, config: &EnhanceConfig) -> Enhanced {
    doc.console_log(&format!("🚀 {} initialized", config.site.name));

    let enhanced = Enhanced {
        menu: setup_mobile_menu(doc, &config.menu),
        forms: setup_form_validation(doc, &config.form),
        links: setup_smooth_scrolling(doc, &config.scroll),
        lazy: setup_lazy_loading(doc, &config.lazy),
    };

    debug!(
        "init";
        "menu={} forms={} links={} images={} ({})",
        enhanced.menu,
        enhanced.forms,
        enhanced.links,
        enhanced.lazy.images,
        enhanced.lazy.mode
    );
    enhanced
}
