//! Progressive enhancement for static sites.
//!
//! Wires up a mobile menu toggle, submit-time form validation, smooth
//! in-page scrolling and lazy images over a document that already exists.
//! Behaviors are written against the capability traits in [`dom`] and
//! [`timer`], so the same code runs in a browser (feature `web`, wasm32) and
//! against the in-memory [`SimDocument`].
//!
//! ```ignore
//! let doc = SimDocument::parse(html)?;
//! let enhanced = enhance::initialize(&doc, &EnhanceConfig::default());
//! ```

// Logger must be declared first so its macros are visible to every module.
pub mod logger;

pub mod config;
pub mod dom;
pub mod enhance;
pub mod timer;
pub mod utils;

pub use config::EnhanceConfig;
pub use dom::{DomEvent, DomQuery, EventKind, SimDocument, VisibilityWatcher};
pub use enhance::{
    Enhanced, LazyLoad, LazyMode, initialize, setup_form_validation, setup_lazy_loading,
    setup_mobile_menu, setup_smooth_scrolling, validate_form,
};
pub use timer::{Debounced, ManualScheduler, Scheduler, debounce};
