//! Capability interface over a document tree.
//!
//! The enhancer never touches browser globals directly. Every behavior is
//! written against [`DomQuery`], so the same code drives a real page through
//! the `web` backend and an in-memory [`SimDocument`] in tests and in the
//! headless harness.
//!
//! # Module Structure
//!
//! ```text
//! dom/
//! ├── selector   # CSS selector subset (parse + match)
//! ├── sim/       # In-memory document, events, visibility
//! └── web        # web-sys backend (feature `web`, wasm32 only)
//! ```

pub mod selector;
pub mod sim;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use selector::Selector;
pub use sim::{NodeId, SimDocument, SimEvent, SimWatcher};

use std::fmt;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Failures of the document backends themselves.
///
/// Enhancer behaviors never surface these: a selector that cannot be parsed
/// matches nothing, and a missing element disables the feature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("html parse error: {0}")]
    HtmlParse(String),

    #[error("unsupported selector: `{0}`")]
    UnsupportedSelector(String),

    #[error("no element matches `{0}`")]
    NotFound(String),
}

// ============================================================================
// Events
// ============================================================================

/// Event types the enhancer listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
}

impl EventKind {
    /// DOM event type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slice of the DOM `Event` interface handlers need.
pub trait DomEvent {
    fn prevent_default(&self);
    fn stop_propagation(&self);
    fn default_prevented(&self) -> bool;
}

/// Event handler stored by a backend.
pub type Handler<E> = Box<dyn FnMut(&E)>;

// ============================================================================
// Scrolling
// ============================================================================

/// `scrollIntoView` behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
    Auto,
}

/// `scrollIntoView` vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

/// Options passed to [`DomQuery::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

// ============================================================================
// Visibility
// ============================================================================

/// One notification from a visibility watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
}

/// Watches elements entering or leaving the viewport.
///
/// Mirrors `IntersectionObserver`: the callback given at construction receives
/// a batch of entries plus the watcher itself, so it can stop watching an
/// element from inside the callback.
pub trait VisibilityWatcher: Clone + 'static {
    type Node;

    fn observe(&self, node: &Self::Node);
    fn unobserve(&self, node: &Self::Node);
}

/// Callback invoked with each batch of visibility entries.
pub type VisibilityCallback<W> =
    Box<dyn FnMut(&[VisibilityEntry<<W as VisibilityWatcher>::Node>], &W)>;

// ============================================================================
// Document
// ============================================================================

/// Document capabilities used by the enhancer.
///
/// Handles are cheap to clone; a handler captures a clone of the document and
/// of the nodes it needs at setup time. Mutating methods take `&self` because
/// the underlying tree is shared with those handlers.
pub trait DomQuery: Clone + 'static {
    type Node: Clone + PartialEq + fmt::Debug + 'static;
    type Event: DomEvent;
    type Watcher: VisibilityWatcher<Node = Self::Node>;

    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// All elements in document order matching `selector`.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` matching `selector`.
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// All descendants of `scope` matching `selector`.
    fn query_all_within(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Parent element (`parentElement`).
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attr(&self, node: &Self::Node, name: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Toggle `class`; returns whether it is present afterwards.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Current form-control value (empty for non-controls).
    fn value(&self, node: &Self::Node) -> String;

    /// Lowercased `type` of a form control, `"text"` when unspecified.
    fn input_type(&self, node: &Self::Node) -> String;

    fn set_text(&self, node: &Self::Node, text: &str);

    /// Set the inline `display` style.
    fn set_display(&self, node: &Self::Node, display: &str);

    fn scroll_into_view(&self, node: &Self::Node, options: ScrollOptions);
    fn focus(&self, node: &Self::Node);

    /// Write a line to the page console.
    fn console_log(&self, message: &str);

    fn add_listener(&self, node: &Self::Node, kind: EventKind, handler: Handler<Self::Event>);

    /// Whether image elements support the `loading` attribute natively.
    fn supports_native_lazy_loading(&self) -> bool;

    /// Create a visibility watcher, or `None` when the platform has none.
    fn visibility_watcher(
        &self,
        callback: VisibilityCallback<Self::Watcher>,
    ) -> Option<Self::Watcher>;
}
