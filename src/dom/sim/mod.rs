//! In-memory document for tests and headless runs.
//!
//! `SimDocument` implements [`DomQuery`] over an arena tree parsed from HTML,
//! and adds the driving side a browser normally provides: dispatching clicks
//! and submits (with bubbling and default actions), filling form values,
//! revealing elements to visibility watchers, and a journal of page-level side
//! effects (console, focus, scrolls, navigations, submissions).
//!
//! # Example
//!
//! ```ignore
//! let doc = SimDocument::parse(r#"<a href="#top">Top</a><h1 id="top">Hi</h1>"#)?;
//! enhance::initialize(&doc, &EnhanceConfig::default());
//! let link = doc.select_one("a")?;
//! assert!(doc.click(link).default_prevented);
//! ```

mod event;
mod parse;
mod serialize;
mod tree;
mod visibility;

#[cfg(test)]
mod tests;

pub use event::{Dispatch, SimEvent};
pub use tree::NodeId;
pub use visibility::SimWatcher;

pub(crate) use tree::Dom;

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::{
    DomError, DomEvent, DomQuery, EventKind, Handler, ScrollOptions, Selector, VisibilityCallback,
    VisibilityEntry,
};

type SharedHandler = Rc<RefCell<Handler<SimEvent>>>;

/// Page-level side effects recorded by the simulated document.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Journal {
    /// Lines written with `console_log`.
    pub console: Vec<String>,
    /// Element that last received focus.
    pub focused: Option<NodeId>,
    /// `scroll_into_view` requests in order.
    pub scrolls: Vec<(NodeId, ScrollOptions)>,
    /// Hrefs followed by unprevented link clicks.
    pub navigations: Vec<String>,
    /// Forms whose submission was not cancelled.
    pub submissions: Vec<NodeId>,
}

/// Shared handle to an in-memory document.
#[derive(Clone)]
pub struct SimDocument {
    inner: Rc<Inner>,
}

struct Inner {
    dom: RefCell<Dom>,
    listeners: RefCell<FxHashMap<(NodeId, EventKind), Vec<SharedHandler>>>,
    watchers: RefCell<Vec<SimWatcher>>,
    journal: RefCell<Journal>,
    native_lazy: Cell<bool>,
    observer_available: Cell<bool>,
}

impl SimDocument {
    /// Empty document. Both lazy-loading capabilities are enabled.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                dom: RefCell::new(Dom::new()),
                listeners: RefCell::new(FxHashMap::default()),
                watchers: RefCell::new(Vec::new()),
                journal: RefCell::new(Journal::default()),
                native_lazy: Cell::new(true),
                observer_available: Cell::new(true),
            }),
        }
    }

    /// Parse an HTML page or fragment.
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let doc = Self::new();
        parse::parse_into(&mut doc.inner.dom.borrow_mut(), source)?;
        Ok(doc)
    }

    /// Whether `<img>` reports native `loading` support.
    pub fn with_native_lazy_loading(self, supported: bool) -> Self {
        self.inner.native_lazy.set(supported);
        self
    }

    /// Whether a visibility observer can be created at all.
    pub fn with_visibility_observer(self, available: bool) -> Self {
        self.inner.observer_available.set(available);
        self
    }

    fn dom(&self) -> Ref<'_, Dom> {
        self.inner.dom.borrow()
    }

    // ------------------------------------------------------------------------
    // Strict selection (errors instead of empty results)
    // ------------------------------------------------------------------------

    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        let dom = self.dom();
        Ok(dom.select_all(dom.root(), &selector))
    }

    /// First element matching `selector`.
    pub fn select_one(&self, selector: &str) -> Result<NodeId, DomError> {
        self.select(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| DomError::NotFound(selector.to_string()))
    }

    // ------------------------------------------------------------------------
    // Driving the page
    // ------------------------------------------------------------------------

    /// Dispatch `kind` at `target`, bubbling through its ancestors until a
    /// handler stops propagation. No default action runs.
    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> Dispatch {
        let event = SimEvent::new(kind, target);

        let path = {
            let dom = self.dom();
            let mut path = vec![target];
            let mut current = dom.node(target).and_then(|n| n.parent);
            while let Some(node) = current {
                path.push(node);
                current = dom.node(node).and_then(|n| n.parent);
            }
            path
        };

        let mut handlers_run = 0;
        for node in path {
            // Snapshot so handlers can add listeners or dispatch again.
            let handlers = self
                .inner
                .listeners
                .borrow()
                .get(&(node, kind))
                .cloned()
                .unwrap_or_default();

            for handler in handlers {
                let mut handler = handler.borrow_mut();
                (*handler)(&event);
                handlers_run += 1;
            }

            if event.propagation_stopped() {
                break;
            }
        }

        Dispatch {
            default_prevented: event.default_prevented(),
            propagation_stopped: event.propagation_stopped(),
            handlers_run,
        }
    }

    /// Click `target`, then run the default action unless it was prevented:
    /// follow the enclosing link, or submit the enclosing form from a submit
    /// button.
    pub fn click(&self, target: NodeId) -> Dispatch {
        let dispatch = self.dispatch(target, EventKind::Click);
        if dispatch.default_prevented {
            return dispatch;
        }

        let (href, form) = {
            let dom = self.dom();
            let href = self
                .closest(&dom, target, |dom, n| dom.tag_name(n) == Some("a"))
                .and_then(|a| dom.attr(a, "href").map(str::to_string));
            let form = self
                .closest(&dom, target, is_submit_control)
                .and_then(|button| self.closest(&dom, button, |dom, n| dom.tag_name(n) == Some("form")));
            (href, form)
        };

        if let Some(href) = href {
            self.inner.journal.borrow_mut().navigations.push(href);
        } else if let Some(form) = form {
            self.submit(form);
        }
        dispatch
    }

    /// Submit `form`; the submission is recorded unless a handler cancels it.
    pub fn submit(&self, form: NodeId) -> Dispatch {
        let dispatch = self.dispatch(form, EventKind::Submit);
        if !dispatch.default_prevented {
            self.inner.journal.borrow_mut().submissions.push(form);
        }
        dispatch
    }

    /// Type into a form control.
    pub fn set_value(&self, node: NodeId, value: &str) {
        self.inner.dom.borrow_mut().set_value(node, value);
    }

    /// Report `node` as intersecting the viewport. Returns how many watchers
    /// were notified.
    pub fn reveal(&self, node: NodeId) -> usize {
        self.notify_visibility(node, true)
    }

    /// Report `node` as outside the viewport.
    pub fn conceal(&self, node: NodeId) -> usize {
        self.notify_visibility(node, false)
    }

    fn notify_visibility(&self, node: NodeId, is_intersecting: bool) -> usize {
        let watchers: Vec<SimWatcher> = self
            .inner
            .watchers
            .borrow()
            .iter()
            .filter(|w| w.is_observing(node))
            .cloned()
            .collect();

        let entry = VisibilityEntry {
            target: node,
            is_intersecting,
        };
        for watcher in &watchers {
            watcher.notify(std::slice::from_ref(&entry));
        }
        watchers.len()
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Snapshot of recorded side effects.
    pub fn journal(&self) -> Journal {
        self.inner.journal.borrow().clone()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.inner.journal.borrow().focused
    }

    pub fn console(&self) -> Vec<String> {
        self.inner.journal.borrow().console.clone()
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.inner.watchers.borrow().iter().any(|w| w.is_observing(node))
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.dom().tag_name(node).map(str::to_string)
    }

    pub fn text(&self, node: NodeId) -> String {
        self.dom().text_content(node)
    }

    /// Inline style property, e.g. `display`.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.dom().style_property(node, property)
    }

    /// Serialize the current tree back to HTML.
    pub fn to_html(&self) -> String {
        serialize::to_html(&self.dom())
    }

    /// Short `tag#id.class` label for logs.
    pub fn describe(&self, node: NodeId) -> String {
        let dom = self.dom();
        let Some(tag) = dom.tag_name(node) else {
            return format!("#node{}", node.0);
        };
        let mut label = tag.to_string();
        if let Some(id) = dom.attr(node, "id").filter(|id| !id.is_empty()) {
            label.push('#');
            label.push_str(id);
        }
        for class in dom.attr(node, "class").unwrap_or("").split_ascii_whitespace() {
            label.push('.');
            label.push_str(class);
        }
        label
    }

    fn closest(
        &self,
        dom: &Dom,
        start: NodeId,
        pred: impl Fn(&Dom, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut current = Some(start).filter(|&n| dom.element(n).is_some());
        while let Some(node) = current {
            if pred(dom, node) {
                return Some(node);
            }
            current = dom.parent_element(node);
        }
        None
    }

    fn parse_selector(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(selector) => Some(selector),
            Err(err) => {
                crate::debug!("dom"; "{}", err);
                None
            }
        }
    }
}

/// Buttons default to `type="submit"`; inputs only submit when asked to.
fn is_submit_control(dom: &Dom, node: NodeId) -> bool {
    let kind = dom.attr(node, "type").map(str::to_ascii_lowercase);
    match dom.tag_name(node) {
        Some("button") => kind.is_none_or(|k| k == "submit"),
        Some("input") => kind.is_some_and(|k| k == "submit" || k == "image"),
        _ => false,
    }
}

impl Default for SimDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SimDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimDocument")
            .field("native_lazy", &self.inner.native_lazy.get())
            .field("observer_available", &self.inner.observer_available.get())
            .field("journal", &self.inner.journal.borrow())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// DomQuery
// ============================================================================

impl DomQuery for SimDocument {
    type Node = NodeId;
    type Event = SimEvent;
    type Watcher = SimWatcher;

    fn query(&self, selector: &str) -> Option<NodeId> {
        let selector = Self::parse_selector(selector)?;
        let dom = self.dom();
        dom.select_first(dom.root(), &selector)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Self::parse_selector(selector) else {
            return Vec::new();
        };
        let dom = self.dom();
        dom.select_all(dom.root(), &selector)
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = Self::parse_selector(selector)?;
        self.dom().select_first(*scope, &selector)
    }

    fn query_all_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Self::parse_selector(selector) else {
            return Vec::new();
        };
        self.dom().select_all(*scope, &selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom().by_id(id)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.dom().parent_element(*node)
    }

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        self.dom().attr(*node, name).map(str::to_string)
    }

    fn set_attr(&self, node: &NodeId, name: &str, value: &str) {
        self.inner.dom.borrow_mut().set_attr(*node, name, value);
    }

    fn remove_attr(&self, node: &NodeId, name: &str) {
        self.inner.dom.borrow_mut().remove_attr(*node, name);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.dom().has_class(*node, class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.inner.dom.borrow_mut().add_class(*node, class);
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.inner.dom.borrow_mut().remove_class(*node, class);
    }

    fn toggle_class(&self, node: &NodeId, class: &str) -> bool {
        self.inner.dom.borrow_mut().toggle_class(*node, class)
    }

    fn value(&self, node: &NodeId) -> String {
        self.dom().value(*node).to_string()
    }

    fn input_type(&self, node: &NodeId) -> String {
        let dom = self.dom();
        let declared = dom
            .attr(*node, "type")
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty());

        match dom.tag_name(*node) {
            Some("textarea") => "textarea".to_string(),
            Some("select") if dom.attr(*node, "multiple").is_some() => "select-multiple".to_string(),
            Some("select") => "select-one".to_string(),
            Some("button") => declared.unwrap_or_else(|| "submit".to_string()),
            _ => declared.unwrap_or_else(|| "text".to_string()),
        }
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.inner.dom.borrow_mut().set_text_content(*node, text);
    }

    fn set_display(&self, node: &NodeId, display: &str) {
        self.inner
            .dom
            .borrow_mut()
            .set_style_property(*node, "display", display);
    }

    fn scroll_into_view(&self, node: &NodeId, options: ScrollOptions) {
        self.inner.journal.borrow_mut().scrolls.push((*node, options));
    }

    fn focus(&self, node: &NodeId) {
        self.inner.journal.borrow_mut().focused = Some(*node);
    }

    fn console_log(&self, message: &str) {
        self.inner
            .journal
            .borrow_mut()
            .console
            .push(message.to_string());
    }

    fn add_listener(&self, node: &NodeId, kind: EventKind, handler: Handler<SimEvent>) {
        self.inner
            .listeners
            .borrow_mut()
            .entry((*node, kind))
            .or_default()
            .push(Rc::new(RefCell::new(handler)));
    }

    fn supports_native_lazy_loading(&self) -> bool {
        self.inner.native_lazy.get()
    }

    fn visibility_watcher(&self, callback: VisibilityCallback<SimWatcher>) -> Option<SimWatcher> {
        if !self.inner.observer_available.get() {
            return None;
        }
        let watcher = SimWatcher::new(callback);
        self.inner.watchers.borrow_mut().push(watcher.clone());
        Some(watcher)
    }
}
