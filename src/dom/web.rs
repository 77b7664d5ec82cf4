//! Browser backend over `web-sys`.
//!
//! Listener and observer closures are leaked with `forget`: they live as long
//! as the page, which is how long the enhancements are meant to last.

use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry};

use super::{
    DomEvent, DomQuery, EventKind, Handler, ScrollBehavior, ScrollBlock, ScrollOptions,
    VisibilityCallback, VisibilityEntry, VisibilityWatcher,
};
use crate::config::EnhanceConfig;
use crate::timer::{Scheduler, Task};

// ============================================================================
// Document
// ============================================================================

/// The live page document.
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// Handle to the current window's document, if there is one.
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn has_global(&self, name: &str) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str(name)).unwrap_or(false)
    }

    fn html(node: &Element) -> Option<&HtmlElement> {
        node.dyn_ref::<HtmlElement>()
    }
}

fn collect(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn string_prop(target: &JsValue, name: &str) -> Option<String> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_string())
}

impl DomQuery for WebDocument {
    type Node = Element;
    type Event = WebEvent;
    type Watcher = WebWatcher;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        self.document
            .query_selector_all(selector)
            .map(collect)
            .unwrap_or_default()
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn query_all_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        scope
            .query_selector_all(selector)
            .map(collect)
            .unwrap_or_default()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) {
        node.set_attribute(name, value).ok();
    }

    fn remove_attr(&self, node: &Element, name: &str) {
        node.remove_attribute(name).ok();
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        node.class_list().add_1(class).ok();
    }

    fn remove_class(&self, node: &Element, class: &str) {
        node.class_list().remove_1(class).ok();
    }

    fn toggle_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().toggle(class).unwrap_or(false)
    }

    fn value(&self, node: &Element) -> String {
        string_prop(node, "value").unwrap_or_default()
    }

    fn input_type(&self, node: &Element) -> String {
        string_prop(node, "type")
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string())
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_display(&self, node: &Element, display: &str) {
        if let Some(el) = Self::html(node) {
            el.style().set_property("display", display).ok();
        }
    }

    fn scroll_into_view(&self, node: &Element, options: ScrollOptions) {
        let opts = web_sys::ScrollIntoViewOptions::new();
        opts.set_behavior(match options.behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
        });
        opts.set_block(match options.block {
            ScrollBlock::Start => web_sys::ScrollLogicalPosition::Start,
            ScrollBlock::Center => web_sys::ScrollLogicalPosition::Center,
            ScrollBlock::End => web_sys::ScrollLogicalPosition::End,
            ScrollBlock::Nearest => web_sys::ScrollLogicalPosition::Nearest,
        });
        node.scroll_into_view_with_scroll_into_view_options(&opts);
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = Self::html(node) {
            el.focus().ok();
        }
    }

    fn console_log(&self, message: &str) {
        web_sys::console::log_1(&JsValue::from_str(message));
    }

    fn add_listener(&self, node: &Element, kind: EventKind, mut handler: Handler<WebEvent>) {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            handler(&WebEvent(event));
        }) as Box<dyn FnMut(_)>);
        node.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    /// `'loading' in HTMLImageElement.prototype`
    fn supports_native_lazy_loading(&self) -> bool {
        js_sys::Reflect::get(&self.window, &JsValue::from_str("HTMLImageElement"))
            .and_then(|ctor| js_sys::Reflect::get(&ctor, &JsValue::from_str("prototype")))
            .and_then(|proto| js_sys::Reflect::has(&proto, &JsValue::from_str("loading")))
            .unwrap_or(false)
    }

    fn visibility_watcher(&self, mut callback: VisibilityCallback<WebWatcher>) -> Option<WebWatcher> {
        if !self.has_global("IntersectionObserver") {
            return None;
        }

        let closure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let entries: Vec<VisibilityEntry<Element>> = entries
                    .iter()
                    .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| VisibilityEntry {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                callback(&entries, &WebWatcher { observer });
            },
        ) as Box<dyn FnMut(_, _)>);

        let observer = IntersectionObserver::new(closure.as_ref().unchecked_ref()).ok()?;
        closure.forget();
        Some(WebWatcher { observer })
    }
}

// ============================================================================
// Event
// ============================================================================

/// A DOM event delivered to a handler.
#[derive(Debug, Clone)]
pub struct WebEvent(pub web_sys::Event);

impl DomEvent for WebEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }

    fn default_prevented(&self) -> bool {
        self.0.default_prevented()
    }
}

// ============================================================================
// Visibility
// ============================================================================

/// `IntersectionObserver` handle.
#[derive(Debug, Clone)]
pub struct WebWatcher {
    observer: IntersectionObserver,
}

impl VisibilityWatcher for WebWatcher {
    type Node = Element;

    fn observe(&self, node: &Element) {
        self.observer.observe(node);
    }

    fn unobserve(&self, node: &Element) {
        self.observer.unobserve(node);
    }
}

// ============================================================================
// Timers
// ============================================================================

/// `setTimeout` / `clearTimeout` on the window.
#[derive(Debug, Clone)]
pub struct WindowScheduler {
    window: web_sys::Window,
}

impl WindowScheduler {
    pub fn current() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl Scheduler for WindowScheduler {
    type Handle = i32;

    fn schedule(&self, delay: Duration, task: Task) -> i32 {
        let closure = Closure::once(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            )
            .unwrap_or(0);
        closure.forget();
        handle
    }

    fn cancel(&self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Enhance the current page with the default configuration.
///
/// Runs on `DOMContentLoaded`, or right away when the document has already
/// finished parsing.
#[wasm_bindgen]
pub fn start() {
    let Some(doc) = WebDocument::current() else {
        return;
    };

    if doc.document.ready_state() != "loading" {
        crate::initialize(&doc, &EnhanceConfig::default());
        return;
    }

    let target = doc.document.clone();
    let on_ready = Closure::once(move || {
        crate::initialize(&doc, &EnhanceConfig::default());
    });
    target
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .ok();
    on_ready.forget();
}
