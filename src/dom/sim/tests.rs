use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::dom::VisibilityWatcher;

fn page(html: &str) -> SimDocument {
    SimDocument::parse(html).unwrap()
}

fn recorder(
    doc: &SimDocument,
    node: NodeId,
    kind: EventKind,
    label: &'static str,
) -> Rc<RefCell<Vec<&'static str>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    doc.add_listener(&node, kind, Box::new(move |_| sink.borrow_mut().push(label)));
    log
}

#[test]
fn test_click_bubbles_to_ancestors() {
    let doc = page(r#"<div id="outer"><p id="inner"><span id="leaf">x</span></p></div>"#);
    let outer = doc.select_one("#outer").unwrap();
    let leaf = doc.select_one("#leaf").unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    for (node, label) in [(leaf, "leaf"), (outer, "outer")] {
        let sink = Rc::clone(&log);
        doc.add_listener(&node, EventKind::Click, Box::new(move |_| sink.borrow_mut().push(label)));
    }

    let dispatch = doc.click(leaf);
    assert_eq!(*log.borrow(), ["leaf", "outer"]);
    assert_eq!(dispatch.handlers_run, 2);
    assert!(!dispatch.propagation_stopped);
}

#[test]
fn test_stop_propagation_halts_bubbling() {
    let doc = page(r#"<form id="f"><p><button id="b">Go</button></p></form>"#);
    let form = doc.select_one("#f").unwrap();
    let button = doc.select_one("#b").unwrap();

    let outer = recorder(&doc, form, EventKind::Click, "form");
    doc.add_listener(&button, EventKind::Click, Box::new(|event: &SimEvent| event.stop_propagation()));

    let dispatch = doc.dispatch(button, EventKind::Click);
    assert!(dispatch.propagation_stopped);
    assert_eq!(dispatch.handlers_run, 1);
    assert!(outer.borrow().is_empty());
}

#[test]
fn test_link_click_navigates_unless_prevented() {
    let doc = page(r##"<a id="a" href="#top"><em>go</em></a><a id="b" href="#x">x</a>"##);
    let em = doc.select_one("em").unwrap();
    let b = doc.select_one("#b").unwrap();
    doc.add_listener(&b, EventKind::Click, Box::new(|event: &SimEvent| event.prevent_default()));

    doc.click(em);
    let dispatch = doc.click(b);

    assert!(dispatch.default_prevented);
    assert_eq!(doc.journal().navigations, ["#top"]);
}

#[test]
fn test_submit_button_submits_enclosing_form() {
    let doc = page(
        r#"<form id="f"><button type="button" id="plain">p</button><button id="go">g</button></form>"#,
    );
    let form = doc.select_one("#f").unwrap();

    doc.click(doc.select_one("#plain").unwrap());
    assert!(doc.journal().submissions.is_empty());

    doc.click(doc.select_one("#go").unwrap());
    assert_eq!(doc.journal().submissions, [form]);
}

#[test]
fn test_cancelled_submit_is_not_recorded() {
    let doc = page(r#"<form id="f"></form>"#);
    let form = doc.select_one("#f").unwrap();
    doc.add_listener(&form, EventKind::Submit, Box::new(|event: &SimEvent| event.prevent_default()));

    assert!(doc.submit(form).default_prevented);
    assert!(doc.journal().submissions.is_empty());
}

#[test]
fn test_handler_may_reenter_document() {
    let doc = page(r#"<button id="b" type="button">b</button><p id="p"></p>"#);
    let button = doc.select_one("#b").unwrap();
    let inner = doc.clone();
    doc.add_listener(
        &button,
        EventKind::Click,
        Box::new(move |_| {
            if let Some(p) = inner.query("#p") {
                inner.set_text(&p, "clicked");
                inner.add_class(&p, "done");
            }
        }),
    );

    doc.click(button);
    let p = doc.select_one("#p.done").unwrap();
    assert_eq!(doc.text(p), "clicked");
}

#[test]
fn test_form_control_values_and_types() {
    let doc = page(
        r#"<input id="a" value="x"><input id="b" type="EMAIL"><textarea id="c">hi &amp; bye</textarea>
           <select id="d"></select><button id="e"></button>"#,
    );
    let a = doc.select_one("#a").unwrap();
    let c = doc.select_one("#c").unwrap();

    assert_eq!(doc.value(&a), "x");
    assert_eq!(doc.input_type(&a), "text");
    assert_eq!(doc.input_type(&doc.select_one("#b").unwrap()), "email");
    assert_eq!(doc.value(&c), "hi & bye");
    assert_eq!(doc.input_type(&c), "textarea");
    assert_eq!(doc.input_type(&doc.select_one("#d").unwrap()), "select-one");
    assert_eq!(doc.input_type(&doc.select_one("#e").unwrap()), "submit");

    doc.set_value(a, "  typed ");
    assert_eq!(doc.value(&a), "  typed ");
}

#[test]
fn test_reveal_reaches_only_observing_watchers() {
    let doc = page(r#"<img id="one"><img id="two">"#);
    let one = doc.select_one("#one").unwrap();
    let two = doc.select_one("#two").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let watcher = doc
        .visibility_watcher(Box::new(move |entries, watcher: &SimWatcher| {
            for entry in entries {
                sink.borrow_mut().push((entry.target, entry.is_intersecting));
                watcher.unobserve(&entry.target);
            }
        }))
        .unwrap();
    watcher.observe(&one);

    assert_eq!(doc.reveal(two), 0);
    assert_eq!(doc.conceal(one), 1);
    assert!(!doc.is_observed(one));
    assert_eq!(doc.reveal(one), 0);
    assert_eq!(*seen.borrow(), [(one, false)]);
}

#[test]
fn test_observer_switch_disables_watchers() {
    let doc = SimDocument::new().with_visibility_observer(false);
    assert!(doc.visibility_watcher(Box::new(|_, _| {})).is_none());

    let doc = SimDocument::new().with_native_lazy_loading(false);
    assert!(!doc.supports_native_lazy_loading());
    assert!(doc.visibility_watcher(Box::new(|_, _| {})).is_some());
}

#[test]
fn test_html_round_trip_keeps_attributes() {
    let source = r#"<!DOCTYPE html><html><body><a href="/x?a=1&amp;b=2">t &lt;3</a><img alt="&quot;q&quot;"><p hidden>h</p></body></html>"#;
    let doc = page(source);
    let html = doc.to_html();

    assert!(html.starts_with("<!DOCTYPE html>\n"));
    assert!(html.contains(r#"<a href="/x?a=1&amp;b=2">t &lt;3</a>"#));
    assert!(html.contains(r#"<img alt="&quot;q&quot;">"#));
    assert!(!html.contains("</img>"));
    assert!(html.contains("<p hidden>h</p>"));
}

#[test]
fn test_mutations_show_in_serialized_html() {
    let doc = page(r#"<p class="note">x</p>"#);
    let p = doc.select_one("p").unwrap();
    doc.set_attr(&p, "aria-invalid", "true");
    doc.set_display(&p, "block");
    doc.remove_class(&p, "note");

    assert_eq!(
        doc.to_html(),
        r#"<p class aria-invalid="true" style="display: block;">x</p>"#
    );
    assert_eq!(doc.style(p, "display").as_deref(), Some("block"));
}

#[test]
fn test_invalid_selector_matches_nothing() {
    let doc = page("<p>x</p>");
    assert!(doc.query("p:hover").is_none());
    assert!(doc.query_all("p::before").is_empty());
    assert!(matches!(doc.select("p:hover"), Err(DomError::UnsupportedSelector(_))));
    assert!(matches!(doc.select_one("div"), Err(DomError::NotFound(_))));
}

#[test]
fn test_describe_labels_elements() {
    let doc = page(r#"<nav id="main" class="menu is-open"></nav>"#);
    assert_eq!(doc.describe(doc.select_one("nav").unwrap()), "nav#main.menu.is-open");
}
