use super::*;
use crate::config::{EnhanceConfig, FormConfig, LazyConfig, MenuConfig, ScrollConfig};
use crate::dom::{DomQuery, NodeId, ScrollBehavior, ScrollBlock, ScrollOptions, SimDocument};

const PAGE: &str = r##"<!DOCTYPE html>
<html>
<body>
  <header>
    <button data-mobile-menu-button aria-expanded="false">Menu</button>
    <nav data-mobile-menu><a href="#contact">Contact</a><a href="#missing">Gone</a></nav>
  </header>
  <main>
    <img class="lazy" data-src="hero.jpg" alt="Hero">
    <section id="contact" tabindex="-1">
      <form data-validate action="/send">
        <div><input id="name" name="name" required><span class="error-message"></span></div>
        <div><input id="email" type="email" name="email" required><span class="error-message"></span></div>
        <div><textarea id="note" name="note"></textarea></div>
        <button id="send">Send</button>
      </form>
      <form id="plain"><button id="plain-send">Go</button></form>
    </section>
    <img class="lazy" data-src="footer.jpg" alt="Footer">
  </main>
</body>
</html>"##;

fn page() -> SimDocument {
    SimDocument::parse(PAGE).unwrap()
}

fn node(doc: &SimDocument, selector: &str) -> NodeId {
    doc.select_one(selector).unwrap()
}

fn error_text(doc: &SimDocument, field: &str) -> (String, Option<String>) {
    let field = node(doc, field);
    let parent = doc.parent(&field).unwrap();
    let slot = doc.query_within(&parent, ".error-message").unwrap();
    (doc.text(slot), doc.style(slot, "display"))
}

// ============================================================================
// initialize
// ============================================================================

#[test]
fn test_initialize_logs_and_binds_everything() {
    let doc = page();
    let enhanced = initialize(&doc, &EnhanceConfig::default());

    assert_eq!(doc.console(), ["🚀 Semantic Site initialized"]);
    assert_eq!(
        enhanced,
        Enhanced {
            menu: true,
            forms: 1,
            links: 2,
            lazy: LazyLoad {
                mode: LazyMode::Native,
                images: 2,
            },
        }
    );
}

#[test]
fn test_initialize_uses_site_name() {
    let doc = SimDocument::parse("<p>empty</p>").unwrap();
    let mut config = EnhanceConfig::default();
    config.site.name = "Acme".into();

    let enhanced = initialize(&doc, &config);
    assert_eq!(doc.console(), ["🚀 Acme initialized"]);
    assert!(!enhanced.menu);
    assert_eq!(enhanced.forms, 0);
    assert_eq!(enhanced.links, 0);
    assert_eq!(enhanced.lazy.images, 0);
}

// ============================================================================
// menu
// ============================================================================

#[test]
fn test_menu_toggle_flips_state() {
    let doc = page();
    assert!(setup_mobile_menu(&doc, &MenuConfig::default()));
    let button = node(&doc, "[data-mobile-menu-button]");
    let menu = node(&doc, "[data-mobile-menu]");

    doc.click(button);
    assert_eq!(doc.attr(&button, "aria-expanded").as_deref(), Some("true"));
    assert!(doc.has_class(&menu, "is-open"));

    doc.click(button);
    assert_eq!(doc.attr(&button, "aria-expanded").as_deref(), Some("false"));
    assert!(!doc.has_class(&menu, "is-open"));
}

#[test]
fn test_menu_without_expanded_attr_opens_first() {
    let doc =
        SimDocument::parse("<button data-mobile-menu-button></button><ul data-mobile-menu></ul>")
            .unwrap();
    setup_mobile_menu(&doc, &MenuConfig::default());
    let button = node(&doc, "button");

    doc.click(button);
    assert_eq!(doc.attr(&button, "aria-expanded").as_deref(), Some("true"));
    assert!(doc.has_class(&node(&doc, "ul"), "is-open"));
}

#[test]
fn test_menu_starting_expanded_collapses_first() {
    let doc = SimDocument::parse(
        r#"<button data-mobile-menu-button aria-expanded="true">Menu</button><nav data-mobile-menu class="is-open"></nav>"#,
    )
    .unwrap();
    setup_mobile_menu(&doc, &MenuConfig::default());
    let button = node(&doc, "button");
    let menu = node(&doc, "nav");
    assert_eq!(doc.attr(&button, "aria-expanded").as_deref(), Some("true"));

    doc.click(button);
    assert_eq!(doc.attr(&button, "aria-expanded").as_deref(), Some("false"));
    assert!(!doc.has_class(&menu, "is-open"));

    doc.click(button);
    assert_eq!(doc.attr(&button, "aria-expanded").as_deref(), Some("true"));
    assert!(doc.has_class(&menu, "is-open"));
}

#[test]
fn test_menu_needs_both_parts() {
    let doc = SimDocument::parse("<button data-mobile-menu-button>Menu</button>").unwrap();
    assert!(!setup_mobile_menu(&doc, &MenuConfig::default()));

    let button = node(&doc, "button");
    assert_eq!(doc.click(button).handlers_run, 0);
    assert_eq!(doc.attr(&button, "aria-expanded"), None);
}

// ============================================================================
// form
// ============================================================================

#[test]
fn test_form_without_required_fields_submits() {
    let doc = SimDocument::parse(r#"<form data-validate><input name="q"></form>"#).unwrap();
    setup_form_validation(&doc, &FormConfig::default());
    let form = node(&doc, "form");

    let dispatch = doc.submit(form);
    assert!(!dispatch.default_prevented);
    assert!(doc.has_class(&form, "was-validated"));
    assert_eq!(doc.journal().submissions, [form]);
}

#[test]
fn test_empty_required_fields_block_submit() {
    let doc = page();
    initialize(&doc, &EnhanceConfig::default());
    let form = node(&doc, "form[data-validate]");

    doc.click(node(&doc, "#send"));

    assert!(doc.journal().submissions.is_empty());
    assert!(doc.has_class(&form, "was-validated"));
    for field in ["#name", "#email"] {
        let id = node(&doc, field);
        assert_eq!(doc.attr(&id, "aria-invalid").as_deref(), Some("true"));
        assert!(doc.has_class(&id, "is-invalid"));
        assert_eq!(
            error_text(&doc, field),
            ("Este campo é obrigatório".to_string(), Some("block".to_string()))
        );
    }
}

#[test]
fn test_whitespace_only_counts_as_empty() {
    let doc = page();
    setup_form_validation(&doc, &FormConfig::default());
    let config = FormConfig::default();
    doc.set_value(node(&doc, "#name"), "   ");
    doc.set_value(node(&doc, "#email"), "a@b.co");

    assert!(!validate_form(&doc, &node(&doc, "form[data-validate]"), &config));
    assert_eq!(error_text(&doc, "#name").0, "Este campo é obrigatório");
    assert!(!doc.has_class(&node(&doc, "#email"), "is-invalid"));
}

#[test]
fn test_bad_email_overwrites_message() {
    let doc = page();
    setup_form_validation(&doc, &FormConfig::default());
    doc.set_value(node(&doc, "#name"), "Ana");
    doc.set_value(node(&doc, "#email"), "not-an-email");

    let dispatch = doc.submit(node(&doc, "form[data-validate]"));

    assert!(dispatch.default_prevented);
    assert!(dispatch.propagation_stopped);
    let email = node(&doc, "#email");
    assert!(doc.has_class(&email, "is-invalid"));
    assert_eq!(
        error_text(&doc, "#email"),
        (
            "Por favor, insira um email válido".to_string(),
            Some("block".to_string())
        )
    );
    assert!(!doc.has_class(&node(&doc, "#name"), "is-invalid"));
}

#[test]
fn test_bad_email_blocked_when_required_comes_first() {
    let doc = SimDocument::parse(
        r#"<form data-validate><div><input required type="email"><span class="error-message"></span></div></form>"#,
    )
    .unwrap();
    setup_form_validation(&doc, &FormConfig::default());
    let input = node(&doc, "input");
    doc.set_value(input, "not-an-email");

    let form = node(&doc, "form");
    let dispatch = doc.submit(form);

    assert!(dispatch.default_prevented);
    assert!(doc.journal().submissions.is_empty());
    assert_eq!(doc.attr(&input, "aria-invalid").as_deref(), Some("true"));
    assert_eq!(doc.input_type(&input), "email");
    assert!(doc.to_html().contains(r#"type="email""#));
}

#[test]
fn test_email_with_surrounding_spaces_is_rejected() {
    let doc = page();
    let config = FormConfig::default();
    doc.set_value(node(&doc, "#name"), "Ana");
    doc.set_value(node(&doc, "#email"), " ana@example.com ");

    assert!(!validate_form(&doc, &node(&doc, "form[data-validate]"), &config));
    assert_eq!(error_text(&doc, "#email").0, "Por favor, insira um email válido");
}

#[test]
fn test_revalidation_clears_stale_errors() {
    let doc = page();
    setup_form_validation(&doc, &FormConfig::default());
    let form = node(&doc, "form[data-validate]");

    doc.submit(form);
    assert!(doc.has_class(&node(&doc, "#name"), "is-invalid"));

    doc.set_value(node(&doc, "#name"), "Ana");
    doc.set_value(node(&doc, "#email"), "ana@example.com");
    let dispatch = doc.submit(form);

    assert!(!dispatch.default_prevented);
    assert_eq!(doc.journal().submissions, [form]);
    for field in ["#name", "#email"] {
        let id = node(&doc, field);
        assert_eq!(doc.attr(&id, "aria-invalid"), None);
        assert!(!doc.has_class(&id, "is-invalid"));
        assert_eq!(error_text(&doc, field).1.as_deref(), Some("none"));
    }
}

#[test]
fn test_missing_error_slot_still_marks_field() {
    let doc = SimDocument::parse(r#"<form data-validate><input required></form>"#).unwrap();
    let config = FormConfig::default();
    let form = node(&doc, "form");

    assert!(!validate_form(&doc, &form, &config));
    let input = node(&doc, "input");
    assert_eq!(doc.attr(&input, "aria-invalid").as_deref(), Some("true"));
}

#[test]
fn test_unmarked_forms_are_ignored() {
    let doc = page();
    initialize(&doc, &EnhanceConfig::default());
    let plain = node(&doc, "#plain");

    doc.click(node(&doc, "#plain-send"));
    assert_eq!(doc.journal().submissions, [plain]);
    assert!(!doc.has_class(&plain, "was-validated"));
}

#[test]
fn test_custom_messages() {
    let doc = SimDocument::parse(
        r#"<form data-validate><p><input required><em class="error-message"></em></p></form>"#,
    )
    .unwrap();
    let mut config = FormConfig::default();
    config.messages.required = "Required".into();

    validate_form(&doc, &node(&doc, "form"), &config);
    assert_eq!(doc.text(node(&doc, "em")), "Required");
}

// ============================================================================
// scroll
// ============================================================================

#[test]
fn test_resolving_anchor_scrolls_and_focuses() {
    let doc = page();
    setup_smooth_scrolling(&doc, &ScrollConfig::default());
    let link = node(&doc, r##"a[href="#contact"]"##);
    let target = node(&doc, "#contact");

    let dispatch = doc.click(link);

    assert!(dispatch.default_prevented);
    let journal = doc.journal();
    assert!(journal.navigations.is_empty());
    assert_eq!(
        journal.scrolls,
        [(
            target,
            ScrollOptions {
                behavior: ScrollBehavior::Smooth,
                block: ScrollBlock::Start,
            }
        )]
    );
    assert_eq!(journal.focused, Some(target));
}

#[test]
fn test_unresolved_anchor_keeps_default() {
    let doc = page();
    setup_smooth_scrolling(&doc, &ScrollConfig::default());

    let dispatch = doc.click(node(&doc, r##"a[href="#missing"]"##));

    assert!(!dispatch.default_prevented);
    let journal = doc.journal();
    assert_eq!(journal.navigations, ["#missing"]);
    assert!(journal.scrolls.is_empty());
    assert_eq!(journal.focused, None);
}

#[test]
fn test_bare_hash_never_resolves() {
    let doc = SimDocument::parse(r##"<a href="#">Top</a><div id="">x</div>"##).unwrap();
    assert_eq!(setup_smooth_scrolling(&doc, &ScrollConfig::default()), 1);

    assert!(!doc.click(node(&doc, "a")).default_prevented);
}

#[test]
fn test_href_is_read_at_click_time() {
    let doc = SimDocument::parse(r##"<a href="#one">x</a><p id="one"></p><p id="two"></p>"##)
        .unwrap();
    setup_smooth_scrolling(&doc, &ScrollConfig::default());
    let link = node(&doc, "a");
    doc.set_attr(&link, "href", "#two");

    doc.click(link);
    assert_eq!(doc.focused(), Some(node(&doc, "#two")));
}

#[test]
fn test_scroll_options_from_config() {
    let doc = page();
    let config = ScrollConfig {
        behavior: ScrollBehavior::Instant,
        block: ScrollBlock::Center,
        focus: false,
        ..ScrollConfig::default()
    };
    setup_smooth_scrolling(&doc, &config);

    doc.click(node(&doc, r##"a[href="#contact"]"##));
    let journal = doc.journal();
    assert_eq!(journal.scrolls[0].1.behavior, ScrollBehavior::Instant);
    assert_eq!(journal.scrolls[0].1.block, ScrollBlock::Center);
    assert_eq!(journal.focused, None);
}

// ============================================================================
// lazy
// ============================================================================

#[test]
fn test_native_lazy_resolves_eagerly() {
    let doc = page();
    let outcome = setup_lazy_loading(&doc, &LazyConfig::default());

    assert_eq!(outcome.mode, LazyMode::Native);
    assert_eq!(outcome.images, 2);
    for (img, src) in doc.select("img").unwrap().into_iter().zip(["hero.jpg", "footer.jpg"]) {
        assert_eq!(doc.attr(&img, "src").as_deref(), Some(src));
        assert_eq!(doc.attr(&img, "data-src"), None);
        assert!(!doc.is_observed(img));
    }
}

#[test]
fn test_observer_resolves_on_first_visibility() {
    let doc = page().with_native_lazy_loading(false);
    let outcome = setup_lazy_loading(&doc, &LazyConfig::default());
    assert_eq!(outcome.mode, LazyMode::Observer);
    assert_eq!(outcome.images, 2);

    let hero = node(&doc, r#"img[alt="Hero"]"#);
    let footer = node(&doc, r#"img[alt="Footer"]"#);
    assert_eq!(doc.attr(&hero, "src"), None);

    // Leaving the viewport does nothing.
    assert_eq!(doc.conceal(hero), 1);
    assert_eq!(doc.attr(&hero, "src"), None);
    assert!(doc.is_observed(hero));

    assert_eq!(doc.reveal(hero), 1);
    assert_eq!(doc.attr(&hero, "src").as_deref(), Some("hero.jpg"));
    assert!(!doc.has_class(&hero, "lazy"));
    assert_eq!(doc.attr(&hero, "data-src").as_deref(), Some("hero.jpg"));
    assert!(!doc.is_observed(hero));

    // Unwatched after the first load.
    doc.set_attr(&hero, "src", "changed.jpg");
    assert_eq!(doc.reveal(hero), 0);
    assert_eq!(doc.attr(&hero, "src").as_deref(), Some("changed.jpg"));

    assert!(doc.is_observed(footer));
    assert!(doc.has_class(&footer, "lazy"));
}

#[test]
fn test_source_attr_matches_any_case() {
    let doc = page();
    let config = LazyConfig {
        selector: "img[data-SRC]".into(),
        source_attr: "data-Src".into(),
        ..LazyConfig::default()
    };
    let outcome = setup_lazy_loading(&doc, &config);

    assert_eq!(outcome.images, 2);
    let hero = node(&doc, r#"img[alt="Hero"]"#);
    assert_eq!(doc.attr(&hero, "src").as_deref(), Some("hero.jpg"));
    assert_eq!(doc.attr(&hero, "data-src"), None);
}

#[test]
fn test_no_observer_leaves_images() {
    let doc = page()
        .with_native_lazy_loading(false)
        .with_visibility_observer(false);
    let outcome = setup_lazy_loading(&doc, &LazyConfig::default());

    assert_eq!(outcome.mode, LazyMode::Unavailable);
    let hero = node(&doc, r#"img[alt="Hero"]"#);
    assert_eq!(doc.attr(&hero, "src"), None);
    assert!(doc.has_class(&hero, "lazy"));
}
