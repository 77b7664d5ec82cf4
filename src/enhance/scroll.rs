use crate::config::ScrollConfig;
use crate::debug;
use crate::dom::{DomEvent, DomQuery, EventKind};

/// Scroll smoothly to in-page targets.
///
/// On click, the link's `href` minus its first character is looked up as an
/// element id. A match cancels the navigation, scrolls the target into view
/// and focuses it; no match leaves the click alone.
///
/// Returns how many links were bound.
pub fn setup_smooth_scrolling<D: DomQuery>(doc: &D, config: &ScrollConfig) -> usize {
    let links = doc.query_all(&config.selector);
    if links.is_empty() {
        debug!("scroll"; "no links match `{}`", config.selector);
        return 0;
    }

    let options = config.options();
    let focus = config.focus;

    for link in &links {
        let handler_doc = doc.clone();
        let anchor = link.clone();

        doc.add_listener(
            link,
            EventKind::Click,
            Box::new(move |event: &D::Event| {
                let Some(target) = fragment_target(&handler_doc, &anchor) else {
                    return;
                };
                event.prevent_default();
                handler_doc.scroll_into_view(&target, options);
                if focus {
                    handler_doc.focus(&target);
                }
            }),
        );
    }
    links.len()
}

/// Element named by the link's fragment, read at click time.
///
/// The fragment is used verbatim (no percent-decoding); a bare `#` yields an
/// empty id, which never resolves.
fn fragment_target<D: DomQuery>(doc: &D, link: &D::Node) -> Option<D::Node> {
    let href = doc.attr(link, "href")?;
    let mut chars = href.chars();
    chars.next()?;
    let id = chars.as_str();
    if id.is_empty() {
        return None;
    }
    doc.element_by_id(id)
}
