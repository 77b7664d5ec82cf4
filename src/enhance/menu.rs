use crate::config::MenuConfig;
use crate::debug;
use crate::dom::{DomQuery, EventKind};

/// Wire the mobile menu toggle.
///
/// The first toggle and first panel are used. Each click flips the toggle's
/// expanded attribute between `"true"` and `"false"` and toggles the open
/// class on the panel. The current state is read at click time, so markup that
/// starts without the attribute opens on the first click.
///
/// Returns whether the handler was bound.
pub fn setup_mobile_menu<D: DomQuery>(doc: &D, config: &MenuConfig) -> bool {
    let toggle = doc.query(&config.toggle);
    let panel = doc.query(&config.panel);

    let (Some(toggle), Some(panel)) = (toggle, panel) else {
        debug!("menu"; "toggle or panel not found, skipping");
        return false;
    };

    let handler_doc = doc.clone();
    let button = toggle.clone();
    let expanded_attr = config.expanded_attr.clone();
    let open_class = config.open_class.clone();

    doc.add_listener(
        &toggle,
        EventKind::Click,
        Box::new(move |_| {
            let expanded =
                handler_doc.attr(&button, &expanded_attr).as_deref() == Some("true");
            let next = if expanded { "false" } else { "true" };
            handler_doc.set_attr(&button, &expanded_attr, next);
            handler_doc.toggle_class(&panel, &open_class);
        }),
    );
    true
}
