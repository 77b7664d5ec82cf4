use std::fmt;

use serde::Serialize;

use crate::config::LazyConfig;
use crate::debug;
use crate::dom::{DomQuery, VisibilityCallback, VisibilityEntry, VisibilityWatcher};

/// Which lazy-loading path ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LazyMode {
    /// Platform reports native `loading` support.
    Native,
    /// Images handed to a visibility watcher.
    Observer,
    /// Neither facility exists; images are left untouched.
    Unavailable,
}

impl fmt::Display for LazyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Native => "native",
            Self::Observer => "observer",
            Self::Unavailable => "unavailable",
        })
    }
}

/// Outcome of [`setup_lazy_loading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LazyLoad {
    pub mode: LazyMode,
    /// Images resolved (native) or watched (observer).
    pub images: usize,
}

/// Load deferred images.
///
/// With native support every matching image gets its real source right away.
/// Otherwise each image is watched and resolved the first time it becomes
/// visible, then unwatched.
pub fn setup_lazy_loading<D: DomQuery>(doc: &D, config: &LazyConfig) -> LazyLoad {
    if !doc.supports_native_lazy_loading() {
        return observe_images(doc, config);
    }

    // NOTE: This branch does not defer anything. It copies the source
    // attribute into `src` immediately, so every image starts loading at
    // setup time instead of being left to the browser's `loading="lazy"`.
    // Pages relying on it get eager loading. Kept as shipped until the site
    // owners decide whether to switch to setting `loading="lazy"`.
    let images = doc.query_all(&config.selector);
    for img in &images {
        if let Some(src) = doc.attr(img, &config.source_attr) {
            doc.set_attr(img, "src", &src);
        }
        doc.remove_attr(img, &config.source_attr);
    }

    debug!("lazy"; "resolved {} images eagerly", images.len());
    LazyLoad {
        mode: LazyMode::Native,
        images: images.len(),
    }
}

fn observe_images<D: DomQuery>(doc: &D, config: &LazyConfig) -> LazyLoad {
    let handler_doc = doc.clone();
    let source_attr = config.source_attr.clone();
    let pending_class = config.pending_class.clone();

    // The source attribute stays in place on this path.
    let callback: VisibilityCallback<D::Watcher> = Box::new(
        move |entries: &[VisibilityEntry<D::Node>], watcher: &D::Watcher| {
            for entry in entries.iter().filter(|e| e.is_intersecting) {
                let img = &entry.target;
                if let Some(src) = handler_doc.attr(img, &source_attr) {
                    handler_doc.set_attr(img, "src", &src);
                }
                handler_doc.remove_class(img, &pending_class);
                watcher.unobserve(img);
            }
        },
    );

    let Some(watcher) = doc.visibility_watcher(callback) else {
        debug!("lazy"; "no visibility observer, images left as-is");
        return LazyLoad {
            mode: LazyMode::Unavailable,
            images: 0,
        };
    };

    let images = doc.query_all(&config.selector);
    for img in &images {
        watcher.observe(img);
    }

    LazyLoad {
        mode: LazyMode::Observer,
        images: images.len(),
    }
}
