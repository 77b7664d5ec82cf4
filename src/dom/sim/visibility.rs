//! Simulated `IntersectionObserver`.

use std::cell::RefCell;
use std::rc::Rc;

use super::tree::NodeId;
use crate::dom::{VisibilityCallback, VisibilityEntry, VisibilityWatcher};

/// Visibility watcher driven by [`SimDocument::reveal`](super::SimDocument::reveal)
/// and [`SimDocument::conceal`](super::SimDocument::conceal).
#[derive(Clone)]
pub struct SimWatcher {
    inner: Rc<WatcherInner>,
}

struct WatcherInner {
    observed: RefCell<Vec<NodeId>>,
    callback: RefCell<Option<VisibilityCallback<SimWatcher>>>,
}

impl SimWatcher {
    pub(crate) fn new(callback: VisibilityCallback<SimWatcher>) -> Self {
        Self {
            inner: Rc::new(WatcherInner {
                observed: RefCell::new(Vec::new()),
                callback: RefCell::new(Some(callback)),
            }),
        }
    }

    /// Elements currently watched, in registration order.
    pub fn observed(&self) -> Vec<NodeId> {
        self.inner.observed.borrow().clone()
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.inner.observed.borrow().contains(&node)
    }

    /// Deliver one batch of entries to the callback.
    pub(crate) fn notify(&self, entries: &[VisibilityEntry<NodeId>]) {
        // The callback is taken out while it runs so it can call back into
        // `unobserve` (or even `notify`) without a double borrow.
        let Some(mut callback) = self.inner.callback.borrow_mut().take() else {
            return;
        };
        callback(entries, self);

        let mut slot = self.inner.callback.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}

impl VisibilityWatcher for SimWatcher {
    type Node = NodeId;

    fn observe(&self, node: &NodeId) {
        let mut observed = self.inner.observed.borrow_mut();
        if !observed.contains(node) {
            observed.push(*node);
        }
    }

    fn unobserve(&self, node: &NodeId) {
        self.inner.observed.borrow_mut().retain(|n| n != node);
    }
}

impl std::fmt::Debug for SimWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimWatcher")
            .field("observed", &self.inner.observed.borrow())
            .finish_non_exhaustive()
    }
}
