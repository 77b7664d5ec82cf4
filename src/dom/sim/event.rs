//! Events dispatched through the simulated document.

use std::cell::Cell;

use super::tree::NodeId;
use crate::dom::{DomEvent, EventKind};

/// A dispatched event. Flags use `Cell` because handlers only get `&SimEvent`.
#[derive(Debug)]
pub struct SimEvent {
    kind: EventKind,
    target: NodeId,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl SimEvent {
    pub(crate) fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

impl DomEvent for SimEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// What happened when an event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Dispatch {
    /// Whether a handler called `prevent_default`.
    pub default_prevented: bool,
    /// Whether bubbling stopped before reaching the document.
    pub propagation_stopped: bool,
    /// Handlers invoked, across the whole propagation path.
    pub handlers_run: usize,
}
