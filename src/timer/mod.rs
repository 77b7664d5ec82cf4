//! Deferred callbacks and the debounce helper.
//!
//! [`Scheduler`] is the one-shot timer capability (`setTimeout` /
//! `clearTimeout`). [`ManualScheduler`] runs on a virtual clock for tests and
//! headless runs; the `web` backend provides a window-backed one.

mod debounce;
mod manual;

pub use debounce::{Debounced, debounce};
pub use manual::ManualScheduler;

use std::time::Duration;

/// Task run once when its timer fires.
pub type Task = Box<dyn FnOnce()>;

/// One-shot timer capability.
pub trait Scheduler: Clone + 'static {
    type Handle: Copy + PartialEq + std::fmt::Debug + 'static;

    /// Run `task` after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Cancel a pending task. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: Self::Handle);
}
