use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::{Scheduler, Task};

/// Debounced wrapper returned by [`debounce`].
///
/// Clones share the same pending timer, so a clone captured by one event
/// handler and a clone held elsewhere still debounce together.
pub struct Debounced<S: Scheduler, A> {
    scheduler: S,
    func: Rc<RefCell<dyn FnMut(A)>>,
    wait: Duration,
    immediate: bool,
    /// Pending trailing timer; owned by this wrapper alone.
    timeout: Rc<Cell<Option<S::Handle>>>,
}

/// Wrap `func` so bursts of calls collapse into one.
///
/// Every call cancels the pending timer and arms a new one for `wait`.
/// - `immediate == false`: `func` runs once, `wait` after the last call of a
///   burst, with that call's arguments.
/// - `immediate == true`: `func` runs synchronously on the first call of a
///   burst; the trailing timer only clears the pending state.
///
/// `func` may call the wrapper again from inside itself; such a call only
/// re-arms the timer.
pub fn debounce<S, A, F>(scheduler: S, func: F, wait: Duration, immediate: bool) -> Debounced<S, A>
where
    S: Scheduler,
    A: 'static,
    F: FnMut(A) + 'static,
{
    Debounced {
        scheduler,
        func: Rc::new(RefCell::new(func)),
        wait,
        immediate,
        timeout: Rc::new(Cell::new(None)),
    }
}

impl<S: Scheduler, A: 'static> Debounced<S, A> {
    pub fn call(&self, args: A) {
        let call_now = self.immediate && self.timeout.get().is_none();

        if let Some(handle) = self.timeout.take() {
            self.scheduler.cancel(handle);
        }

        let timeout = Rc::clone(&self.timeout);
        let (later, now_args): (Task, Option<A>) = if self.immediate {
            (Box::new(move || timeout.set(None)), Some(args))
        } else {
            let func = Rc::clone(&self.func);
            let later = move || {
                timeout.set(None);
                let mut func = func.borrow_mut();
                (*func)(args);
            };
            (Box::new(later), None)
        };

        let handle = self.scheduler.schedule(self.wait, later);
        self.timeout.set(Some(handle));

        if call_now && let Some(args) = now_args {
            let mut func = self.func.borrow_mut();
            (*func)(args);
        }
    }

    /// Whether a trailing timer is armed.
    pub fn is_pending(&self) -> bool {
        self.timeout.get().is_some()
    }
}

impl<S: Scheduler, A> Clone for Debounced<S, A> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            func: Rc::clone(&self.func),
            wait: self.wait,
            immediate: self.immediate,
            timeout: Rc::clone(&self.timeout),
        }
    }
}
