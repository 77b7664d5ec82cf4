use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::{Scheduler, Task};

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing runs until [`advance`](Self::advance) moves time forward. Due tasks
/// run in deadline order; tasks with the same deadline run in the order they
/// were scheduled.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<Clock>>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

struct Pending {
    id: u64,
    due: Duration,
    task: Task,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    /// Tasks scheduled while advancing run too if they fall inside the window.
    /// Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.inner.borrow().now + by;
        let mut ran = 0;

        while let Some(task) = self.pop_due(target) {
            // No borrow is held while the task runs; it may schedule or cancel.
            task();
            ran += 1;
        }

        self.inner.borrow_mut().now = target;
        ran
    }

    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut clock = self.inner.borrow_mut();
        let index = clock
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;

        let pending = clock.pending.remove(index);
        clock.now = pending.due;
        Some(pending.task)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&self, delay: Duration, task: Task) -> u64 {
        let mut clock = self.inner.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + delay;
        clock.pending.push(Pending { id, due, task });
        id
    }

    fn cancel(&self, handle: u64) {
        self.inner.borrow_mut().pending.retain(|p| p.id != handle);
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clock = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = Rc::clone(&log);
            move |label: &'static str| -> Task {
                let log = Rc::clone(&log);
                Box::new(move || log.borrow_mut().push(label))
            }
        };
        (log, make)
    }

    #[test]
    fn test_runs_in_deadline_then_schedule_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_millis(20), task("late"));
        scheduler.schedule(Duration::from_millis(10), task("first"));
        scheduler.schedule(Duration::from_millis(10), task("second"));

        assert_eq!(scheduler.advance(Duration::from_millis(15)), 2);
        assert_eq!(*log.borrow(), ["first", "second"]);
        assert_eq!(scheduler.now(), Duration::from_millis(15));

        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        assert_eq!(*log.borrow(), ["first", "second", "late"]);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        let handle = scheduler.schedule(Duration::from_millis(5), task("cancelled"));
        scheduler.cancel(handle);
        scheduler.cancel(handle);

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(10)), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_task_scheduled_while_advancing() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        let inner = scheduler.clone();
        let chained = task("chained");
        scheduler.schedule(
            Duration::from_millis(5),
            Box::new(move || {
                inner.schedule(Duration::from_millis(5), chained);
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(10)), 2);
        assert_eq!(*log.borrow(), ["chained"]);
    }
}
