//! Manually-advanced scheduler for deterministic games and tests

use std::{
    ops::ControlFlow,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};
use tracing::debug;

use super::tick_scheduler::{Scheduler, TickHandle, TickTask};

struct Entry {
    interval: Duration,
    next_due: Duration,
    task: TickTask,
    cancelled: Arc<AtomicBool>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    entries: Vec<Entry>,
}

/// Scheduler driven by a virtual clock.
///
/// Nothing happens until `advance` moves the clock forward; every tick that
/// falls due is then delivered in time order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Subscriptions that are neither cancelled nor finished
    pub fn active_count(&self) -> usize {
        let mut clock = self.lock();
        clock.entries.retain(|e| !e.cancelled.load(Ordering::SeqCst));
        clock.entries.len()
    }

    /// Move the clock forward, returning the number of ticks delivered
    pub fn advance(&self, by: Duration) -> usize {
        let mut clock = self.lock();
        let target = clock.now + by;
        let mut delivered = 0;

        loop {
            clock.entries.retain(|e| !e.cancelled.load(Ordering::SeqCst));
            let next = clock
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.next_due <= target)
                .min_by_key(|(_, e)| e.next_due)
                .map(|(i, _)| i);
            let Some(i) = next else { break };

            let entry = &mut clock.entries[i];
            let due = entry.next_due;
            entry.next_due += entry.interval;
            let flow = (entry.task)();
            if flow.is_break() {
                entry.cancelled.store(true, Ordering::SeqCst);
            }
            clock.now = due;
            delivered += 1;
        }

        clock.now = target;
        debug!("Manual clock advanced to {:?}, {} ticks delivered", target, delivered);
        delivered
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_periodic(&self, interval: Duration, task: TickTask) -> TickHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut clock = self.lock();
        let next_due = clock.now + interval;
        clock.entries.push(Entry {
            interval,
            next_due,
            task,
            cancelled: Arc::clone(&cancelled),
        });
        TickHandle::new(cancelled, None)
    }
}
