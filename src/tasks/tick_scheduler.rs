//! Scheduler abstraction and the tokio-backed implementation

use std::{
    ops::ControlFlow,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{
    runtime::Handle,
    task::AbortHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::error::Result;

/// Callback run on every tick. Returning `Break` ends the subscription.
pub type TickTask = Box<dyn FnMut() -> ControlFlow<()> + Send + 'static>;

/// Source of periodic ticks
pub trait Scheduler: Send + Sync {
    /// Run `task` once per `interval` until it breaks or the handle is cancelled
    fn schedule_periodic(&self, interval: Duration, task: TickTask) -> TickHandle;
}

/// Cancels a periodic subscription. Dropping the handle cancels it too.
#[derive(Debug)]
pub struct TickHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
}

impl TickHandle {
    pub(crate) fn new(cancelled: Arc<AtomicBool>, abort: Option<AbortHandle>) -> Self {
        Self { cancelled, abort }
    }

    /// Stop deliveries.
    ///
    /// A delivery already past its cancellation check may still complete;
    /// callers that must not observe it guard their own state.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Delivers ticks from a task spawned on a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is running on
    pub fn current() -> Result<Self> {
        Ok(Self::new(Handle::try_current()?))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_periodic(&self, period: Duration, mut task: TickTask) -> TickHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let join = self.runtime.spawn(async move {
            // First delivery comes one full period after scheduling
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                if task().is_break() {
                    debug!("Periodic task finished");
                    break;
                }
            }
        });

        TickHandle::new(cancelled, Some(join.abort_handle()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn counting_task(count: Arc<AtomicU32>, stop_after: u32) -> TickTask {
        Box::new(move || {
            let n = count.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= stop_after {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_once_per_period() {
        let scheduler = TokioScheduler::current().unwrap();
        let count = Arc::new(AtomicU32::new(0));
        let _handle = scheduler.schedule_periodic(
            Duration::from_secs(1),
            counting_task(Arc::clone(&count), u32::MAX),
        );

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn break_stops_deliveries() {
        let scheduler = TokioScheduler::current().unwrap();
        let count = Arc::new(AtomicU32::new(0));
        let _handle = scheduler.schedule_periodic(
            Duration::from_secs(1),
            counting_task(Arc::clone(&count), 2),
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_deliveries() {
        let scheduler = TokioScheduler::current().unwrap();
        let count = Arc::new(AtomicU32::new(0));
        let mut handle = scheduler.schedule_periodic(
            Duration::from_secs(1),
            counting_task(Arc::clone(&count), u32::MAX),
        );

        tokio::time::sleep(Duration::from_millis(1500)).await;
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn current_fails_outside_runtime() {
        assert!(TokioScheduler::current().is_err());
    }
}
