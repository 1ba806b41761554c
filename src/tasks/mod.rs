//! Periodic tick scheduling
//! 
//! The game never owns a timer itself. A `Scheduler` delivers ticks and hands
//! back a `TickHandle` that stops them.

pub mod manual;
pub mod tick_scheduler;

// Re-export main types
pub use manual::ManualScheduler;
pub use tick_scheduler::{Scheduler, TickHandle, TickTask, TokioScheduler};
