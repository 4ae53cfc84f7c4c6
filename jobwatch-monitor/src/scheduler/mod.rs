//! Scheduler layer for the monitor
//!
//! Drives poll cycles: one immediately on start, then one per interval
//! until stopped. Cycles never overlap.

pub mod cycle;
pub mod monitor;

pub use cycle::{BatchSource, CycleReport};
pub use monitor::{Monitor, MonitorError, MonitorState};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks shared state, recovering it if a panicking holder poisoned the lock
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
