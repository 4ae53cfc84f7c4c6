//! Monitoring session state
//!
//! The store of known jobs plus the running counters behind [`Stats`]. The
//! store outlives start/stop; only an explicit clear empties it.

use chrono::{DateTime, Utc};
use jobwatch_core::{Job, JobStore, Stats};
use std::num::NonZeroUsize;
use uuid::Uuid;

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    store: JobStore,
    new_this_session: usize,
    last_check: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            id: Uuid::new_v4(),
            store: JobStore::new(capacity),
            new_this_session: 0,
            last_check: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Begins a new monitoring session over the existing store
    pub fn restart(&mut self) {
        self.id = Uuid::new_v4();
        self.new_this_session = 0;
    }

    /// Forgets every known job and resets the counters
    pub fn clear(&mut self) {
        self.store.reset();
        self.new_this_session = 0;
        self.last_check = None;
    }

    pub fn set_capacity(&mut self, capacity: NonZeroUsize) {
        self.store.set_capacity(capacity);
    }

    /// Admits a filtered batch and records the check
    pub fn record_cycle(&mut self, matched: Vec<Job>, checked_at: DateTime<Utc>) -> Vec<Job> {
        let admitted = self.store.admit(matched);
        self.new_this_session += admitted.len();
        self.last_check = Some(checked_at);
        admitted
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.store.jobs()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total_stored: self.store.len(),
            new_this_session: self.new_this_session,
            last_check_time: self.last_check,
            average_budget: self.store.average_budget(),
        }
    }
}
