//! Monitoring statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot published after every poll cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Jobs currently held by the store
    pub total_stored: usize,

    /// Jobs admitted since the monitoring session started
    pub new_this_session: usize,

    /// When the last poll cycle finished
    pub last_check_time: Option<DateTime<Utc>>,

    /// Rounded mean budget over stored jobs with a specified budget
    pub average_budget: u64,
}
