//! Monitor state machine
//!
//! ```text
//!            start (categories selected)
//!   Idle ───────────────────────────────▶ Monitoring
//!    ▲                                        │
//!    └──────────────── stop ◀─────────────────┘
//! ```
//!
//! `start` runs one cycle right away and then spawns the recurring loop.
//! The loop awaits each cycle before waiting for the next tick, and ticks
//! missed meanwhile are skipped, so cycles never overlap. `stop` is checked
//! between cycles: a cycle already in flight always completes.

use jobwatch_core::{Job, Stats, SyntheticSource};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cycle::{CycleReport, CycleRunner};
use crate::config::{Settings, SettingsError};
use crate::repository::ListingSource;
use crate::service::EventSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Monitoring,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonitorError {
    #[error("select at least one category before starting")]
    NoCategories,

    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
}

struct Running {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Poll orchestrator
pub struct Monitor {
    runner: CycleRunner,
    running: Option<Running>,
}

impl Monitor {
    pub fn new(
        source: Arc<dyn ListingSource>,
        sinks: Vec<Arc<dyn EventSink>>,
        settings: Settings,
    ) -> Self {
        let synthetic = SyntheticSource::new(StdRng::from_os_rng());
        Self::with_synthetic(source, sinks, settings, synthetic)
    }

    /// Creates a monitor with a specific fallback source, e.g. a seeded one
    pub fn with_synthetic(
        source: Arc<dyn ListingSource>,
        sinks: Vec<Arc<dyn EventSink>>,
        settings: Settings,
        synthetic: SyntheticSource<StdRng>,
    ) -> Self {
        Self {
            runner: CycleRunner::new(source, synthetic, sinks, settings),
            running: None,
        }
    }

    pub fn state(&self) -> MonitorState {
        if self.running.is_some() {
            MonitorState::Monitoring
        } else {
            MonitorState::Idle
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.runner.with_session(|session| session.id())
    }

    pub fn settings(&self) -> Settings {
        self.runner.settings()
    }

    pub fn stats(&self) -> Stats {
        self.runner.with_session(|session| session.stats())
    }

    /// Known jobs, oldest first
    pub fn jobs(&self) -> Vec<Job> {
        self.runner
            .with_session(|session| session.jobs().cloned().collect())
    }

    /// Starts monitoring
    ///
    /// Returns the report of the immediate first cycle, or `None` if the
    /// monitor was already running.
    pub async fn start(&mut self) -> Result<Option<CycleReport>, MonitorError> {
        if self.running.is_some() {
            debug!("Start requested while already monitoring");
            return Ok(None);
        }

        let settings = self.runner.settings();
        if settings.categories.is_empty() {
            return Err(MonitorError::NoCategories);
        }

        let session_id = self.runner.with_session(|session| {
            session.restart();
            session.id()
        });
        info!(
            "Monitoring started (session {}, interval {:?})",
            session_id,
            settings.check_interval()
        );

        let report = self.runner.run().await;

        let (stop, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(
            self.runner.clone(),
            settings.check_interval(),
            stop_rx,
        ));
        self.running = Some(Running { stop, handle });

        Ok(Some(report))
    }

    /// Stops monitoring, waiting for a cycle in flight to finish
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            debug!("Stop requested while idle");
            return;
        };

        let _ = running.stop.send(true);
        if let Err(e) = running.handle.await {
            warn!("Poll loop ended abnormally: {}", e);
        }

        info!("Monitoring stopped");
    }

    /// Forgets every known job and resets the counters
    pub fn clear(&self) {
        self.runner.with_session(|session| session.clear());
        self.runner.publish_stats();
        info!("Known jobs cleared");
    }

    /// Replaces the settings
    ///
    /// Filters and capacity apply from the next cycle, the interval from the
    /// next start.
    pub fn update_settings(&self, settings: Settings) -> Result<(), MonitorError> {
        settings.validate()?;
        self.runner.replace_settings(settings);
        debug!("Settings updated");
        Ok(())
    }

    /// Runs a single cycle without changing state
    pub async fn poll_once(&self) -> CycleReport {
        self.runner.run().await
    }
}

async fn run_loop(runner: CycleRunner, period: Duration, mut stop: watch::Receiver<bool>) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => break,
            _ = ticker.tick() => {}
        }

        let report = runner.run().await;
        debug!(
            "Cycle finished: source={:?}, fetched={}, matched={}, admitted={}",
            report.source, report.fetched, report.matched, report.admitted
        );
    }
}
