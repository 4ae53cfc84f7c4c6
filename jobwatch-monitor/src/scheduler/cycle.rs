//! Poll cycle
//!
//! fetch → filter → admit → notify. A failed live fetch is replaced by a
//! synthetic batch so that a session never stalls on a transient failure.

use chrono::Utc;
use jobwatch_core::{Job, SyntheticSource};
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::lock;
use crate::config::Settings;
use crate::repository::ListingSource;
use crate::service::EventSink;
use crate::session::Session;

/// Where a cycle's batch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSource {
    Live,
    Synthetic,
}

/// Outcome of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub source: BatchSource,
    /// Jobs in the fetched batch
    pub fetched: usize,
    /// Jobs that passed the filters
    pub matched: usize,
    /// Jobs that were new to the store
    pub admitted: usize,
}

/// Shared handles needed to run a cycle
///
/// Cheap to clone; the recurring loop owns one clone.
#[derive(Clone)]
pub struct CycleRunner {
    source: Arc<dyn ListingSource>,
    synthetic: Arc<Mutex<SyntheticSource<StdRng>>>,
    sinks: Arc<Vec<Arc<dyn EventSink>>>,
    settings: Arc<Mutex<Settings>>,
    session: Arc<Mutex<Session>>,
}

impl CycleRunner {
    pub fn new(
        source: Arc<dyn ListingSource>,
        synthetic: SyntheticSource<StdRng>,
        sinks: Vec<Arc<dyn EventSink>>,
        settings: Settings,
    ) -> Self {
        let session = Session::new(settings.capacity());
        Self {
            source,
            synthetic: Arc::new(Mutex::new(synthetic)),
            sinks: Arc::new(sinks),
            settings: Arc::new(Mutex::new(settings)),
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> Settings {
        lock(&self.settings).clone()
    }

    pub fn replace_settings(&self, settings: Settings) {
        let capacity = settings.capacity();
        *lock(&self.settings) = settings;
        lock(&self.session).set_capacity(capacity);
    }

    /// Runs `f` with exclusive access to the session
    pub fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut lock(&self.session))
    }

    /// Sends the current stats to every sink
    pub fn publish_stats(&self) {
        let stats = lock(&self.session).stats();
        for sink in self.sinks.iter() {
            sink.on_stats_changed(&stats);
        }
    }

    /// Runs one poll cycle
    pub async fn run(&self) -> CycleReport {
        let settings = self.settings();
        let category = settings.primary_category();

        debug!("Polling listings for category {}", category);

        let (source, batch) = match self
            .source
            .fetch_candidates(category, &settings.countries)
            .await
        {
            Ok(jobs) => (BatchSource::Live, jobs),
            Err(e) => {
                warn!("Live listings unavailable, using synthetic data: {:#}", e);
                (BatchSource::Synthetic, self.synthetic_batch())
            }
        };

        let fetched = batch.len();
        let matched = settings.filter().apply(&batch);
        let matched_count = matched.len();

        let (admitted, stats) = self.with_session(|session| {
            let admitted = session.record_cycle(matched, Utc::now());
            (admitted, session.stats())
        });

        for job in &admitted {
            for sink in self.sinks.iter() {
                sink.on_new_job(job);
            }
        }
        for sink in self.sinks.iter() {
            sink.on_stats_changed(&stats);
        }

        if !admitted.is_empty() {
            info!("{} new job(s) found", admitted.len());
        }

        CycleReport {
            source,
            fetched,
            matched: matched_count,
            admitted: admitted.len(),
        }
    }

    fn synthetic_batch(&self) -> Vec<Job> {
        lock(&self.synthetic).generate(Utc::now())
    }
}
