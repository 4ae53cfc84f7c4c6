//! Dedup & retention store
//!
//! Keyed collection of known jobs with insertion-order iteration and a
//! capacity bound. The first job seen under an id wins; once the bound is
//! exceeded the oldest insertions are evicted first.

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;

use crate::domain::Job;

/// Bounded, insertion-ordered map from job id to job
#[derive(Debug, Clone)]
pub struct JobStore {
    jobs: HashMap<String, Job>,
    order: VecDeque<String>,
    capacity: NonZeroUsize,
}

impl JobStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            jobs: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Inserts every job whose id is unknown and returns those jobs, in batch
    /// order
    ///
    /// Existing entries are never overwritten, including by a duplicate later
    /// in the same batch. Afterwards the oldest entries are evicted until the
    /// store is back within capacity.
    pub fn admit(&mut self, batch: impl IntoIterator<Item = Job>) -> Vec<Job> {
        let mut admitted = Vec::new();

        for job in batch {
            if self.jobs.contains_key(&job.id) {
                continue;
            }
            self.order.push_back(job.id.clone());
            self.jobs.insert(job.id.clone(), job.clone());
            admitted.push(job);
        }

        self.evict_overflow();
        admitted
    }

    /// Removes every entry
    pub fn reset(&mut self) {
        self.jobs.clear();
        self.order.clear();
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Changes the bound, evicting the oldest entries if needed
    pub fn set_capacity(&mut self, capacity: NonZeroUsize) {
        self.capacity = capacity;
        self.evict_overflow();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.jobs.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// Stored jobs, oldest first
    pub fn jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.order.iter().filter_map(|id| self.jobs.get(id))
    }

    /// Rounded mean budget over jobs with a specified (non-zero) budget
    pub fn average_budget(&self) -> u64 {
        let (total, count) = self
            .jobs
            .values()
            .filter(|job| job.budget > 0)
            .fold((0u128, 0u128), |(total, count), job| {
                (total + u128::from(job.budget), count + 1)
            });

        if count == 0 {
            return 0;
        }
        // Round half up
        ((total * 2 + count) / (count * 2)) as u64
    }

    fn evict_overflow(&mut self) {
        while self.order.len() > self.capacity.get() {
            if let Some(oldest) = self.order.pop_front() {
                self.jobs.remove(&oldest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::Utc;

    fn job(id: &str) -> Job {
        job_with(id, "original", 0)
    }

    fn job_with(id: &str, title: &str, budget: u64) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            budget,
            category: Category::ItProgramming.display_name().to_string(),
            category_id: Category::ItProgramming,
            country: "Brasil".to_string(),
            country_code: "BR".to_string(),
            url: format!("https://www.workana.com/jobs/{id}"),
            skills: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    fn store(capacity: usize) -> JobStore {
        JobStore::new(NonZeroUsize::new(capacity).unwrap())
    }

    fn ids<'a>(jobs: impl IntoIterator<Item = &'a Job>) -> Vec<&'a str> {
        jobs.into_iter().map(|job| job.id.as_str()).collect()
    }

    #[test]
    fn test_oldest_entry_is_evicted() {
        let mut store = store(2);
        store.admit([job("a"), job("b")]);
        let admitted = store.admit([job("c")]);

        assert_eq!(ids(&admitted), vec!["c"]);
        assert_eq!(ids(store.jobs()), vec!["b", "c"]);
        assert!(!store.contains("a"));
    }

    #[test]
    fn test_first_seen_wins() {
        let mut store = store(10);
        store.admit([job("a")]);
        let admitted = store.admit([job_with("a", "replacement", 900), job("b")]);

        assert_eq!(ids(&admitted), vec!["b"]);
        assert_eq!(store.get("a").map(|job| job.title.as_str()), Some("original"));
    }

    #[test]
    fn test_duplicates_within_one_batch() {
        let mut store = store(10);
        let admitted = store.admit([job("a"), job_with("a", "second", 1), job("b")]);

        assert_eq!(ids(&admitted), vec!["a", "b"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").map(|job| job.title.as_str()), Some("original"));
    }

    #[test]
    fn test_admitted_ids_were_absent_before() {
        let mut store = store(3);
        store.admit([job("a"), job("b")]);
        let before: Vec<String> = store.jobs().map(|job| job.id.clone()).collect();

        let batch = [job("b"), job("c"), job("d"), job("a")];
        let admitted = store.admit(batch.clone());

        assert!(admitted.len() <= batch.len());
        assert!(admitted.iter().all(|job| !before.contains(&job.id)));
        assert_eq!(ids(&admitted), vec!["c", "d"]);
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut store = store(3);
        for round in 0..10 {
            let batch: Vec<_> = (0..4).map(|i| job(&format!("{round}-{i}"))).collect();
            store.admit(batch);
            assert!(store.len() <= 3);
        }
        // Most recent insertions survive
        assert_eq!(ids(store.jobs()), vec!["9-1", "9-2", "9-3"]);
    }

    #[test]
    fn test_oversized_batch_is_reported_but_trimmed() {
        let mut store = store(2);
        let admitted = store.admit([job("a"), job("b"), job("c")]);

        assert_eq!(admitted.len(), 3);
        assert_eq!(ids(store.jobs()), vec!["b", "c"]);
    }

    #[test]
    fn test_reset_clears_entries() {
        let mut store = store(5);
        store.admit([job("a"), job("b")]);
        store.reset();

        assert!(store.is_empty());
        assert_eq!(ids(&store.admit([job("a")])), vec!["a"]);
    }

    #[test]
    fn test_shrinking_capacity_evicts_oldest() {
        let mut store = store(5);
        store.admit([job("a"), job("b"), job("c")]);
        store.set_capacity(NonZeroUsize::new(1).unwrap());

        assert_eq!(ids(store.jobs()), vec!["c"]);
    }

    #[test]
    fn test_average_budget_ignores_unspecified() {
        let mut store = store(10);
        assert_eq!(store.average_budget(), 0);

        store.admit([
            job_with("a", "a", 0),
            job_with("b", "b", 100),
            job_with("c", "c", 201),
        ]);
        // (100 + 201) / 2 = 150.5
        assert_eq!(store.average_budget(), 151);
    }
}
