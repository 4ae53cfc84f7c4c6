//! Jobwatch Core
//!
//! Core types and the listing pipeline for the Jobwatch marketplace monitor.
//!
//! This crate contains:
//! - Domain types: jobs, categories, country lookup, statistics
//! - DTOs: payloads exchanged between the harvester and the monitor
//! - Normalizer: candidate elements to jobs
//! - Synthetic source: stand-in jobs when live data is unavailable
//! - Filter pipeline and the dedup & retention store

pub mod domain;
pub mod dto;
pub mod filter;
pub mod normalize;
pub mod store;
pub mod synthetic;

pub use domain::{Category, Job, Stats};
pub use filter::FilterConfig;
pub use normalize::Normalizer;
pub use store::JobStore;
pub use synthetic::SyntheticSource;
