//! Core domain types
//!
//! This module contains the listing records and lookup tables shared by the
//! harvester (which produces jobs) and the monitor (which filters, stores and
//! announces them).

pub mod category;
pub mod country;
pub mod job;
pub mod stats;

pub use category::{Category, CategoryParseError};
pub use country::{HOME_COUNTRY_CODE, HOME_COUNTRY_NAME, country_code};
pub use job::Job;
pub use stats::Stats;
