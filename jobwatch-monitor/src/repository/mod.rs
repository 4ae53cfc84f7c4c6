//! Repository layer for the monitor
//!
//! Repositories handle communication with external services.

pub mod listings;

pub use listings::{HttpListingSource, ListingSource};
