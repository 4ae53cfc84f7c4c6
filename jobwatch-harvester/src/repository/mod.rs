//! Repository layer
//!
//! Repositories abstract access to the upstream marketplace without any
//! business logic. They are trait-based to enable testing with fixtures.

mod page;

pub use page::{HttpPageRepository, PageRepository};
