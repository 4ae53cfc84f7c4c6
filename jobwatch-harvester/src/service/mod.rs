//! Service Module
//!
//! Business logic layer for the harvester.
//! Services orchestrate between repositories and the extraction pipeline.

pub mod harvest;

// Re-export for convenience
pub use harvest as harvest_service;
