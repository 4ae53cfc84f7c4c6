//! Data Transfer Objects for inter-service communication
//!
//! DTOs used on the HTTP boundary between the harvester and the monitor.

pub mod health;
pub mod scrape;
