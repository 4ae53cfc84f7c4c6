//! Service layer for the monitor
//!
//! Consumers of poll-cycle events.

pub mod events;

pub use events::{ConsoleSink, EventSink, LogSink};
