//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! The display layer provides concrete implementations.

pub mod session_events;

pub use session_events::{NoopEventSink, SessionEventSink};
