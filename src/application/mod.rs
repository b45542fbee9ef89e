//! Application Layer
//!
//! Glue between the domain state machines and the outside world.
//! This layer:
//! - Depends on the Domain layer (tree, pipeline, ports)
//! - Does NOT contain state machine rules (those are in Domain)
//!
//! ## Services
//!
//! - `SelectionCoordinator` - forwards tree and pipeline events to a sink
//! - `run_pipeline` - drives a StageDriver from a clock until done or cancelled

pub mod coordinator;
pub mod runner;

pub use coordinator::SelectionCoordinator;
pub use runner::{run_pipeline, RunOutcome};
