//! Repolens - upload a repository, follow its processing pipeline and
//! browse the indexed files from the terminal.
//!
//! The library holds two independent state machines, [`TreeModel`] and
//! [`StageDriver`], a [`SelectionCoordinator`] that forwards their events to
//! a [`SessionEventSink`], and the file system plumbing around them.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{run_pipeline, RunOutcome, SelectionCoordinator};
pub use config::{Config, ConfigWarning};
pub use domain::pipeline::{
    Phase, PhaseDurations, PipelineError, PipelineEvent, PipelineState, PipelineTiming,
    StageDriver, StepStatus,
};
pub use domain::ports::{NoopEventSink, SessionEventSink};
pub use domain::tree::{
    FileClass, NodeKind, NodeView, SelectionEvent, TreeError, TreeModel, TreeNode,
};
pub use error::{RepolensError, RepolensResult};
pub use infrastructure::{inspect_archive, load_source, ArchiveInfo};
