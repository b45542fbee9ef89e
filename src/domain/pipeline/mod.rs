//! Staged processing pipeline
//!
//! - `phase` - the fixed phase order, durations and step classification
//! - `driver` - the StageDriver state machine

mod driver;
mod phase;

pub use driver::{PipelineError, PipelineEvent, PipelineState, StageDriver};
pub use phase::{Phase, PhaseDurations, PipelineTiming, StepStatus};
