//! Pipeline runner
//!
//! Drives a [`StageDriver`] from a [`TimeSource`] in fixed-size ticks until
//! the run completes or the shared `running` flag is cleared (Ctrl+C).
//! The flag is checked before and after every sleep, so once it is cleared no
//! further tick reaches the driver and no further event reaches the sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::application::coordinator::SelectionCoordinator;
use crate::domain::pipeline::{Phase, PipelineError, StageDriver};
use crate::domain::ports::SessionEventSink;
use crate::infrastructure::time_source::TimeSource;

/// How a pipeline run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed {
        #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
        elapsed: Duration,
    },
    Cancelled {
        phase: Phase,
        progress: u8,
        #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
        elapsed: Duration,
    },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Start `driver` and tick it every `tick` until it finishes or is cancelled.
///
/// A zero `tick` is raised to one millisecond.
pub fn run_pipeline<S: SessionEventSink>(
    driver: &mut StageDriver,
    coordinator: &mut SelectionCoordinator<S>,
    time: &dyn TimeSource,
    tick: Duration,
    running: &AtomicBool,
) -> Result<RunOutcome, PipelineError> {
    let tick = tick.max(Duration::from_millis(1));
    let started = time.now();

    coordinator.start(driver)?;
    info!(tick_ms = tick.as_millis() as u64, "pipeline run started");

    loop {
        if !running.load(Ordering::SeqCst) {
            return Ok(cancel(driver, time.elapsed_since(started)));
        }

        time.sleep(tick);

        if !running.load(Ordering::SeqCst) {
            return Ok(cancel(driver, time.elapsed_since(started)));
        }

        coordinator.tick(driver, tick);

        if driver.is_complete() {
            let elapsed = time.elapsed_since(started);
            info!(elapsed_ms = elapsed.as_millis() as u64, "pipeline run completed");
            return Ok(RunOutcome::Completed { elapsed });
        }
    }
}

fn cancel(driver: &mut StageDriver, elapsed: Duration) -> RunOutcome {
    let state = driver.state();
    driver.cancel();
    debug!(phase = %state.current_phase, "pipeline run interrupted");
    RunOutcome::Cancelled {
        phase: state.current_phase,
        progress: state.phase_progress,
        elapsed,
    }
}
