//! StageDriver: tick-driven progress through the pipeline phases.
//!
//! The driver owns no timer. A scheduler (the real-clock runner, a test, or
//! manual stepping) calls [`StageDriver::tick`] with the time that passed, and
//! the driver returns the events that time produced.
//!
//! Within a phase progress is `floor(elapsed * 100 / duration)`, capped at 100.
//! A zero-length phase is at 100 immediately. After 100 the driver waits the
//! settle delay, then starts the next phase at exactly 0. Finishing the settle
//! of `Completed` ends the run and yields a single [`PipelineEvent::Completed`].

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use super::phase::{Phase, PipelineTiming};

/// Commands the driver refuses
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// `start` while a run is in flight
    #[error("pipeline is already running (currently {phase})")]
    AlreadyRunning { phase: Phase },
}

/// Something observable that happened during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A phase started; its progress is 0
    PhaseChanged { phase: Phase },
    /// Progress within the current phase rose
    Progress { phase: Phase, percent: u8 },
    /// The final phase finished
    Completed,
}

/// Snapshot of the driver for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineState {
    pub current_phase: Phase,
    pub phase_progress: u8,
    pub is_running: bool,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Copy)]
struct RunState {
    phase: Phase,
    elapsed: Duration,
    progress: u8,
    /// Set once the phase hit 100; time left before the next phase
    settle_left: Option<Duration>,
}

impl RunState {
    fn at(phase: Phase) -> Self {
        Self {
            phase,
            elapsed: Duration::ZERO,
            progress: 0,
            settle_left: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Status {
    Idle,
    Running(RunState),
    Finished,
}

/// Timed state machine over [`Phase`]
#[derive(Debug, Clone)]
pub struct StageDriver {
    timing: PipelineTiming,
    status: Status,
}

impl Default for StageDriver {
    fn default() -> Self {
        Self::new(PipelineTiming::default())
    }
}

impl StageDriver {
    pub fn new(timing: PipelineTiming) -> Self {
        Self {
            timing,
            status: Status::Idle,
        }
    }

    pub fn timing(&self) -> &PipelineTiming {
        &self.timing
    }

    /// Begin a run at `Uploading` / 0.
    ///
    /// Allowed from idle and after a finished run (which it replaces).
    /// Rejected while a run is in flight; the running state is left as is.
    pub fn start(&mut self) -> Result<Vec<PipelineEvent>, PipelineError> {
        if let Status::Running(run) = &self.status {
            return Err(PipelineError::AlreadyRunning { phase: run.phase });
        }

        let phase = Phase::first();
        self.status = Status::Running(RunState::at(phase));
        debug!(%phase, "pipeline started");
        Ok(vec![PipelineEvent::PhaseChanged { phase }])
    }

    /// Abandon the current run and go back to idle.
    ///
    /// Returns whether a run was cancelled. A finished run is terminal and
    /// stays finished.
    pub fn cancel(&mut self) -> bool {
        match self.status {
            Status::Running(run) => {
                debug!(phase = %run.phase, progress = run.progress, "pipeline cancelled");
                self.status = Status::Idle;
                true
            }
            Status::Idle | Status::Finished => false,
        }
    }

    /// Drop any run, finished or not. Used when the session goes away.
    pub fn reset(&mut self) {
        self.status = Status::Idle;
    }

    /// Advance the run by `elapsed`.
    ///
    /// Ticks outside a run are ignored. A single large tick may cross several
    /// phases; every crossing is reported in order.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<PipelineEvent> {
        let mut events = Vec::new();
        let Status::Running(run) = &mut self.status else {
            trace!(?elapsed, "ignoring tick outside a run");
            return events;
        };

        let durations = self.timing.durations;
        let settle = self.timing.settle;
        let mut budget = elapsed;
        let mut finished = false;

        loop {
            match run.settle_left {
                None => {
                    let duration = durations.get(run.phase);
                    let remaining = duration.saturating_sub(run.elapsed);
                    if budget >= remaining {
                        budget -= remaining;
                        run.elapsed = duration;
                        run.settle_left = Some(settle);
                        raise_progress(run, 100, &mut events);
                    } else {
                        run.elapsed += budget;
                        let percent = percent_of(run.elapsed, duration);
                        raise_progress(run, percent, &mut events);
                        break;
                    }
                }
                Some(left) => {
                    if budget < left {
                        run.settle_left = Some(left - budget);
                        break;
                    }
                    budget -= left;
                    match run.phase.next() {
                        Some(phase) => {
                            *run = RunState::at(phase);
                            debug!(%phase, "pipeline phase changed");
                            events.push(PipelineEvent::PhaseChanged { phase });
                        }
                        None => {
                            finished = true;
                            break;
                        }
                    }
                }
            }
        }

        if finished {
            self.status = Status::Finished;
            debug!("pipeline completed");
            events.push(PipelineEvent::Completed);
        }
        events
    }

    pub fn state(&self) -> PipelineState {
        match self.status {
            Status::Idle => PipelineState {
                current_phase: Phase::first(),
                phase_progress: 0,
                is_running: false,
                is_complete: false,
            },
            Status::Running(run) => PipelineState {
                current_phase: run.phase,
                phase_progress: run.progress,
                is_running: true,
                is_complete: false,
            },
            Status::Finished => PipelineState {
                current_phase: Phase::Completed,
                phase_progress: 100,
                is_running: false,
                is_complete: true,
            },
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, Status::Running(_))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, Status::Finished)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.status, Status::Idle)
    }

    /// Phase of the active run
    pub fn current_phase(&self) -> Option<Phase> {
        match self.status {
            Status::Running(run) => Some(run.phase),
            Status::Idle | Status::Finished => None,
        }
    }

    /// Progress of the current phase, 0..=100
    pub fn progress(&self) -> u8 {
        self.state().phase_progress
    }
}

fn percent_of(elapsed: Duration, duration: Duration) -> u8 {
    if duration.is_zero() {
        return 100;
    }
    let percent = elapsed.as_nanos().saturating_mul(100) / duration.as_nanos();
    percent.min(100) as u8
}

fn raise_progress(run: &mut RunState, percent: u8, events: &mut Vec<PipelineEvent>) {
    if percent > run.progress {
        run.progress = percent;
        trace!(phase = %run.phase, percent, "pipeline progress");
        events.push(PipelineEvent::Progress {
            phase: run.phase,
            percent,
        });
    }
}
