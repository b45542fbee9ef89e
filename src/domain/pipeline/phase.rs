//! Pipeline phases and their timing

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// One stage of the processing pipeline, in fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Uploading,
    Embedding,
    Indexing,
    Completed,
}

impl Phase {
    /// All phases in pipeline order
    pub const ALL: [Phase; 4] = [
        Phase::Uploading,
        Phase::Embedding,
        Phase::Indexing,
        Phase::Completed,
    ];

    pub fn first() -> Self {
        Phase::Uploading
    }

    /// The phase that follows this one, `None` after `Completed`
    pub fn next(self) -> Option<Self> {
        match self {
            Phase::Uploading => Some(Phase::Embedding),
            Phase::Embedding => Some(Phase::Indexing),
            Phase::Indexing => Some(Phase::Completed),
            Phase::Completed => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Uploading => "Uploading",
            Phase::Embedding => "Embedding",
            Phase::Indexing => "Indexing",
            Phase::Completed => "Completed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Uploading => "Transferring files to server",
            Phase::Embedding => "Generating code embeddings",
            Phase::Indexing => "Building search index",
            Phase::Completed => "Ready for questions",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Nominal duration of each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub uploading: Duration,
    pub embedding: Duration,
    pub indexing: Duration,
    pub completed: Duration,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            uploading: Duration::from_millis(2000),
            embedding: Duration::from_millis(3000),
            indexing: Duration::from_millis(2000),
            completed: Duration::from_millis(500),
        }
    }
}

impl PhaseDurations {
    /// Same duration for every phase
    pub fn uniform(duration: Duration) -> Self {
        Self {
            uploading: duration,
            embedding: duration,
            indexing: duration,
            completed: duration,
        }
    }

    pub fn get(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Uploading => self.uploading,
            Phase::Embedding => self.embedding,
            Phase::Indexing => self.indexing,
            Phase::Completed => self.completed,
        }
    }

    /// Shortest duration that is not zero, if any
    pub fn shortest_nonzero(&self) -> Option<Duration> {
        Phase::ALL
            .iter()
            .map(|p| self.get(*p))
            .filter(|d| !d.is_zero())
            .min()
    }

    pub fn total(&self) -> Duration {
        Phase::ALL.iter().map(|p| self.get(*p)).sum()
    }
}

/// Timing configuration for a [`StageDriver`](super::StageDriver)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTiming {
    pub durations: PhaseDurations,
    /// Pause between a phase reaching 100% and the next phase starting
    pub settle: Duration,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self {
            durations: PhaseDurations::default(),
            settle: Duration::from_millis(300),
        }
    }
}

/// Where a phase stands relative to the pipeline's current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Done,
    Current,
    Pending,
}

impl StepStatus {
    /// Classify `phase` against `current`. Once the run is complete every
    /// phase is done.
    pub fn of(phase: Phase, current: Phase, complete: bool) -> Self {
        if complete || phase < current {
            StepStatus::Done
        } else if phase == current {
            StepStatus::Current
        } else {
            StepStatus::Pending
        }
    }
}
