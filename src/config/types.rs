//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::{PhaseDurations, PipelineTiming};
use crate::domain::tree::DEFAULT_AUTO_EXPAND_DEPTH;
use crate::error::{RepolensError, RepolensResult};

use super::loader::{self, ConfigWarning};

/// Pipeline pacing. Durations are presentation choices, not a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub uploading_ms: u64,
    pub embedding_ms: u64,
    pub indexing_ms: u64,
    pub completed_ms: u64,
    /// Tick granularity of the progress display
    pub tick_ms: u64,
    /// Pause at 100% before the next phase starts
    pub settle_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            uploading_ms: 2000,
            embedding_ms: 3000,
            indexing_ms: 2000,
            completed_ms: 500,
            tick_ms: 50,
            settle_ms: 300,
        }
    }
}

impl PipelineConfig {
    pub fn timing(&self) -> PipelineTiming {
        PipelineTiming {
            durations: PhaseDurations {
                uploading: Duration::from_millis(self.uploading_ms),
                embedding: Duration::from_millis(self.embedding_ms),
                indexing: Duration::from_millis(self.indexing_ms),
                completed: Duration::from_millis(self.completed_ms),
            },
            settle: Duration::from_millis(self.settle_ms),
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// The tick must be positive and no coarser than the shortest
    /// non-zero phase.
    pub fn validate(&self) -> RepolensResult<()> {
        if self.tick_ms == 0 {
            return Err(RepolensError::InvalidPipelineConfig(
                "tick_ms must be greater than 0".to_string(),
            ));
        }
        if let Some(shortest) = self.timing().durations.shortest_nonzero() {
            if self.tick() > shortest {
                return Err(RepolensError::InvalidPipelineConfig(format!(
                    "tick_ms ({}) exceeds the shortest phase duration ({}ms)",
                    self.tick_ms,
                    shortest.as_millis()
                )));
            }
        }
        Ok(())
    }
}

/// File tree behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Directories shallower than this start expanded
    pub auto_expand_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            auto_expand_depth: DEFAULT_AUTO_EXPAND_DEPTH,
        }
    }
}

/// Archive acceptance rules applied before an upload starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_archive_bytes: u64,
    /// Accepted extensions, without the dot
    pub extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_archive_bytes: 100 * 1024 * 1024,
            extensions: vec!["zip".to_string()],
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: ColorMode,
    pub unicode: bool,
    pub verbosity: Verbosity,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            unicode: true,
            verbosity: Verbosity::Normal,
        }
    }
}

/// Full configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub tree: TreeConfig,
    pub upload: UploadConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RepolensResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> RepolensResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Check the values that can make a run impossible
    pub fn validate(&self) -> RepolensResult<()> {
        self.pipeline.validate()
    }
}
