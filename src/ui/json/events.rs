//! Shared JSON event types for consistent CLI output.
//!
//! Every line carries `event`, `command` and an RFC 3339 `timestamp`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Adds `command` and `timestamp` to an event that already carries its own
/// `event` tag (pipeline and selection events).
#[derive(Debug, Clone, Serialize)]
pub struct Stamped<'a, T: Serialize> {
    pub command: &'a str,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

impl<'a, T: Serialize> Stamped<'a, T> {
    pub fn now(command: &'a str, data: T) -> Self {
        Self::at(command, Utc::now(), data)
    }

    pub fn at(command: &'a str, timestamp: DateTime<Utc>, data: T) -> Self {
        Self {
            command,
            timestamp,
            data,
        }
    }
}

/// Event emitted when a command starts.
#[derive(Debug, Clone, Serialize)]
pub struct StartEvent {
    pub event: &'static str,
    pub version: &'static str,
}

impl StartEvent {
    pub fn new() -> Self {
        Self {
            event: "start",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Event emitted once the archive passed its checks.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveEvent<'a> {
    pub event: &'static str,
    pub path: String,
    pub size: u64,
    pub digest: &'a str,
}

impl<'a> ArchiveEvent<'a> {
    pub fn new(info: &'a repolens::ArchiveInfo) -> Self {
        Self {
            event: "archive",
            path: info.path.display().to_string(),
            size: info.size,
            digest: &info.digest,
        }
    }
}

/// One visible tree row.
#[derive(Debug, Clone, Serialize)]
pub struct NodeEvent<'a> {
    pub event: &'static str,
    #[serde(flatten)]
    pub node: repolens::NodeView<'a>,
}

impl<'a> NodeEvent<'a> {
    pub fn new(node: repolens::NodeView<'a>) -> Self {
        Self {
            event: "node",
            node,
        }
    }
}

/// Event emitted when a command completes.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvent<T: Serialize> {
    pub event: &'static str,
    pub success: bool,
    #[serde(flatten)]
    pub detail: T,
}

impl<T: Serialize> CompleteEvent<T> {
    pub fn new(success: bool, detail: T) -> Self {
        Self {
            event: "complete",
            success,
            detail,
        }
    }
}

/// Non-fatal problem worth surfacing to a CI log.
#[derive(Debug, Clone, Serialize)]
pub struct WarningEvent {
    pub event: &'static str,
    pub message: String,
}

impl WarningEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            event: "warning",
            message: message.into(),
        }
    }
}

/// Event emitted when a command fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    pub event: &'static str,
    pub message: String,
}

impl ErrorEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            event: "error",
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use repolens::{Phase, PipelineEvent, RunOutcome, SelectionEvent};
    use std::time::Duration;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn stamped_pipeline_event_keeps_its_tag() {
        let event = Stamped::at(
            "process",
            fixed(),
            PipelineEvent::Progress {
                phase: Phase::Indexing,
                percent: 40,
            },
        );
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "progress");
        assert_eq!(json["command"], "process");
        assert_eq!(json["phase"], "indexing");
        assert_eq!(json["percent"], 40);
        assert_eq!(json["timestamp"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn stamped_selection_event_serializes() {
        let event = Stamped::at(
            "tree",
            fixed(),
            SelectionEvent::DirectoryToggled {
                path: "src".to_string(),
                expanded: false,
            },
        );
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "directory_toggled");
        assert_eq!(json["path"], "src");
        assert_eq!(json["expanded"], false);
    }

    #[test]
    fn start_event_has_version() {
        let json = serde_json::to_value(StartEvent::new()).unwrap();
        assert_eq!(json["event"], "start");
        assert!(json["version"].is_string());
    }

    #[test]
    fn complete_event_flattens_outcome() {
        let event = CompleteEvent::new(
            true,
            RunOutcome::Completed {
                elapsed: Duration::from_millis(7800),
            },
        );
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "complete");
        assert_eq!(json["success"], true);
        assert_eq!(json["outcome"], "completed");
        assert_eq!(json["elapsed_ms"], 7800);
    }

    #[test]
    fn node_event_uses_listing_field_names() {
        let tree = repolens::TreeModel::build(&[repolens::TreeNode::file("a.md", "a.md")]).unwrap();
        let node = tree.get("a.md").unwrap();
        let json = serde_json::to_value(NodeEvent::new(node)).unwrap();

        assert_eq!(json["event"], "node");
        assert_eq!(json["type"], "file");
        assert_eq!(json["depth"], 0);
    }
}
