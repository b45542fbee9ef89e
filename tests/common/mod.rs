//! Shared helpers for CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Listing used across CLI tests
pub const LISTING_JSON: &str = r#"[
  { "name": "src", "type": "folder", "path": "src", "children": [
    { "name": "components", "type": "folder", "path": "src/components", "children": [
      { "name": "Button.tsx", "type": "file", "path": "src/components/Button.tsx" }
    ]},
    { "name": "App.tsx", "type": "file", "path": "src/App.tsx" }
  ]},
  { "name": "package.json", "type": "file", "path": "package.json" },
  { "name": "README.md", "type": "file", "path": "README.md" }
]"#;

/// Pipeline pacing that finishes in well under a second
pub const FAST_CONFIG: &str = r#"
[pipeline]
uploading_ms = 20
embedding_ms = 20
indexing_ms = 20
completed_ms = 0
tick_ms = 5
settle_ms = 5
"#;

/// `repolens` with plain, deterministic output
pub fn repolens() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_repolens"));
    cmd.env("NO_COLOR", "1");
    cmd.env("TERM", "dumb");
    cmd.env_remove("RUST_LOG");
    for key in [
        "REPOLENS_TICK_MS",
        "REPOLENS_SETTLE_MS",
        "REPOLENS_COLOR",
        "REPOLENS_VERBOSITY",
        "REPOLENS_UNICODE",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

/// Temp workspace with a listing and a fast config file
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("listing.json"), LISTING_JSON).unwrap();
        fs::write(dir.path().join("fast.toml"), FAST_CONFIG).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn listing(&self) -> PathBuf {
        self.path().join("listing.json")
    }

    pub fn config(&self) -> PathBuf {
        self.path().join("fast.toml")
    }

    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Command running inside the workspace with the fast config
    pub fn repolens(&self) -> Command {
        let mut cmd = repolens();
        cmd.current_dir(self.path());
        cmd.arg("--config").arg(self.config());
        cmd
    }
}

/// Parse NDJSON stdout into values
pub fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("every stdout line is JSON"))
        .collect()
}
