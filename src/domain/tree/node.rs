//! File listing entries as delivered by the enumeration service.

use serde::{Deserialize, Serialize};

/// Whether a listing entry is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "folder", alias = "directory", alias = "dir")]
    Directory,
}

impl NodeKind {
    pub fn is_directory(self) -> bool {
        matches!(self, NodeKind::Directory)
    }
}

/// One entry of a file listing.
///
/// The serialized shape is `{ "name", "type": "file" | "folder", "path", "children"? }`.
/// `children` is only meaningful for directories; an empty list is an empty directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display label
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Unique, stable identifier across the whole listing
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a file entry
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// Create a directory entry with the given children
    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            path: path.into(),
            children,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }
}

/// Coarse classification used to pick an icon for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileClass {
    Code,
    Data,
    Text,
}

impl FileClass {
    /// Classify a file by its name: `.json` is data, `.md`/`.txt` are text,
    /// everything else is treated as source code.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".json") {
            FileClass::Data
        } else if lower.ends_with(".md") || lower.ends_with(".txt") {
            FileClass::Text
        } else {
            FileClass::Code
        }
    }
}
