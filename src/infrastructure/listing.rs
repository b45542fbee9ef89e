//! File listing sources
//!
//! A listing is a forest of [`TreeNode`]s. It comes either from a JSON or
//! YAML document produced by the enumeration service, or from walking a
//! directory on disk. Walking respects `.gitignore` and skips hidden entries.

use std::fs;
use std::path::Path;

use ignore::WalkBuilder;
use serde::Deserialize;
use tracing::debug;

use crate::domain::tree::TreeNode;
use crate::error::{RepolensError, RepolensResult};

/// Accepted top-level shapes of a listing document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingDocument {
    Forest(Vec<TreeNode>),
    Wrapped { files: Vec<TreeNode> },
}

impl ListingDocument {
    fn into_forest(self) -> Vec<TreeNode> {
        match self {
            ListingDocument::Forest(nodes) => nodes,
            ListingDocument::Wrapped { files } => files,
        }
    }
}

/// Load a listing from a directory (walked) or a listing file
pub fn load_source(source: &Path) -> RepolensResult<Vec<TreeNode>> {
    if source.is_dir() {
        scan_directory(source)
    } else {
        load_listing(source)
    }
}

/// Read a `.json`, `.yaml` or `.yml` listing file
pub fn load_listing(file: &Path) -> RepolensResult<Vec<TreeNode>> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let content = fs::read_to_string(file)?;
    let nodes = match extension.as_str() {
        "json" => parse_listing_json(&content, file)?,
        "yaml" | "yml" => parse_listing_yaml(&content, file)?,
        _ => {
            return Err(RepolensError::UnsupportedListing {
                file: file.to_path_buf(),
                extension,
            })
        }
    };
    debug!(file = %file.display(), roots = nodes.len(), "loaded listing");
    Ok(nodes)
}

pub fn parse_listing_json(content: &str, file: &Path) -> RepolensResult<Vec<TreeNode>> {
    serde_json::from_str::<ListingDocument>(content)
        .map(ListingDocument::into_forest)
        .map_err(|e| RepolensError::InvalidListing {
            file: file.to_path_buf(),
            message: e.to_string(),
        })
}

pub fn parse_listing_yaml(content: &str, file: &Path) -> RepolensResult<Vec<TreeNode>> {
    serde_yaml_ng::from_str::<ListingDocument>(content)
        .map(ListingDocument::into_forest)
        .map_err(|e| RepolensError::InvalidListing {
            file: file.to_path_buf(),
            message: e.to_string(),
        })
}

/// Walk `root` and build a listing with `/`-separated paths relative to it.
///
/// Within each directory, subdirectories come first, then files, each group
/// ordered by name.
pub fn scan_directory(root: &Path) -> RepolensResult<Vec<TreeNode>> {
    if !root.is_dir() {
        return Err(RepolensError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(root)
        .require_git(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut forest = Vec::new();
    let mut count = 0usize;
    for result in walker {
        let entry = result.map_err(|e| RepolensError::Scan {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.depth() == 0 {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        insert(&mut forest, &parts, is_dir);
        count += 1;
    }

    sort_level(&mut forest);
    debug!(root = %root.display(), entries = count, "scanned directory");
    Ok(forest)
}

fn insert(forest: &mut Vec<TreeNode>, parts: &[String], is_dir: bool) {
    let Some((name, parents)) = parts.split_last() else {
        return;
    };

    let mut level = forest;
    let mut prefix = String::new();
    for part in parents {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(part);

        let index = match level
            .iter()
            .position(|n| n.is_directory() && n.name == *part)
        {
            Some(index) => index,
            None => {
                level.push(TreeNode::directory(part.clone(), prefix.clone(), Vec::new()));
                level.len() - 1
            }
        };
        level = &mut level[index].children;
    }

    let path = if prefix.is_empty() {
        name.clone()
    } else {
        format!("{prefix}/{name}")
    };

    if is_dir {
        if !level.iter().any(|n| n.path == path) {
            level.push(TreeNode::directory(name.clone(), path, Vec::new()));
        }
    } else {
        level.push(TreeNode::file(name.clone(), path));
    }
}

fn sort_level(level: &mut [TreeNode]) {
    level.sort_by(|a, b| {
        b.is_directory()
            .cmp(&a.is_directory())
            .then_with(|| a.name.cmp(&b.name))
    });
    for node in level.iter_mut() {
        sort_level(&mut node.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::NodeKind;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn parses_json_forest() {
        let json = r#"[
            { "name": "src", "type": "folder", "path": "src", "children": [
                { "name": "App.tsx", "type": "file", "path": "src/App.tsx" }
            ]},
            { "name": "README.md", "type": "file", "path": "README.md" }
        ]"#;
        let nodes = parse_listing_json(json, Path::new("listing.json")).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children[0].path, "src/App.tsx");
    }

    #[test]
    fn parses_wrapped_json() {
        let json = r#"{ "files": [{ "name": "a.rs", "type": "file", "path": "a.rs" }] }"#;
        let nodes = parse_listing_json(json, Path::new("listing.json")).unwrap();
        assert_eq!(nodes, vec![TreeNode::file("a.rs", "a.rs")]);
    }

    #[test]
    fn parses_yaml_forest() {
        let yaml = "
- name: lib
  type: directory
  path: lib
  children:
    - name: mod.rs
      type: file
      path: lib/mod.rs
";
        let nodes = parse_listing_yaml(yaml, Path::new("listing.yaml")).unwrap();
        assert_eq!(nodes[0].kind, NodeKind::Directory);
        assert_eq!(nodes[0].children[0].name, "mod.rs");
    }

    #[test]
    fn invalid_json_names_the_file() {
        let err = parse_listing_json("{ nope", Path::new("bad.json")).unwrap_err();
        assert!(err.to_string().starts_with("invalid listing in bad.json"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("listing.csv");
        fs::write(&file, "name,path").unwrap();

        let err = load_listing(&file).unwrap_err();
        assert!(matches!(err, RepolensError::UnsupportedListing { .. }));
    }

    #[test]
    fn scan_builds_sorted_relative_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/hooks")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("src/hooks/use_api.rs"), "").unwrap();
        fs::write(root.join("Cargo.toml"), "").unwrap();
        fs::write(root.join("README.md"), "").unwrap();

        let forest = scan_directory(root).unwrap();

        let top: Vec<&str> = forest.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(top, vec!["empty", "src", "Cargo.toml", "README.md"]);

        let src = &forest[1];
        let children: Vec<&str> = src.children.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(children, vec!["src/hooks", "src/main.rs"]);
        assert_eq!(src.children[0].children[0].path, "src/hooks/use_api.rs");
    }

    #[test]
    fn scan_respects_gitignore_and_skips_git_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join("target/out.bin"), "").unwrap();
        fs::write(root.join(".gitignore"), "target/\n").unwrap();
        fs::write(root.join("lib.rs"), "").unwrap();

        let forest = scan_directory(root).unwrap();
        let paths: Vec<&str> = forest.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["lib.rs"]);
    }

    #[test]
    fn scan_missing_directory_fails() {
        let err = scan_directory(&PathBuf::from("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, RepolensError::DirectoryNotFound { .. }));
    }

    #[test]
    fn load_source_dispatches_on_kind() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        let listing = dir.path().join("listing.json");
        fs::write(
            &listing,
            r#"[{ "name": "x.rs", "type": "file", "path": "x.rs" }]"#,
        )
        .unwrap();

        assert_eq!(load_source(&listing).unwrap()[0].path, "x.rs");

        let scanned = load_source(dir.path()).unwrap();
        let names: Vec<&str> = scanned.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "listing.json"]);
    }
}
