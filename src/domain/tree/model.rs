//! TreeModel: the browsable file hierarchy.
//!
//! Nodes live in a flat arena in pre-order; directories refer to their
//! children by index. Every walk uses an explicit stack, so listing depth is
//! never bounded by the call stack.
//!
//! Expand state is kept beside the arena. A directory that was never toggled
//! is expanded when it sits shallower than the auto-expand depth (2 by default,
//! meaning the roots and their direct children start open).

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use super::node::{NodeKind, TreeNode};

/// Directories shallower than this start expanded
pub const DEFAULT_AUTO_EXPAND_DEPTH: usize = 2;

/// Reasons a listing cannot become a [`TreeModel`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Two entries share the same path
    #[error("duplicate path '{path}' in file listing")]
    DuplicatePath { path: String },

    /// An entry has no display name
    #[error("entry '{path}' has an empty name")]
    EmptyName { path: String },

    /// A file entry carries children
    #[error("file '{path}' cannot have children")]
    FileWithChildren { path: String },
}

/// Outcome of activating a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// A file became the selected path
    FileSelected { path: String },
    /// A directory flipped its expand flag
    DirectoryToggled { path: String, expanded: bool },
}

impl SelectionEvent {
    pub fn path(&self) -> &str {
        match self {
            SelectionEvent::FileSelected { path } => path,
            SelectionEvent::DirectoryToggled { path, .. } => path,
        }
    }
}

type NodeId = usize;

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    kind: NodeKind,
    path: String,
    depth: usize,
    children: Vec<NodeId>,
}

/// Read-only projection of one node, as handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeView<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub path: &'a str,
    pub depth: usize,
    /// Always false for files
    pub expanded: bool,
    pub selected: bool,
    pub child_count: usize,
}

impl NodeView<'_> {
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }
}

/// File hierarchy with expand/collapse state and a single selected file
#[derive(Debug, Clone)]
pub struct TreeModel {
    slots: Vec<Slot>,
    roots: Vec<NodeId>,
    by_path: HashMap<String, NodeId>,
    /// `None` until the user toggles the directory
    expanded: Vec<Option<bool>>,
    selected: Option<NodeId>,
    auto_expand_depth: usize,
}

impl TreeModel {
    /// Build a model from a listing forest.
    ///
    /// Fails if two entries share a path, an entry has an empty name, or a
    /// file carries children.
    pub fn build(nodes: &[TreeNode]) -> Result<Self, TreeError> {
        Self::build_with_auto_expand(nodes, DEFAULT_AUTO_EXPAND_DEPTH)
    }

    /// Build a model with a custom auto-expand depth
    pub fn build_with_auto_expand(
        nodes: &[TreeNode],
        auto_expand_depth: usize,
    ) -> Result<Self, TreeError> {
        let mut slots: Vec<Slot> = Vec::new();
        let mut roots = Vec::with_capacity(nodes.len());
        let mut by_path = HashMap::new();

        let mut stack: Vec<(&TreeNode, usize, Option<NodeId>)> =
            nodes.iter().rev().map(|n| (n, 0, None)).collect();

        while let Some((node, depth, parent)) = stack.pop() {
            if node.name.is_empty() {
                return Err(TreeError::EmptyName {
                    path: node.path.clone(),
                });
            }
            if !node.is_directory() && !node.children.is_empty() {
                return Err(TreeError::FileWithChildren {
                    path: node.path.clone(),
                });
            }

            let id = slots.len();
            if by_path.insert(node.path.clone(), id).is_some() {
                return Err(TreeError::DuplicatePath {
                    path: node.path.clone(),
                });
            }

            slots.push(Slot {
                name: node.name.clone(),
                kind: node.kind,
                path: node.path.clone(),
                depth,
                children: Vec::with_capacity(node.children.len()),
            });
            match parent {
                Some(parent) => slots[parent].children.push(id),
                None => roots.push(id),
            }

            // Reverse so siblings pop in listing order.
            stack.extend(node.children.iter().rev().map(|c| (c, depth + 1, Some(id))));
        }

        debug!(nodes = slots.len(), roots = roots.len(), "built file tree");

        let expanded = vec![None; slots.len()];
        Ok(Self {
            slots,
            roots,
            by_path,
            expanded,
            selected: None,
            auto_expand_depth,
        })
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// Flip the expand flag of a directory.
    ///
    /// Returns the new state, or `None` when `path` is a file or unknown.
    /// Unknown paths are expected when the listing changed under a stale view.
    pub fn toggle(&mut self, path: &str) -> Option<bool> {
        let Some(&id) = self.by_path.get(path) else {
            debug!(path, "ignoring toggle for unknown path");
            return None;
        };
        if !self.slots[id].kind.is_directory() {
            trace!(path, "ignoring toggle on file");
            return None;
        }

        let expanded = !self.expanded_at(id);
        self.expanded[id] = Some(expanded);
        debug!(path, expanded, "toggled directory");
        Some(expanded)
    }

    /// Activate a node: files become selected, directories toggle.
    ///
    /// Returns `None` for unknown paths.
    pub fn select(&mut self, path: &str) -> Option<SelectionEvent> {
        let Some(&id) = self.by_path.get(path) else {
            debug!(path, "ignoring selection of unknown path");
            return None;
        };

        match self.slots[id].kind {
            NodeKind::File => {
                self.selected = Some(id);
                debug!(path, "selected file");
                Some(SelectionEvent::FileSelected {
                    path: path.to_string(),
                })
            }
            NodeKind::Directory => {
                self.toggle(path)
                    .map(|expanded| SelectionEvent::DirectoryToggled {
                        path: path.to_string(),
                        expanded,
                    })
            }
        }
    }

    /// Whether `path` is an expanded directory
    pub fn is_expanded(&self, path: &str) -> bool {
        self.by_path
            .get(path)
            .is_some_and(|&id| self.expanded_at(id))
    }

    /// Currently selected file path
    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|id| self.slots[id].path.as_str())
    }

    /// Clear the selection, returning the path that was selected
    pub fn clear_selection(&mut self) -> Option<String> {
        let previous = self.selected.take().map(|id| self.slots[id].path.clone());
        if let Some(path) = &previous {
            debug!(path = path.as_str(), "cleared selection");
        }
        previous
    }

    /// Look up a single node
    pub fn get(&self, path: &str) -> Option<NodeView<'_>> {
        self.by_path.get(path).map(|&id| self.view(id))
    }

    /// Depth of a node (roots are depth 0)
    pub fn depth(&self, path: &str) -> Option<usize> {
        self.by_path.get(path).map(|&id| self.slots[id].depth)
    }

    /// Every node in pre-order, children in listing order
    pub fn iter(&self) -> Walk<'_> {
        Walk::new(self, false)
    }

    /// Nodes a renderer should show: pre-order, only descending into
    /// expanded directories
    pub fn visible(&self) -> Walk<'_> {
        Walk::new(self, true)
    }

    /// Expand every directory. Returns how many were toggled.
    pub fn expand_all(&mut self) -> usize {
        self.toggle_where(|expanded| !expanded)
    }

    /// Collapse every directory. Returns how many were toggled.
    pub fn collapse_all(&mut self) -> usize {
        self.toggle_where(|expanded| expanded)
    }

    fn toggle_where(&mut self, should_toggle: impl Fn(bool) -> bool) -> usize {
        let mut count = 0;
        for id in 0..self.slots.len() {
            if self.slots[id].kind.is_directory() {
                let expanded = self.expanded_at(id);
                if should_toggle(expanded) {
                    self.expanded[id] = Some(!expanded);
                    count += 1;
                }
            }
        }
        debug!(count, "bulk toggled directories");
        count
    }

    fn expanded_at(&self, id: NodeId) -> bool {
        let slot = &self.slots[id];
        if !slot.kind.is_directory() {
            return false;
        }
        self.expanded[id].unwrap_or(slot.depth < self.auto_expand_depth)
    }

    fn view(&self, id: NodeId) -> NodeView<'_> {
        let slot = &self.slots[id];
        NodeView {
            name: &slot.name,
            kind: slot.kind,
            path: &slot.path,
            depth: slot.depth,
            expanded: self.expanded_at(id),
            selected: self.selected == Some(id),
            child_count: slot.children.len(),
        }
    }
}

/// Pre-order walk over a [`TreeModel`]
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    model: &'a TreeModel,
    stack: Vec<NodeId>,
    visible_only: bool,
}

impl<'a> Walk<'a> {
    fn new(model: &'a TreeModel, visible_only: bool) -> Self {
        Self {
            model,
            stack: model.roots.iter().rev().copied().collect(),
            visible_only,
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if !self.visible_only || self.model.expanded_at(id) {
            let children = &self.model.slots[id].children;
            self.stack.extend(children.iter().rev().copied());
        }
        Some(self.model.view(id))
    }
}
