//! Browser state: cursor, scrolling and action handling.

use repolens::{SelectionCoordinator, SessionEventSink, TreeModel};

use super::render::{render_help_bar, render_status_bar};
use crate::ui::widgets::file_tree::FileTree;

/// Browser action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    /// Move cursor up
    Up,
    /// Move cursor down
    Down,
    /// Select a file or toggle a directory
    Activate,
    /// Expand a collapsed directory
    Expand,
    /// Collapse an expanded directory, else jump to the parent
    Collapse,
    ExpandAll,
    CollapseAll,
    /// Drop the current selection
    ClearSelection,
    /// Leave the browser
    Quit,
}

/// Cursor over the visible rows of a [`TreeModel`]
#[derive(Debug)]
pub struct TreeBrowser {
    tree: TreeModel,
    /// Path under the cursor; `None` only for an empty tree
    cursor: Option<String>,
    /// First visible row index
    offset: usize,
}

impl TreeBrowser {
    pub fn new(tree: TreeModel) -> Self {
        let cursor = tree.visible().next().map(|n| n.path.to_string());
        Self {
            tree,
            cursor,
            offset: 0,
        }
    }

    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn rows(&self) -> Vec<String> {
        self.tree.visible().map(|n| n.path.to_string()).collect()
    }

    fn cursor_index(&self, rows: &[String]) -> usize {
        self.cursor
            .as_deref()
            .and_then(|c| rows.iter().position(|r| r == c))
            .unwrap_or(0)
    }

    /// Apply `action`. Returns false when the browser should close.
    pub fn handle_action<S: SessionEventSink>(
        &mut self,
        action: BrowseAction,
        coordinator: &mut SelectionCoordinator<S>,
    ) -> bool {
        let rows = self.rows();
        let index = self.cursor_index(&rows);

        match action {
            BrowseAction::Quit => return false,
            BrowseAction::Up => {
                if index > 0 {
                    self.cursor = Some(rows[index - 1].clone());
                }
            }
            BrowseAction::Down => {
                if index + 1 < rows.len() {
                    self.cursor = Some(rows[index + 1].clone());
                }
            }
            BrowseAction::Activate => {
                if let Some(path) = self.cursor.clone() {
                    coordinator.activate(&mut self.tree, &path);
                }
            }
            BrowseAction::Expand => {
                if let Some(path) = self.cursor.clone() {
                    if self.is_collapsed_directory(&path) {
                        coordinator.toggle(&mut self.tree, &path);
                    }
                }
            }
            BrowseAction::Collapse => {
                if let Some(path) = self.cursor.clone() {
                    if self.tree.is_expanded(&path) {
                        coordinator.toggle(&mut self.tree, &path);
                    } else if let Some(parent) = parent_path(&path) {
                        if self.tree.contains(parent) {
                            self.cursor = Some(parent.to_string());
                        }
                    }
                }
            }
            BrowseAction::ExpandAll => {
                coordinator.expand_all(&mut self.tree);
            }
            BrowseAction::CollapseAll => {
                coordinator.collapse_all(&mut self.tree);
            }
            BrowseAction::ClearSelection => {
                coordinator.clear_selection(&mut self.tree);
            }
        }

        self.settle_cursor();
        true
    }

    fn is_collapsed_directory(&self, path: &str) -> bool {
        self.tree.get(path).is_some_and(|n| n.is_directory() && !n.expanded)
    }

    /// Walk the cursor up to its nearest visible ancestor after a collapse
    fn settle_cursor(&mut self) {
        let rows = self.rows();
        let mut candidate = self.cursor.clone();
        while let Some(path) = candidate.as_deref() {
            if rows.iter().any(|r| r == path) {
                break;
            }
            candidate = parent_path(path).map(str::to_string);
        }
        self.cursor = candidate.or_else(|| rows.first().cloned());
    }

    /// Keep the cursor inside a window of `height` rows
    pub fn scroll_to_cursor(&mut self, height: usize) {
        let height = height.max(1);
        let index = self.cursor_index(&self.rows());
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + height {
            self.offset = index + 1 - height;
        }
    }

    /// Render the tree window plus status and help bars
    pub fn render(
        &self,
        height: usize,
        width: usize,
        status: Option<&str>,
        supports_color: bool,
        supports_unicode: bool,
    ) -> String {
        let rows = FileTree::new(&self.tree)
            .with_cursor(self.cursor())
            .with_width(width)
            .render_rows(supports_color, supports_unicode);

        let mut out: Vec<String> = rows
            .into_iter()
            .skip(self.offset)
            .take(height.max(1))
            .collect();
        out.push(String::new());
        out.push(render_status_bar(self.tree.selected(), status));
        out.push(render_help_bar(supports_unicode));
        out.join("\n")
    }
}

fn parent_path(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}
