//! File tree widget: one line per visible node.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::primitives::{paint, Icon};
use crate::ui::theme;
use repolens::{FileClass, NodeView, TreeModel};

/// Shown instead of rows when the listing has no nodes
pub const EMPTY_TREE_MESSAGE: &str = "No files uploaded yet";

#[derive(Debug, Clone, Copy)]
pub struct FileTree<'a> {
    tree: &'a TreeModel,
    cursor: Option<&'a str>,
    /// 0 = no limit
    width: usize,
}

impl<'a> FileTree<'a> {
    pub fn new(tree: &'a TreeModel) -> Self {
        Self {
            tree,
            cursor: None,
            width: 0,
        }
    }

    pub fn with_cursor(mut self, path: Option<&'a str>) -> Self {
        self.cursor = path;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn render_rows(&self, supports_color: bool, supports_unicode: bool) -> Vec<String> {
        if self.tree.is_empty() {
            return vec![paint(EMPTY_TREE_MESSAGE, theme::colors::DIM, supports_color)];
        }

        self.tree
            .visible()
            .map(|node| {
                render_row(
                    &node,
                    self.cursor == Some(node.path),
                    self.width,
                    supports_color,
                    supports_unicode,
                )
            })
            .collect()
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        self.render_rows(supports_color, supports_unicode).join("\n")
    }
}

/// Render one node as `cursor indent expander icon name [selected]`
pub fn render_row(
    node: &NodeView<'_>,
    is_cursor: bool,
    width: usize,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let cursor = if is_cursor { "> " } else { "  " };
    let indent = "  ".repeat(node.depth);
    let expander_width = Icon::Expand.render(supports_unicode).width();

    let (expander, icon) = match (node.is_directory(), node.expanded) {
        (true, true) => (
            Icon::Expand.colored(supports_color, supports_unicode),
            Icon::FolderOpen,
        ),
        (true, false) => (
            Icon::Collapse.colored(supports_color, supports_unicode),
            Icon::Folder,
        ),
        // Files get a blank expander column so names line up
        (false, _) => (
            " ".repeat(expander_width),
            Icon::File(FileClass::from_name(node.name)),
        ),
    };
    let icon = icon.render(supports_unicode);

    let marker_plain = if node.selected {
        format!(" {}", Icon::Selected.render(supports_unicode))
    } else {
        String::new()
    };

    let prefix_width = cursor.width() + indent.width() + expander_width + 1 + icon.width() + 1;
    let name = if width == 0 {
        Cow::Borrowed(node.name)
    } else {
        let room = width.saturating_sub(prefix_width + marker_plain.width());
        truncate(node.name, room, supports_unicode)
    };

    let (name, marker) = if node.selected {
        (
            paint(&name, theme::colors::INFO, supports_color),
            format!(" {}", Icon::Selected.colored(supports_color, supports_unicode)),
        )
    } else {
        (name.into_owned(), marker_plain)
    };

    format!("{cursor}{indent}{expander} {icon} {name}{marker}")
}

/// Cut `text` to at most `max` columns, ending in an ellipsis when cut
pub fn truncate(text: &str, max: usize, supports_unicode: bool) -> Cow<'_, str> {
    if text.width() <= max {
        return Cow::Borrowed(text);
    }

    let ellipsis = if supports_unicode { "…" } else { "..." };
    let budget = max.saturating_sub(ellipsis.width());
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    if max >= ellipsis.width() {
        out.push_str(ellipsis);
    }
    Cow::Owned(out)
}
