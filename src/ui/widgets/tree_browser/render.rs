//! Status and help bars, plus the sink that feeds the status bar.

use repolens::SessionEventSink;

use crate::ui::theme::{icons, icons_ascii};

/// Render the status bar showing the selected file and the last event
pub fn render_status_bar(selected: Option<&str>, last_event: Option<&str>) -> String {
    let selected = selected.unwrap_or("none");
    match last_event {
        Some(event) => format!("Selected: {selected}    ({event})"),
        None => format!("Selected: {selected}"),
    }
}

/// Render the help bar showing keyboard shortcuts
pub fn render_help_bar(supports_unicode: bool) -> String {
    let (move_keys, fold_keys) = if supports_unicode {
        (icons::KEYS_MOVE, icons::KEYS_FOLD)
    } else {
        (icons_ascii::KEYS_MOVE, icons_ascii::KEYS_FOLD)
    };
    format!(
        "[Enter] Open    [+/-] Expand/collapse all    [c] Clear    [q] Quit\n\
         (Use {move_keys} to navigate, {fold_keys} to expand/collapse)"
    )
}

/// Keeps a one-line description of the latest tree event
#[derive(Debug, Default)]
pub struct StatusSink {
    last: Option<String>,
}

impl StatusSink {
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl SessionEventSink for StatusSink {
    fn on_toggle(&mut self, path: &str, expanded: bool) {
        let verb = if expanded { "expanded" } else { "collapsed" };
        self.last = Some(format!("{verb} {path}"));
    }

    fn on_select(&mut self, path: &str) {
        self.last = Some(format!("opened {path}"));
    }

    fn on_clear_selection(&mut self, path: &str) {
        self.last = Some(format!("cleared {path}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_shows_selection_and_event() {
        assert_eq!(render_status_bar(None, None), "Selected: none");
        assert_eq!(
            render_status_bar(Some("src/a.rs"), Some("collapsed src")),
            "Selected: src/a.rs    (collapsed src)"
        );
    }

    #[test]
    fn status_sink_keeps_latest_event() {
        let mut sink = StatusSink::default();
        sink.on_toggle("src", true);
        sink.on_select("src/a.rs");
        assert_eq!(sink.last(), Some("opened src/a.rs"));
    }

    #[test]
    fn help_bar_lists_shortcuts() {
        let help = render_help_bar(true);
        assert!(help.contains("[Enter] Open"));
        assert!(help.contains("[q] Quit"));
        assert!(help.contains("Use ↑↓ to navigate"));
    }

    #[test]
    fn help_bar_is_ascii_without_unicode() {
        let help = render_help_bar(false);
        assert!(help.is_ascii());
        assert!(help.contains("Use Up/Down to navigate, Right/Left to expand/collapse"));
    }
}
