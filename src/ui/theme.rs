use crossterm::style::Color;

/// Design tokens for the Repolens terminal UI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const PENDING: &str = "○";
    pub const POINTER: &str = "›";
    pub const SELECTED: &str = "●";

    // Tree expansion.
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";

    // Tree entries.
    pub const FOLDER: &str = "📁";
    pub const FOLDER_OPEN: &str = "📂";
    pub const FILE_CODE: &str = "📄";
    pub const FILE_DATA: &str = "🧾";
    pub const FILE_TEXT: &str = "📝";

    // Command identifiers (used in headers).
    pub const UPLOAD: &str = "📦";
    pub const BROWSE: &str = "🔍";

    // Key hints.
    pub const KEYS_MOVE: &str = "↑↓";
    pub const KEYS_FOLD: &str = "→←";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const PENDING: &str = "[ ]";
    pub const POINTER: &str = ">";
    pub const SELECTED: &str = "(*)";

    // Tree expansion.
    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";

    pub const FOLDER: &str = "[D]";
    pub const FOLDER_OPEN: &str = "[D]";
    pub const FILE_CODE: &str = "[c]";
    pub const FILE_DATA: &str = "[d]";
    pub const FILE_TEXT: &str = "[t]";

    pub const UPLOAD: &str = "[UPLOAD]";
    pub const BROWSE: &str = "[BROWSE]";

    pub const KEYS_MOVE: &str = "Up/Down";
    pub const KEYS_FOLD: &str = "Right/Left";
}
