//! Icons and colored text shared by widgets and views

use crossterm::style::Stylize;

use crate::ui::theme;
use repolens::FileClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Pending,
    Pointer,
    Selected,
    Expand,
    Collapse,
    Folder,
    FolderOpen,
    File(FileClass),
    Upload,
    Browse,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{icons, icons_ascii};

        match (supports_unicode, self) {
            (true, Icon::Success) => icons::SUCCESS,
            (true, Icon::Error) => icons::ERROR,
            (true, Icon::Warning) => icons::WARNING,
            (true, Icon::Progress) => icons::PROGRESS,
            (true, Icon::Pending) => icons::PENDING,
            (true, Icon::Pointer) => icons::POINTER,
            (true, Icon::Selected) => icons::SELECTED,
            (true, Icon::Expand) => icons::EXPAND,
            (true, Icon::Collapse) => icons::COLLAPSE,
            (true, Icon::Folder) => icons::FOLDER,
            (true, Icon::FolderOpen) => icons::FOLDER_OPEN,
            (true, Icon::File(FileClass::Code)) => icons::FILE_CODE,
            (true, Icon::File(FileClass::Data)) => icons::FILE_DATA,
            (true, Icon::File(FileClass::Text)) => icons::FILE_TEXT,
            (true, Icon::Upload) => icons::UPLOAD,
            (true, Icon::Browse) => icons::BROWSE,
            (false, Icon::Success) => icons_ascii::SUCCESS,
            (false, Icon::Error) => icons_ascii::ERROR,
            (false, Icon::Warning) => icons_ascii::WARNING,
            (false, Icon::Progress) => icons_ascii::PROGRESS,
            (false, Icon::Pending) => icons_ascii::PENDING,
            (false, Icon::Pointer) => icons_ascii::POINTER,
            (false, Icon::Selected) => icons_ascii::SELECTED,
            (false, Icon::Expand) => icons_ascii::EXPAND,
            (false, Icon::Collapse) => icons_ascii::COLLAPSE,
            (false, Icon::Folder) => icons_ascii::FOLDER,
            (false, Icon::FolderOpen) => icons_ascii::FOLDER_OPEN,
            (false, Icon::File(FileClass::Code)) => icons_ascii::FILE_CODE,
            (false, Icon::File(FileClass::Data)) => icons_ascii::FILE_DATA,
            (false, Icon::File(FileClass::Text)) => icons_ascii::FILE_TEXT,
            (false, Icon::Upload) => icons_ascii::UPLOAD,
            (false, Icon::Browse) => icons_ascii::BROWSE,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Pending | Icon::Expand | Icon::Collapse => theme::colors::DIM,
            Icon::Pointer | Icon::Selected | Icon::Upload | Icon::Browse => {
                theme::colors::INFO
            }
            Icon::Folder | Icon::FolderOpen | Icon::File(_) => return s.to_string(),
        };
        format!("{}", s.with(color))
    }
}

/// Wrap `text` in a semantic color when color is on
pub fn paint(text: &str, color: crossterm::style::Color, supports_color: bool) -> String {
    if supports_color {
        format!("{}", text.with(color))
    } else {
        text.to_string()
    }
}
