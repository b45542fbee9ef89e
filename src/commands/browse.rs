use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Result};
use repolens::Config;

use super::load_tree;
use crate::ui::context::UiContext;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, Stamped};
use crate::ui::terminal::is_interactive;
use crate::ui::widgets::tree_browser::{run_interactive, TreeBrowser};

#[derive(Debug, serde::Serialize)]
struct BrowseResult<'a> {
    selected: Option<&'a str>,
}

pub fn cmd_browse(source: &Path, config: &Config, ui: &UiContext) -> Result<ExitCode> {
    if !is_interactive() {
        bail!("browse needs an interactive terminal; use `repolens tree` for scripted output");
    }

    let tree = load_tree(source, config)?;
    let mut browser = TreeBrowser::new(tree);
    let title = source.display().to_string();
    let selected = run_interactive(&mut browser, &title, ui)?;

    if ui.json {
        emit_event(&Stamped::now(
            "browse",
            CompleteEvent::new(
                true,
                BrowseResult {
                    selected: selected.as_deref(),
                },
            ),
        ))?;
    } else if let Some(path) = selected {
        println!("{path}");
    }

    Ok(ExitCode::SUCCESS)
}
