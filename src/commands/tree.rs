use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use repolens::{Config, SelectionCoordinator, SessionEventSink, TreeModel};

use super::{load_tree, report_warning};
use crate::cli::TreeAction;
use crate::ui::context::UiContext;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, NodeEvent, Stamped, StartEvent};
use crate::ui::sinks::{JsonSink, TerminalSink};
use crate::ui::widgets::file_tree::FileTree;

const COMMAND: &str = "tree";

#[derive(Debug, serde::Serialize)]
struct TreeSummary<'a> {
    nodes: usize,
    visible: usize,
    selected: Option<&'a str>,
}

pub fn cmd_tree(
    source: &Path,
    actions: &[TreeAction],
    expand_all: bool,
    config: &Config,
    ui: &UiContext,
) -> Result<ExitCode> {
    let mut tree = load_tree(source, config)?;
    if expand_all {
        tree.expand_all();
    }

    if ui.json {
        emit_event(&Stamped::now(COMMAND, StartEvent::new()))?;

        let sink = apply_actions(&mut tree, actions, JsonSink::new(COMMAND, io::stdout()), ui)?;
        sink.finish()?;

        for node in tree.visible() {
            emit_event(&Stamped::now(COMMAND, NodeEvent::new(node)))?;
        }
        let summary = TreeSummary {
            nodes: tree.len(),
            visible: tree.visible().count(),
            selected: tree.selected(),
        };
        emit_event(&Stamped::now(COMMAND, CompleteEvent::new(true, summary)))?;
    } else {
        let sink = apply_actions(&mut tree, actions, TerminalSink::new(io::stdout(), *ui), ui)?;
        let mut out = sink.finish()?;
        if !actions.is_empty() {
            writeln!(out)?;
        }

        let width = if ui.caps.is_tty {
            ui.caps.width as usize
        } else {
            0
        };
        let rendered = FileTree::new(&tree)
            .with_width(width)
            .render(ui.color, ui.unicode);
        writeln!(out, "{rendered}")?;

        if let Some(selected) = tree.selected() {
            writeln!(out, "\nSelected: {selected}")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Run each action through a coordinator; paths that do nothing are warned
/// about, not fatal.
fn apply_actions<S: SessionEventSink>(
    tree: &mut TreeModel,
    actions: &[TreeAction],
    sink: S,
    ui: &UiContext,
) -> Result<S> {
    let mut coordinator = SelectionCoordinator::new(sink);
    for action in actions {
        match action {
            TreeAction::Select(path) => {
                if coordinator.activate(tree, path).is_none() {
                    report_warning(COMMAND, &format!("no entry '{path}' in the listing"), ui)?;
                }
            }
            TreeAction::Toggle(path) => {
                if coordinator.toggle(tree, path).is_none() {
                    let message = if tree.contains(path) {
                        format!("'{path}' is a file and cannot be toggled")
                    } else {
                        format!("no entry '{path}' in the listing")
                    };
                    report_warning(COMMAND, &message, ui)?;
                }
            }
        }
    }
    Ok(coordinator.into_sink())
}
