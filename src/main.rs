//! Repolens CLI
//!
//! Usage: repolens <COMMAND>
//!
//! Commands:
//!   process  Validate an archive and run the processing pipeline
//!   tree     Print the file tree of a listing file or directory
//!   browse   Browse a listing file or directory interactively

mod cli;
mod commands;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use tracing::debug;

use cli::{Cli, Commands};
use repolens::config::{load_or_default, resolve_config_path};
use repolens::logging;
use ui::context::UiContext;
use ui::json::{emit_event, events::ErrorEvent, events::Stamped};
use ui::primitives::Icon;

fn main() -> ExitCode {
    let matches = Cli::command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let json = cli.json;
    match run(cli, &matches) {
        Ok(code) => code,
        Err(err) => {
            if json {
                let _ = emit_event(&Stamped::now("repolens", ErrorEvent::new(format!("{err:#}"))));
            } else {
                let unicode = ui::terminal::detect_capabilities().supports_unicode;
                eprintln!("{} {err:#}", Icon::Error.render(unicode));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, matches: &clap::ArgMatches) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let (config, warnings) = load_or_default(cli.config.as_deref(), &cwd)?;

    logging::init(logging::level_for(cli.verbose, config.output.verbosity));
    debug!(
        path = ?resolve_config_path(cli.config.as_deref(), &cwd),
        ?config,
        "configuration resolved"
    );

    let ui = UiContext::new(cli.json, cli.color, &config);
    let command = matches.subcommand_name().unwrap_or("repolens");
    for warning in &warnings {
        commands::report_warning(command, &commands::format_config_warning(warning), &ui)?;
    }

    match cli.command {
        Commands::Process { archive } => commands::process::cmd_process(&archive, &config, &ui),
        Commands::Tree { source, all, .. } => {
            let actions = matches
                .subcommand_matches("tree")
                .map(cli::ordered_tree_actions)
                .unwrap_or_default();
            commands::tree::cmd_tree(&source, &actions, all, &config, &ui)
        }
        Commands::Browse { source } => commands::browse::cmd_browse(&source, &config, &ui),
    }
}
