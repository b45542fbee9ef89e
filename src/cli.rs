//! CLI Argument Parsing
//!
//! Global flags (--json, --color, --verbose, --config) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{ArgMatches, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Repolens - upload a repository and browse its indexed files
#[derive(Parser, Debug)]
#[command(name = "repolens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./.repolens.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an archive and run the processing pipeline
    Process {
        /// Repository archive to upload
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,
    },

    /// Print the file tree of a listing file or directory
    Tree {
        /// Listing file (.json/.yaml) or directory to scan
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Activate a path (select a file, toggle a directory)
        #[arg(long, value_name = "PATH")]
        select: Vec<String>,

        /// Expand or collapse a directory
        #[arg(long, value_name = "PATH")]
        toggle: Vec<String>,

        /// Expand every directory before applying --select/--toggle
        #[arg(long)]
        all: bool,
    },

    /// Browse a listing file or directory interactively
    Browse {
        /// Listing file (.json/.yaml) or directory to scan
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
    },
}

/// One `--select` or `--toggle`, in command-line order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeAction {
    Select(String),
    Toggle(String),
}

/// Interleave `--select` and `--toggle` values by their position on the
/// command line. `matches` are the `tree` subcommand's matches.
pub fn ordered_tree_actions(matches: &ArgMatches) -> Vec<TreeAction> {
    let mut actions: Vec<(usize, TreeAction)> = Vec::new();
    collect(matches, "select", TreeAction::Select, &mut actions);
    collect(matches, "toggle", TreeAction::Toggle, &mut actions);
    actions.sort_by_key(|(index, _)| *index);
    actions.into_iter().map(|(_, action)| action).collect()
}

fn collect(
    matches: &ArgMatches,
    id: &str,
    make: fn(String) -> TreeAction,
    out: &mut Vec<(usize, TreeAction)>,
) {
    let (Some(values), Some(indices)) = (
        matches.get_many::<String>(id),
        matches.indices_of(id),
    ) else {
        return;
    };
    out.extend(indices.zip(values.cloned().map(make)));
}
