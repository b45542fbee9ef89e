//! Subcommand implementations
//!
//! Each command returns the process exit code; errors bubble up to `main`.

pub mod browse;
pub mod process;
pub mod tree;

use std::path::Path;

use anyhow::Result;
use repolens::{Config, ConfigWarning, TreeModel};

use crate::ui::context::UiContext;
use crate::ui::json::{emit_event, events::Stamped, events::WarningEvent};
use crate::ui::primitives::Icon;

/// Exit code for a run interrupted with Ctrl+C
pub const EXIT_INTERRUPTED: u8 = 130;

pub fn format_config_warning(warning: &ConfigWarning) -> String {
    match warning {
        ConfigWarning::UnknownKey {
            key,
            file,
            line,
            suggestion,
        } => {
            let location = match line {
                Some(line) => format!("{}:{}", file.display(), line),
                None => file.display().to_string(),
            };
            match suggestion {
                Some(suggestion) => format!(
                    "unknown config key '{key}' in {location} (did you mean '{suggestion}'?)"
                ),
                None => format!("unknown config key '{key}' in {location}"),
            }
        }
        ConfigWarning::InvalidOverride {
            var,
            value,
            expected,
        } => format!("ignoring {var}='{value}': expected {expected}"),
    }
}

/// Report a non-fatal problem on stderr, or as an event in JSON mode
pub fn report_warning(command: &str, message: &str, ui: &UiContext) -> Result<()> {
    if ui.json {
        emit_event(&Stamped::now(command, WarningEvent::new(message)))?;
    } else {
        eprintln!("{} {}", Icon::Warning.colored(ui.color, ui.unicode), message);
    }
    Ok(())
}

/// Load `source` and build the tree with the configured auto-expand depth
pub fn load_tree(source: &Path, config: &Config) -> Result<TreeModel> {
    let nodes = repolens::load_source(source)?;
    let tree = TreeModel::build_with_auto_expand(&nodes, config.tree.auto_expand_depth)
        .map_err(repolens::RepolensError::from)?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn warning_mentions_location_and_suggestion() {
        let warning = ConfigWarning::UnknownKey {
            key: "tick".to_string(),
            file: PathBuf::from(".repolens.toml"),
            line: Some(3),
            suggestion: Some("tick_ms".to_string()),
        };
        assert_eq!(
            format_config_warning(&warning),
            "unknown config key 'tick' in .repolens.toml:3 (did you mean 'tick_ms'?)"
        );
    }

    #[test]
    fn override_warning_names_variable_and_expectation() {
        let warning = ConfigWarning::InvalidOverride {
            var: "REPOLENS_TICK_MS",
            value: "abc".to_string(),
            expected: "a number of milliseconds",
        };
        assert_eq!(
            format_config_warning(&warning),
            "ignoring REPOLENS_TICK_MS='abc': expected a number of milliseconds"
        );
    }
}
