//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RepolensError, RepolensResult};

use super::types::{ColorMode, Config, Verbosity};

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".repolens.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A key in a config file that no section knows about
    UnknownKey {
        key: String,
        file: PathBuf,
        line: Option<usize>,
        suggestion: Option<String>,
    },
    /// A `REPOLENS_*` variable whose value could not be used; the file or
    /// default value stays in effect
    InvalidOverride {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> RepolensResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML config text; `path` is only used for messages.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> RepolensResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| RepolensError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning::UnknownKey {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// User config location (`<config_dir>/repolens/config.toml`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("repolens").join("config.toml"))
}

/// Pick the config file to read: an explicit path wins, then the project
/// file, then the user file. Only existing files are returned, except an
/// explicit path which is returned as given.
pub fn resolve_config_path(explicit: Option<&Path>, project_root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project_config = project_root.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        return Some(project_config);
    }

    user_config_path().filter(|p| p.is_file())
}

/// Load from explicit, project or user config, or defaults; then apply
/// `REPOLENS_*` environment overrides.
///
/// Runs before logging is set up, so every problem comes back as a
/// [`ConfigWarning`] for the caller to report.
pub fn load_or_default(
    explicit: Option<&Path>,
    project_root: &Path,
) -> RepolensResult<(Config, Vec<ConfigWarning>)> {
    let (config, mut warnings) = match resolve_config_path(explicit, project_root) {
        Some(path) => load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };
    let (config, env_warnings) = with_env_overrides(config);
    warnings.extend(env_warnings);
    Ok((config, warnings))
}

/// Apply environment variable overrides (REPOLENS_* prefix)
pub fn with_env_overrides(config: Config) -> (Config, Vec<ConfigWarning>) {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> (Config, Vec<ConfigWarning>) {
    let mut warnings = Vec::new();

    if let Some(ms) = parse_override(
        &get_env,
        "REPOLENS_TICK_MS",
        "a number of milliseconds",
        parse_millis,
        &mut warnings,
    ) {
        config.pipeline.tick_ms = ms;
    }

    if let Some(ms) = parse_override(
        &get_env,
        "REPOLENS_SETTLE_MS",
        "a number of milliseconds",
        parse_millis,
        &mut warnings,
    ) {
        config.pipeline.settle_ms = ms;
    }

    if let Some(color) = parse_override(
        &get_env,
        "REPOLENS_COLOR",
        "auto, always or never",
        parse_color,
        &mut warnings,
    ) {
        config.output.color = color;
    }

    if let Some(verbosity) = parse_override(
        &get_env,
        "REPOLENS_VERBOSITY",
        "quiet, normal, verbose or debug",
        parse_verbosity,
        &mut warnings,
    ) {
        config.output.verbosity = verbosity;
    }

    if let Some(val) = get_env("REPOLENS_UNICODE") {
        config.output.unicode = val.to_lowercase() != "false" && val != "0";
    }

    (config, warnings)
}

/// Read and parse one override. Unusable values become a warning.
fn parse_override<T>(
    get_env: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
    warnings: &mut Vec<ConfigWarning>,
) -> Option<T> {
    let value = get_env(var)?;
    let parsed = parse(value.trim());
    if parsed.is_none() {
        warnings.push(ConfigWarning::InvalidOverride {
            var,
            value,
            expected,
        });
    }
    parsed
}

fn parse_millis(value: &str) -> Option<u64> {
    value.parse().ok()
}

fn parse_color(value: &str) -> Option<ColorMode> {
    match value.to_lowercase().as_str() {
        "auto" => Some(ColorMode::Auto),
        "always" => Some(ColorMode::Always),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}

fn parse_verbosity(value: &str) -> Option<Verbosity> {
    match value.to_lowercase().as_str() {
        "quiet" => Some(Verbosity::Quiet),
        "normal" => Some(Verbosity::Normal),
        "verbose" => Some(Verbosity::Verbose),
        "debug" => Some(Verbosity::Debug),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "pipeline",
        "uploading_ms",
        "embedding_ms",
        "indexing_ms",
        "completed_ms",
        "tick_ms",
        "settle_ms",
        "tree",
        "auto_expand_depth",
        "upload",
        "max_archive_bytes",
        "extensions",
        "output",
        "color",
        "unicode",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
