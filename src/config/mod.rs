//! Configuration module for Repolens
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (REPOLENS_*)
//! 3. Explicit `--config` file, else project `.repolens.toml`
//! 4. User config (<config_dir>/repolens/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_or_default, load_with_warnings, parse_with_warnings, resolve_config_path,
    user_config_path, with_env_overrides, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{
    ColorMode, Config, OutputConfig, PipelineConfig, TreeConfig, UploadConfig, Verbosity,
};
