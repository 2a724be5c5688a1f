//! Configuration module.
//!
//! Settings are resolved from defaults, an optional TOML file, environment
//! variables and CLI flags, in increasing order of precedence.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, load_config_file,
    load_config_with_precedence, merge_config, ConfigError, ConfigFile, ResolvedConfig,
};
