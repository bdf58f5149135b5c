//! Configuration module.
//!
//! Settings resolve as defaults, then config file, then environment, then CLI.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig, apply_cli_overrides,
    apply_env_overrides, apply_env_overrides_from, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config,
};
