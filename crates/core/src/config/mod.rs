//! Configuration loading.
//!
//! Configuration lives in `~/.config/shctx/config.toml` and is optional.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{HookMode, HooksConfig, LoggingConfig, ResolvedConfig};
