use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};
use crate::editor::{EditorCommand, EditorError};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,

    #[error("invalid editor command: {0}")]
    BadEditor(#[from] EditorError),
}

/// Environment variable overriding the context root.
pub const ROOT_ENV: &str = "SHCTX_ROOT";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration using the process environment.
    ///
    /// An explicit `config_path` must exist; the default location is optional
    /// and falls back to built-in defaults when absent.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        Self::load_with_env(config_path, |key| env::var(key).ok())
    }

    /// Load configuration with a custom environment lookup.
    pub fn load_with_env<F>(
        config_path: Option<&Path>,
        lookup: F,
    ) -> Result<ResolvedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (path, explicit) = match config_path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path_with(&lookup), false),
        };

        let file = if path.exists() {
            let s = fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;
            let cf: ConfigFile = toml::from_str(&s)
                .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;
            if cf.version != 1 {
                return Err(ConfigError::BadVersion(cf.version));
            }
            Some(cf)
        } else if explicit {
            return Err(ConfigError::NotFound(path.display().to_string()));
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            None
        };

        let source = file.as_ref().map(|_| path);
        Self::resolve(source, file, &lookup)
    }

    fn resolve<F>(
        source: Option<PathBuf>,
        file: Option<ConfigFile>,
        lookup: &F,
    ) -> Result<ResolvedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (root, editor, hooks, log_cfg) = match file {
            Some(cf) => (cf.root, cf.editor, cf.hooks, cf.logging),
            None => (None, None, Default::default(), LoggingConfig::default()),
        };

        let root = match lookup(ROOT_ENV).filter(|s| !s.is_empty()).or(root) {
            Some(r) => expand_path(&r)?,
            None => default_root_with(lookup),
        };

        let editor = editor
            .or_else(|| lookup("VISUAL"))
            .or_else(|| lookup("EDITOR"))
            .filter(|s| !s.trim().is_empty())
            .map(|s| EditorCommand::parse(&s))
            .transpose()?;

        let logging = match log_cfg.file {
            Some(ref file) => LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            },
            None => log_cfg,
        };

        Ok(ResolvedConfig { source, root, editor, hooks, logging })
    }
}

pub fn default_config_path() -> PathBuf {
    default_config_path_with(&|key: &str| env::var(key).ok())
}

fn default_config_path_with<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(xdg) = lookup("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("shctx").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("shctx").join("config.toml")
}

/// Default context root.
/// Global location: ~/.local/share/shctx/
fn default_root_with<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(xdg) = lookup("XDG_DATA_HOME") {
        return Path::new(&xdg).join("shctx");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".local").join("share").join("shctx")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
