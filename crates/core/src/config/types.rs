use std::path::PathBuf;

use serde::Deserialize;

use crate::editor::EditorCommand;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    /// Directory holding one sub-directory per context.
    #[serde(default)]
    pub root: Option<String>,
    /// Editor command line used by `edit` (falls back to `$VISUAL` / `$EDITOR`).
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub hooks: HooksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How enter/leave hooks are executed.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HookMode {
    /// Source the hook into the calling shell.
    #[default]
    Source,
    /// Run the hook as a child process and re-apply its exported variables.
    Process,
}

impl HookMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookMode::Source => "source",
            HookMode::Process => "process",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HooksConfig {
    #[serde(default)]
    pub mode: HookMode,
    /// Interpreter for hooks in process mode.
    #[serde(default = "default_hook_shell")]
    pub shell: String,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self { mode: HookMode::default(), shell: default_hook_shell() }
    }
}

fn default_hook_shell() -> String {
    "sh".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Config file that was read, if any.
    pub source: Option<PathBuf>,
    pub root: PathBuf,
    pub editor: Option<EditorCommand>,
    pub hooks: HooksConfig,
    pub logging: LoggingConfig,
}
