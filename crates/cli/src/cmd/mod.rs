//! Command implementations.

pub mod delete;
pub mod doctor;
pub mod edit;
pub mod init;
pub mod list;
pub mod new;
pub mod transition;

use shctx_core::config::{HookMode, ResolvedConfig};
use shctx_core::context::{ContextError, ContextManager, ContextStore, Session};
use shctx_core::editor::EditorError;
use shctx_core::hooks::{HookRunner, ProcessHookRunner};
use shctx_core::shell::{
    ShellHistory, ShellKind, ShellScript, SourceHookRunner, ACTIVE_VAR,
};

use crate::Commands;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error(
        "shell integration is not loaded; add `eval \"$(shctx init bash)\"` (or zsh) to your shell rc"
    )]
    NoShellIntegration,

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            // Surface the hook's own status, like an inline script would.
            CliError::Context(ContextError::Hook(e)) => {
                u8::try_from(e.exit_code()).ok().filter(|c| *c != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

pub type Manager = ContextManager<Box<dyn HookRunner>, ShellHistory>;

/// Run a parsed command. `script` is present when invoked by the shell wrapper.
pub fn dispatch(
    command: Commands,
    cfg: &ResolvedConfig,
    script: Option<&ShellScript>,
) -> Result<()> {
    match command {
        Commands::New { name } => new::run(cfg, &name),
        Commands::Delete { name } => delete::run(cfg, &name),
        Commands::Enter { name } => transition::enter(cfg, require_shell(script)?, &name),
        Commands::Leave => transition::leave(cfg, require_shell(script)?),
        Commands::Reload => transition::reload(cfg, require_shell(script)?),
        Commands::Edit { path } => edit::run(cfg, script, &path),
        Commands::List { json } => list::run(cfg, json),
        Commands::Current { json } => list::current(json),
        // Handled before configuration is loaded.
        Commands::Init { .. } | Commands::Doctor => Ok(()),
    }
}

fn require_shell(script: Option<&ShellScript>) -> Result<&ShellScript> {
    script.ok_or(CliError::NoShellIntegration)
}

/// Session of the calling shell, as published by the wrapper.
pub fn current_session() -> Session {
    Session::resume(std::env::var(ACTIVE_VAR).ok())
}

/// Build a manager whose side effects land in `script`.
pub fn open_manager(cfg: &ResolvedConfig, script: &ShellScript) -> Manager {
    let hooks: Box<dyn HookRunner> = match cfg.hooks.mode {
        HookMode::Source => Box::new(SourceHookRunner::new(script.clone())),
        HookMode::Process => {
            Box::new(ProcessHookRunner::new(&cfg.hooks.shell).forward_to(script.clone()))
        }
    };
    ContextManager::new(
        ContextStore::new(&cfg.root),
        current_session(),
        hooks,
        ShellHistory::new(script.clone()),
    )
}

/// Manager for commands that never touch the calling shell.
pub fn open_detached(cfg: &ResolvedConfig) -> Manager {
    open_manager(cfg, &ShellScript::new(ShellKind::Bash))
}
