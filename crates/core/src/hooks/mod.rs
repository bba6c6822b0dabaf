//! Enter/leave hook execution.
//!
//! Each context may carry an `enter` and a `leave` script. The manager decides
//! *when* a hook runs; a [`HookRunner`] decides *how*. Two runners ship with the
//! crate:
//!
//! - [`crate::shell::SourceHookRunner`] emits a `.` directive so the calling
//!   shell sources the script into its own scope.
//! - [`ProcessHookRunner`] runs the script as a child process and collects
//!   `KEY=VALUE` lines the script writes to `$SHCTX_ENV_FILE`.

mod process;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use process::{ENV_FILE_VAR, ProcessHookRunner, parse_exports};

/// Which transition a hook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Enter,
    Leave,
}

impl HookKind {
    /// File name of the hook inside a context directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            HookKind::Enter => "enter",
            HookKind::Leave => "leave",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A single hook execution request.
#[derive(Debug, Clone, Copy)]
pub struct HookInvocation<'a> {
    pub context: &'a str,
    pub kind: HookKind,
    pub script: &'a Path,
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to start {kind} hook {}: {source}", script.display())]
    Spawn {
        kind: HookKind,
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} hook {} exited with status {code}", script.display())]
    Failed { kind: HookKind, script: PathBuf, code: i32 },

    #[error("{kind} hook {} was terminated by a signal", script.display())]
    Killed { kind: HookKind, script: PathBuf },

    #[error("failed to exchange environment with {kind} hook: {source}")]
    EnvFile {
        kind: HookKind,
        #[source]
        source: std::io::Error,
    },
}

impl HookError {
    /// Exit code to report for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            HookError::Failed { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Executes hook scripts.
///
/// Errors are returned as-is; the manager does not translate them.
pub trait HookRunner {
    fn run(&mut self, invocation: &HookInvocation<'_>) -> Result<(), HookError>;
}

impl<T: HookRunner + ?Sized> HookRunner for Box<T> {
    fn run(&mut self, invocation: &HookInvocation<'_>) -> Result<(), HookError> {
        (**self).run(invocation)
    }
}
