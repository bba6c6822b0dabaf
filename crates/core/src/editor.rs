//! External editor resolution and invocation.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor command is empty")]
    Empty,

    #[error("cannot parse editor command '{0}'")]
    Unparsable(String),

    #[error("failed to launch editor '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// An editor command line such as `code --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EditorCommand {
    /// Split a command line with shell quoting rules.
    pub fn parse(command: &str) -> Result<Self, EditorError> {
        let mut words = shlex::split(command)
            .ok_or_else(|| EditorError::Unparsable(command.to_string()))?
            .into_iter();
        let program = words.next().ok_or(EditorError::Empty)?;
        Ok(Self { program, args: words.collect() })
    }

    /// Render back to a single command line.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|w| crate::shell::quote(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A request to open one file of the active context in the editor.
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub editor: EditorCommand,
    pub path: PathBuf,
}

impl EditRequest {
    pub fn new(editor: EditorCommand, path: impl Into<PathBuf>) -> Self {
        Self { editor, path: path.into() }
    }

    /// Full argument vector: program, its arguments, then the file.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.editor.args.len() + 2);
        argv.push(self.editor.program.clone());
        argv.extend(self.editor.args.iter().cloned());
        argv.push(self.path.to_string_lossy().into_owned());
        argv
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Launch the editor in the foreground and wait for it.
    pub fn spawn(&self) -> Result<ExitStatus, EditorError> {
        Command::new(&self.editor.program)
            .args(&self.editor.args)
            .arg(&self.path)
            .status()
            .map_err(|source| EditorError::Launch {
                program: self.editor.program.clone(),
                source,
            })
    }
}
