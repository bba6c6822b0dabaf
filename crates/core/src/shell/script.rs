//! Directive buffer evaluated by the calling shell.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use super::{ACTIVE_VAR, PREV_HISTFILE_VAR, ShellKind, quote};
use crate::editor::EditRequest;
use crate::history::{HistoryError, HistoryStore};
use crate::hooks::{HookError, HookInvocation, HookRunner};

/// Ordered shell directives for one invocation.
///
/// Clones share the same buffer, so the hook runner and history store attached
/// to a manager append to one script in the order the manager calls them.
#[derive(Debug, Clone)]
pub struct ShellScript {
    kind: ShellKind,
    lines: Rc<RefCell<Vec<String>>>,
}

impl ShellScript {
    pub fn new(kind: ShellKind) -> Self {
        Self { kind, lines: Rc::default() }
    }

    pub fn kind(&self) -> ShellKind {
        self.kind
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lines.borrow_mut().push(line.into());
    }

    pub fn export(&self, key: &str, value: &str) {
        self.push(format!("export {key}={}", quote(value)));
    }

    pub fn unset(&self, key: &str) {
        self.push(format!("unset {key}"));
    }

    /// Publish the active context to the caller's environment.
    pub fn set_active(&self, active: Option<&str>) {
        match active {
            Some(name) => self.export(ACTIVE_VAR, name),
            None => self.unset(ACTIVE_VAR),
        }
    }

    /// Source `path` into the caller's scope.
    pub fn source(&self, path: &Path) {
        self.push(format!(". {}", quote(&path.to_string_lossy())));
    }

    /// Run the editor in the caller's terminal.
    pub fn edit(&self, req: &EditRequest) {
        let words: Vec<String> = req.argv().iter().map(|w| quote(w)).collect();
        self.push(words.join(" "));
    }

    pub fn render(&self) -> String {
        let lines = self.lines.borrow();
        let mut out = String::new();
        for line in lines.iter() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Sources hooks into the calling shell.
///
/// A failing hook fails in the caller exactly as an inline snippet would.
#[derive(Debug, Clone)]
pub struct SourceHookRunner {
    script: ShellScript,
}

impl SourceHookRunner {
    pub fn new(script: ShellScript) -> Self {
        Self { script }
    }
}

impl HookRunner for SourceHookRunner {
    fn run(&mut self, inv: &HookInvocation<'_>) -> Result<(), HookError> {
        self.script.source(inv.script);
        Ok(())
    }
}

/// Drives the calling shell's own history mechanism.
#[derive(Debug, Clone)]
pub struct ShellHistory {
    script: ShellScript,
}

impl ShellHistory {
    pub fn new(script: ShellScript) -> Self {
        Self { script }
    }
}

impl HistoryStore for ShellHistory {
    fn switch_to(&mut self, file: &Path) -> Result<(), HistoryError> {
        let file = quote(&file.to_string_lossy());
        match self.script.kind() {
            ShellKind::Bash => {
                self.script.push(r#"if [ -n "${HISTFILE-}" ]; then history -a; fi"#);
                self.script
                    .push(format!(r#"export {PREV_HISTFILE_VAR}="${{HISTFILE-}}""#));
                self.script.push(format!("HISTFILE={file}"));
                self.script.push("history -c");
                self.script.push("history -r");
            }
            ShellKind::Zsh => self.script.push(format!("fc -p {file}")),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), HistoryError> {
        match self.script.kind() {
            ShellKind::Bash => self.script.push("history -a"),
            ShellKind::Zsh => self.script.push("fc -AI"),
        }
        Ok(())
    }

    fn restore(&mut self) -> Result<(), HistoryError> {
        match self.script.kind() {
            ShellKind::Bash => {
                self.script.push(format!(
                    r#"if [ -n "${{{PREV_HISTFILE_VAR}-}}" ]; then HISTFILE="${PREV_HISTFILE_VAR}"; history -c; history -r; else unset HISTFILE; history -c; fi"#
                ));
                self.script.unset(PREV_HISTFILE_VAR);
            }
            ShellKind::Zsh => self.script.push("fc -P"),
        }
        Ok(())
    }
}
