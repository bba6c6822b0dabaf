//! Child-process hook runner.

use std::fs;
use std::io;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use super::{HookError, HookInvocation, HookRunner};
use crate::shell::ShellScript;

/// Variable naming the file a hook writes `KEY=VALUE` lines to.
pub const ENV_FILE_VAR: &str = "SHCTX_ENV_FILE";

/// Runs hooks as child processes of the given interpreter.
///
/// Environment changes made by the hook do not leak back on their own. A hook
/// that wants to export a variable writes `KEY=VALUE` (optionally prefixed with
/// `export `) to `$SHCTX_ENV_FILE`; those pairs are collected and, when a
/// script is attached, forwarded to it as `export` directives.
#[derive(Debug)]
pub struct ProcessHookRunner {
    shell: String,
    exports: Vec<(String, String)>,
    forward: Option<ShellScript>,
}

impl ProcessHookRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into(), exports: Vec::new(), forward: None }
    }

    /// Forward collected exports to `script` as they arrive.
    pub fn forward_to(mut self, script: ShellScript) -> Self {
        self.forward = Some(script);
        self
    }

    /// Variables exported by hooks run so far, in order.
    pub fn exports(&self) -> &[(String, String)] {
        &self.exports
    }
}

impl HookRunner for ProcessHookRunner {
    fn run(&mut self, inv: &HookInvocation<'_>) -> Result<(), HookError> {
        let env_file = tempfile::NamedTempFile::new()
            .map_err(|source| HookError::EnvFile { kind: inv.kind, source })?;

        debug!(
            context = inv.context,
            hook = %inv.kind,
            shell = %self.shell,
            "running hook"
        );

        // Hook stdout must not mix with directives printed on our stdout.
        let status = Command::new(&self.shell)
            .arg(inv.script)
            .env("SHCTX_CONTEXT", inv.context)
            .env("SHCTX_HOOK", inv.kind.file_name())
            .env(ENV_FILE_VAR, env_file.path())
            .stdout(Stdio::from(io::stderr()))
            .status()
            .map_err(|source| HookError::Spawn {
                kind: inv.kind,
                script: inv.script.to_path_buf(),
                source,
            })?;

        if !status.success() {
            return Err(match status.code() {
                Some(code) => HookError::Failed {
                    kind: inv.kind,
                    script: inv.script.to_path_buf(),
                    code,
                },
                None => {
                    HookError::Killed { kind: inv.kind, script: inv.script.to_path_buf() }
                }
            });
        }

        let content = fs::read_to_string(env_file.path())
            .map_err(|source| HookError::EnvFile { kind: inv.kind, source })?;

        for (key, value) in parse_exports(&content) {
            if let Some(script) = &self.forward {
                script.export(&key, &value);
            }
            self.exports.push((key, value));
        }

        Ok(())
    }
}

/// Parse `KEY=VALUE` lines as written by hooks.
///
/// Blank lines and `#` comments are skipped, a leading `export ` is accepted
/// and one level of matching quotes around the value is removed. Lines whose
/// key is not a valid variable name are ignored.
pub fn parse_exports(content: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            warn!(line, "ignoring malformed hook export");
            continue;
        };

        let key = key.trim();
        if !is_var_name(key) {
            warn!(key, "ignoring hook export with invalid name");
            continue;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);

        out.push((key.to_string(), value.to_string()));
    }

    out
}

fn is_var_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
