//! Shell integration.
//!
//! The `shctx` binary cannot change its parent shell directly. Instead, the
//! wrapper function installed by `shctx init <shell>` runs the binary with
//! `--emit <shell>` and evaluates what it prints. Everything that must happen
//! in the caller's scope (sourcing hooks, switching `HISTFILE`, exporting
//! `SHCTX_ACTIVE`) is expressed as directives on a [`ShellScript`].

mod init;
mod script;

use std::fmt;
use std::str::FromStr;

pub use init::init_script;
pub use script::{ShellHistory, ShellScript, SourceHookRunner};

/// Exported by the wrapper: name of the active context.
pub const ACTIVE_VAR: &str = "SHCTX_ACTIVE";

/// Exported while a context is active: history file to return to on leave.
pub const PREV_HISTFILE_VAR: &str = "SHCTX_PREV_HISTFILE";

/// Supported interactive shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Bash,
    Zsh,
}

impl ShellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShellKind::Bash => "bash",
            ShellKind::Zsh => "zsh",
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported shell '{0}' (expected bash or zsh)")]
pub struct UnsupportedShell(pub String);

impl FromStr for ShellKind {
    type Err = UnsupportedShell;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(ShellKind::Bash),
            "zsh" => Ok(ShellKind::Zsh),
            _ => Err(UnsupportedShell(s.to_string())),
        }
    }
}

/// Quote `s` so a POSIX shell reads it back as one word.
pub fn quote(s: &str) -> String {
    match shlex::try_quote(s) {
        Ok(q) => q.into_owned(),
        // Only NUL is rejected, and it cannot occur in paths or variables.
        Err(_) => quote(&s.replace('\0', "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bash", Some(ShellKind::Bash))]
    #[case("ZSH", Some(ShellKind::Zsh))]
    #[case("fish", None)]
    #[case("", None)]
    fn test_parse_shell(#[case] input: &str, #[case] expected: Option<ShellKind>) {
        assert_eq!(input.parse::<ShellKind>().ok(), expected);
    }

    #[rstest]
    #[case("plain")]
    #[case("/home/u/.local/share/shctx/work/enter")]
    #[case("with space")]
    #[case("it's")]
    #[case("$HOME; rm -rf /")]
    #[case("")]
    fn test_quote_reads_back_as_one_word(#[case] input: &str) {
        let quoted = quote(input);
        assert_eq!(shlex::split(&quoted), Some(vec![input.to_string()]));
    }

    #[test]
    fn test_quote_leaves_safe_words_alone() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote(""), "''");
    }
}
