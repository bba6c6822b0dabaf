//! User-facing messages.
//!
//! Everything here goes to stderr: when run by the shell wrapper, stdout is
//! evaluated by the shell.

use std::fmt::Display;
use std::io::{self, IsTerminal};

use crossterm::style::{StyledContent, Stylize};

fn styled(
    label: &'static str,
    style: fn(&'static str) -> StyledContent<&'static str>,
) -> String {
    if io::stderr().is_terminal() {
        style(label).to_string()
    } else {
        label.to_string()
    }
}

pub fn error(msg: impl Display) {
    eprintln!("{} {msg}", styled("error:", |s| s.red().bold()));
}

pub fn warn(msg: impl Display) {
    eprintln!("{} {msg}", styled("warning:", |s| s.yellow().bold()));
}

pub fn success(msg: impl Display) {
    eprintln!("{} {msg}", styled("shctx:", |s| s.green()));
}

pub fn hint(msg: impl Display) {
    eprintln!("{} {msg}", styled("shctx:", |s| s.dark_grey()));
}
