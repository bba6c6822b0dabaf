#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Core library for shctx: named shell contexts with enter/leave hooks and
//! isolated command history.

pub mod config;
pub mod context;
pub mod editor;
pub mod history;
pub mod hooks;
pub mod shell;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
