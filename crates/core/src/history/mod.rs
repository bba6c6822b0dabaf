//! Per-context command history.
//!
//! A [`HistoryStore`] is the session's view of its command history. Entering a
//! context points it at the context's `history` file, leaving flushes what the
//! session recorded and restores the previous target.

mod file;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use file::FileHistory;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write history {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait HistoryStore {
    /// Point the session at `file`, remembering the current target, and load
    /// the entries already persisted there.
    fn switch_to(&mut self, file: &Path) -> Result<(), HistoryError>;

    /// Append the entries recorded in this session to the current target.
    fn flush(&mut self) -> Result<(), HistoryError>;

    /// Return to the target that was current before the last `switch_to`.
    fn restore(&mut self) -> Result<(), HistoryError>;
}

impl<T: HistoryStore + ?Sized> HistoryStore for Box<T> {
    fn switch_to(&mut self, file: &Path) -> Result<(), HistoryError> {
        (**self).switch_to(file)
    }

    fn flush(&mut self) -> Result<(), HistoryError> {
        (**self).flush()
    }

    fn restore(&mut self) -> Result<(), HistoryError> {
        (**self).restore()
    }
}
