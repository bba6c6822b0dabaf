use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{HistoryError, HistoryStore};

/// In-process history backed by line-oriented files.
///
/// `entries` holds everything visible in the session; the first `persisted`
/// of them are already on disk, the rest are flushed by appending.
#[derive(Debug, Default)]
pub struct FileHistory {
    target: Option<PathBuf>,
    previous: Option<PathBuf>,
    entries: Vec<String>,
    persisted: usize,
}

impl FileHistory {
    /// History with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// History backed by `file` from the start (the pre-context default).
    pub fn with_target(file: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let mut h = Self::new();
        h.load(Some(file.into()))?;
        Ok(h)
    }

    /// Record a command run in this session.
    pub fn record(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !line.trim().is_empty() {
            self.entries.push(line);
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    fn load(&mut self, target: Option<PathBuf>) -> Result<(), HistoryError> {
        let entries = match &target {
            Some(path) => read_lines(path)?,
            None => Vec::new(),
        };
        self.persisted = entries.len();
        self.entries = entries;
        self.target = target;
        Ok(())
    }
}

impl HistoryStore for FileHistory {
    fn switch_to(&mut self, file: &Path) -> Result<(), HistoryError> {
        // Keep what was typed before the switch.
        self.flush()?;
        self.previous = self.target.take();
        self.load(Some(file.to_path_buf()))
    }

    fn flush(&mut self) -> Result<(), HistoryError> {
        let Some(path) = &self.target else {
            return Ok(());
        };
        let pending = &self.entries[self.persisted..];
        if pending.is_empty() {
            return Ok(());
        }

        debug!(path = %path.display(), count = pending.len(), "flushing history");

        let write_err = |source| HistoryError::Write { path: path.clone(), source };
        let mut f =
            OpenOptions::new().create(true).append(true).open(path).map_err(write_err)?;
        let mut buf = String::new();
        for line in pending {
            buf.push_str(line);
            buf.push('\n');
        }
        f.write_all(buf.as_bytes()).map_err(write_err)?;

        self.persisted = self.entries.len();
        Ok(())
    }

    fn restore(&mut self) -> Result<(), HistoryError> {
        let previous = self.previous.take();
        self.load(previous)
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, HistoryError> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(s.lines().filter(|l| !l.is_empty()).map(str::to_owned).collect()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(HistoryError::Read { path: path.to_path_buf(), source }),
    }
}
