//! Directory store: one directory per context under a root.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::context::manager::ContextError;
use crate::context::types::{Context, validate_name};
use crate::hooks::HookKind;

type Result<T> = std::result::Result<T, ContextError>;

#[derive(Debug, Clone)]
pub struct ContextStore {
    root: PathBuf,
}

impl ContextStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a context directory with empty hook placeholders.
    pub fn create(&self, name: &str) -> Result<Context> {
        validate_name(name)?;
        let dir = self.root.join(name);
        if dir.exists() {
            return Err(ContextError::AlreadyExists(name.to_string()));
        }

        fs::create_dir_all(&self.root).map_err(|e| io_err(&self.root, e))?;
        fs::create_dir(&dir).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ContextError::AlreadyExists(name.to_string()),
            _ => io_err(&dir, e),
        })?;

        let ctx = Context::new(name, dir);
        for kind in [HookKind::Enter, HookKind::Leave] {
            let path = ctx.hook_path(kind);
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map_err(|e| io_err(&path, e))?;
        }

        info!(context = name, dir = %ctx.dir().display(), "created context");
        Ok(ctx)
    }

    /// Look up an existing context.
    pub fn open(&self, name: &str) -> Result<Context> {
        validate_name(name)?;
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(ContextError::NotFound(name.to_string()));
        }
        Ok(Context::new(name, dir))
    }

    /// Remove a context directory and everything in it.
    pub fn remove(&self, name: &str) -> Result<()> {
        let ctx = self.open(name)?;
        fs::remove_dir_all(ctx.dir()).map_err(|e| io_err(ctx.dir(), e))?;
        info!(context = name, "deleted context");
        Ok(())
    }

    /// Names of all contexts, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "context root does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(io_err(&self.root, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&self.root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!(name = ?raw, "skipping non UTF-8 context directory"),
            }
        }
        names.sort();
        Ok(names)
    }
}

fn io_err(path: &Path, source: io::Error) -> ContextError {
    ContextError::Io { path: path.to_path_buf(), source }
}
