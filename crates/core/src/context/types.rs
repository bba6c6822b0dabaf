//! Context and session types.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::context::manager::ContextError;
use crate::hooks::HookKind;

/// File name of the per-context history log.
pub const HISTORY_FILE: &str = "history";

/// A context as laid out on disk.
///
/// ```text
/// <root>/<name>/enter
/// <root>/<name>/leave
/// <root>/<name>/history
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    name: String,
    dir: PathBuf,
}

impl Context {
    pub(crate) fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), dir: dir.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn hook_path(&self, kind: HookKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Hook script for `kind`, if present.
    pub fn hook(&self, kind: HookKind) -> Option<PathBuf> {
        let path = self.hook_path(kind);
        path.is_file().then_some(path)
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Resolve a path relative to the context directory.
    ///
    /// Absolute paths and `..` components are rejected so the result always
    /// stays inside the context.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, ContextError> {
        let rel = Path::new(relative);
        let mut normal = 0;
        for component in rel.components() {
            match component {
                Component::Normal(_) => normal += 1,
                Component::CurDir => {}
                _ => {
                    return Err(ContextError::InvalidInvocation(format!(
                        "'{relative}' must be a path inside the context"
                    )));
                }
            }
        }
        if normal == 0 {
            return Err(ContextError::InvalidInvocation("expected a file name".into()));
        }
        Ok(self.dir.join(rel))
    }
}

/// Session state: which context, if any, is active.
///
/// One session corresponds to one interactive shell. The CLI rebuilds it from
/// `$SHCTX_ACTIVE` on every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active: Option<String>,
}

impl Session {
    /// A session with nothing active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a previously published marker.
    ///
    /// An empty marker counts as no active context.
    pub fn resume(active: Option<String>) -> Self {
        Self { active: active.filter(|s| !s.is_empty()) }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.as_deref() == Some(name)
    }

    pub(crate) fn activate(&mut self, name: &str) {
        self.active = Some(name.to_string());
    }

    pub(crate) fn clear(&mut self) {
        self.active = None;
    }
}

/// Check that `name` is usable as a single directory name.
pub(crate) fn validate_name(name: &str) -> Result<(), ContextError> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == OsStr::new(name)
    );
    if single {
        Ok(())
    } else if name.is_empty() {
        Err(ContextError::InvalidInvocation("context name must not be empty".into()))
    } else {
        Err(ContextError::InvalidInvocation(format!(
            "'{name}' is not a valid context name"
        )))
    }
}
