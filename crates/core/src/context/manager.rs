//! Context manager: CRUD plus the enter/leave state machine.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::context::store::ContextStore;
use crate::context::types::{Context, Session};
use crate::editor::{EditRequest, EditorCommand};
use crate::history::{HistoryError, HistoryStore};
use crate::hooks::{HookError, HookInvocation, HookKind, HookRunner};

/// Error type for context operations.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("context '{0}' already exists")]
    AlreadyExists(String),

    #[error("context '{0}' does not exist")]
    NotFound(String),

    #[error("already in context '{active}', leave it before entering '{requested}'")]
    AlreadyInContext { active: String, requested: String },

    #[error("context '{0}' is active, leave it before deleting")]
    ActiveContext(String),

    #[error("no context is active")]
    NoActiveContext,

    #[error("no editor configured (set `editor` in the config, $VISUAL or $EDITOR)")]
    NoEditorConfigured,

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Hook(#[from] HookError),
}

type Result<T> = std::result::Result<T, ContextError>;

/// What a transition did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Entered(String),
    Left(String),
    Unchanged,
}

/// Manages named contexts and the session's active context.
///
/// The hook runner and history store are the only places side effects on the
/// interactive shell happen; the manager only decides their order:
///
/// - enter: enter hook, then history switch, then mark active
/// - leave: history flush, then leave hook, then history restore, then clear
#[derive(Debug)]
pub struct ContextManager<H, S> {
    store: ContextStore,
    session: Session,
    hooks: H,
    history: S,
}

impl<H: HookRunner, S: HistoryStore> ContextManager<H, S> {
    pub fn new(store: ContextStore, session: Session, hooks: H, history: S) -> Self {
        Self { store, session, hooks, history }
    }

    /// Name of the active context, if any.
    pub fn active(&self) -> Option<&str> {
        self.session.active()
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn history(&self) -> &S {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut S {
        &mut self.history
    }

    /// Create a context with empty hook placeholders.
    pub fn create(&self, name: &str) -> Result<Context> {
        self.store.create(name)
    }

    /// Delete a context and everything stored in it.
    ///
    /// Deleting the active context is refused and leaves it untouched.
    pub fn delete(&self, name: &str) -> Result<()> {
        if self.session.is_active(name) {
            return Err(ContextError::ActiveContext(name.to_string()));
        }
        self.store.remove(name)
    }

    pub fn list(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    /// Activate `name`.
    ///
    /// Entering the active context again is a no-op. A failing enter hook
    /// aborts the transition and is returned untranslated.
    pub fn enter(&mut self, name: &str) -> Result<Transition> {
        if let Some(active) = self.session.active() {
            if active == name {
                debug!(context = name, "already active");
                return Ok(Transition::Unchanged);
            }
            return Err(ContextError::AlreadyInContext {
                active: active.to_string(),
                requested: name.to_string(),
            });
        }

        let ctx = self.store.open(name)?;

        // The hook still sees the history of whatever was current before.
        if let Some(script) = ctx.hook(HookKind::Enter) {
            self.hooks.run(&HookInvocation {
                context: name,
                kind: HookKind::Enter,
                script: &script,
            })?;
        }

        self.history.switch_to(&ctx.history_path())?;
        self.session.activate(name);

        info!(context = name, "entered context");
        Ok(Transition::Entered(name.to_string()))
    }

    /// Deactivate the active context, if any.
    ///
    /// History is persisted before the leave hook runs. A failing leave hook
    /// does not keep the context active; its error is returned after the
    /// session has been cleared.
    pub fn leave(&mut self) -> Result<Transition> {
        let Some(name) = self.session.active().map(str::to_owned) else {
            debug!("no active context to leave");
            return Ok(Transition::Unchanged);
        };

        self.history.flush()?;

        // The directory may have been removed behind our back; leaving must
        // still work then.
        let hook_result = match self.store.open(&name) {
            Ok(ctx) => match ctx.hook(HookKind::Leave) {
                Some(script) => self.hooks.run(&HookInvocation {
                    context: &name,
                    kind: HookKind::Leave,
                    script: &script,
                }),
                None => Ok(()),
            },
            Err(e) => {
                warn!(
                    context = %name,
                    error = %e,
                    "active context is gone, skipping leave hook"
                );
                Ok(())
            }
        };

        self.history.restore()?;
        self.session.clear();
        info!(context = %name, "left context");

        hook_result?;
        Ok(Transition::Left(name))
    }

    /// Leave and re-enter the active context.
    ///
    /// Runs the leave hook once, then the enter hook once.
    pub fn reload(&mut self) -> Result<()> {
        let name = self
            .session
            .active()
            .map(str::to_owned)
            .ok_or(ContextError::NoActiveContext)?;
        self.leave()?;
        self.enter(&name)?;
        Ok(())
    }

    /// Prepare an editor invocation for a file of the active context.
    ///
    /// The file does not have to exist yet.
    pub fn edit(
        &self,
        relative: &str,
        editor: Option<&EditorCommand>,
    ) -> Result<EditRequest> {
        let active = self.session.active().ok_or(ContextError::NoActiveContext)?;
        let editor = editor.ok_or(ContextError::NoEditorConfigured)?;
        let ctx = self.store.open(active)?;
        let path = ctx.resolve(relative)?;
        Ok(EditRequest::new(editor.clone(), path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::FileHistory;
    use std::path::Path;
    use tempfile::tempdir;

    #[derive(Debug, Default)]
    struct NoHooks;

    impl HookRunner for NoHooks {
        fn run(&mut self, _: &HookInvocation<'_>) -> std::result::Result<(), HookError> {
            Ok(())
        }
    }

    fn manager(root: &Path) -> ContextManager<NoHooks, FileHistory> {
        ContextManager::new(
            ContextStore::new(root),
            Session::new(),
            NoHooks,
            FileHistory::new(),
        )
    }

    #[test]
    fn test_enter_twice_is_noop() {
        let tmp = tempdir().unwrap();
        let mut m = manager(tmp.path());
        m.create("work").unwrap();

        assert_eq!(m.enter("work").unwrap(), Transition::Entered("work".into()));
        assert_eq!(m.enter("work").unwrap(), Transition::Unchanged);
        assert_eq!(m.active(), Some("work"));
    }

    #[test]
    fn test_leave_when_inactive() {
        let tmp = tempdir().unwrap();
        let mut m = manager(tmp.path());
        assert_eq!(m.leave().unwrap(), Transition::Unchanged);
        assert_eq!(m.active(), None);
    }

    #[test]
    fn test_leave_after_directory_removed() {
        let tmp = tempdir().unwrap();
        let mut m = manager(tmp.path());
        let ctx = m.create("work").unwrap();
        m.enter("work").unwrap();
        std::fs::remove_dir_all(ctx.dir()).unwrap();

        // Flushing recreates nothing because the session recorded nothing.
        assert_eq!(m.leave().unwrap(), Transition::Left("work".into()));
        assert_eq!(m.active(), None);
    }

    #[test]
    fn test_edit_requires_active_then_editor() {
        let tmp = tempdir().unwrap();
        let mut m = manager(tmp.path());
        m.create("work").unwrap();
        let editor = EditorCommand::parse("vi").unwrap();

        assert!(matches!(
            m.edit("enter", Some(&editor)),
            Err(ContextError::NoActiveContext)
        ));

        m.enter("work").unwrap();
        assert!(matches!(m.edit("enter", None), Err(ContextError::NoEditorConfigured)));

        let req = m.edit("enter", Some(&editor)).unwrap();
        assert_eq!(req.path(), tmp.path().join("work").join("enter"));
    }
}
