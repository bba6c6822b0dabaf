//! `shctx enter`, `shctx leave` and `shctx reload`.
//!
//! These only make sense through the shell wrapper: every effect on the
//! calling shell is written to the directive script.

use shctx_core::config::ResolvedConfig;
use shctx_core::context::Transition;
use shctx_core::shell::ShellScript;
use tracing::debug;

use super::{open_manager, Manager, Result};
use crate::output;

/// Run `op` and publish the resulting active context, even when `op` failed
/// halfway (a leave hook failure still leaves the context).
fn with_manager<T>(
    cfg: &ResolvedConfig,
    script: &ShellScript,
    op: impl FnOnce(&mut Manager) -> Result<T>,
) -> Result<T> {
    let mut manager = open_manager(cfg, script);
    let before = manager.active().map(str::to_owned);
    let result = op(&mut manager);
    if manager.active() != before.as_deref() {
        script.set_active(manager.active());
    }
    debug!(before = ?before, after = ?manager.active(), "session updated");
    result
}

pub fn enter(cfg: &ResolvedConfig, script: &ShellScript, name: &str) -> Result<()> {
    let transition = with_manager(cfg, script, |m| Ok(m.enter(name)?))?;
    match transition {
        Transition::Entered(name) => output::success(format!("Entered context '{name}'")),
        _ => output::hint(format!("Already in context '{name}'")),
    }
    Ok(())
}

pub fn leave(cfg: &ResolvedConfig, script: &ShellScript) -> Result<()> {
    let transition = with_manager(cfg, script, |m| Ok(m.leave()?))?;
    if let Transition::Left(name) = transition {
        output::success(format!("Left context '{name}'"));
    }
    Ok(())
}

pub fn reload(cfg: &ResolvedConfig, script: &ShellScript) -> Result<()> {
    let name = with_manager(cfg, script, |m| {
        let name = m.active().map(str::to_owned);
        m.reload()?;
        Ok(name)
    })?;
    if let Some(name) = name {
        output::success(format!("Reloaded context '{name}'"));
    }
    Ok(())
}
