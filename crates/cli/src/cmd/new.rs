//! `shctx new`: create a context.

use shctx_core::config::ResolvedConfig;
use shctx_core::hooks::HookKind;

use super::{open_detached, Result};
use crate::output;

pub fn run(cfg: &ResolvedConfig, name: &str) -> Result<()> {
    let manager = open_detached(cfg);
    let ctx = manager.create(name)?;

    output::success(format!("Created context '{}'", ctx.name()));
    output::hint(format!(
        "Hooks: {} and {}",
        ctx.hook_path(HookKind::Enter).display(),
        ctx.hook_path(HookKind::Leave).display()
    ));
    Ok(())
}
