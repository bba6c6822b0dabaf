//! `shctx delete`: remove a context and everything in it.

use shctx_core::config::ResolvedConfig;

use super::{open_detached, Result};
use crate::output;

pub fn run(cfg: &ResolvedConfig, name: &str) -> Result<()> {
    open_detached(cfg).delete(name)?;
    output::success(format!("Deleted context '{name}'"));
    Ok(())
}
