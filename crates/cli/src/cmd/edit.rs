//! `shctx edit`: open a file of the active context in the editor.

use shctx_core::config::ResolvedConfig;
use shctx_core::shell::ShellScript;
use tracing::{debug, warn};

use super::{open_detached, open_manager, Result};

pub fn run(cfg: &ResolvedConfig, script: Option<&ShellScript>, path: &str) -> Result<()> {
    let manager = match script {
        Some(script) => open_manager(cfg, script),
        None => open_detached(cfg),
    };
    let request = manager.edit(path, cfg.editor.as_ref())?;
    debug!(
        path = %request.path().display(),
        editor = %request.editor.display(),
        "editing"
    );

    match script {
        // The wrapper captures our stdout, so let the shell run the editor.
        Some(script) => script.edit(&request),
        None => {
            let status = request.spawn()?;
            if !status.success() {
                warn!(%status, "editor exited unsuccessfully");
            }
        }
    }
    Ok(())
}
