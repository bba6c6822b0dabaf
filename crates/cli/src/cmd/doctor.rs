//! `shctx doctor`: validate configuration and print resolved paths.

use std::path::Path;
use std::process::ExitCode;

use shctx_core::config::{default_config_path, ConfigLoader};
use shctx_core::context::ContextStore;

use super::current_session;

pub fn run(config_path: Option<&Path>) -> ExitCode {
    match ConfigLoader::load(config_path) {
        Ok(rc) => {
            println!("OK   shctx doctor");
            println!("version: {}", shctx_core::version());
            println!(
                "config: {}",
                rc.source
                    .as_ref()
                    .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string())
            );
            println!("root: {}", rc.root.display());
            match ContextStore::new(&rc.root).list() {
                Ok(names) => println!("contexts: {}", names.len()),
                Err(e) => println!("contexts: unreadable ({e})"),
            }
            println!(
                "editor: {}",
                rc.editor.as_ref().map_or_else(|| "(none)".to_string(), |e| e.display())
            );
            println!("hooks.mode: {}", rc.hooks.mode.as_str());
            println!("hooks.shell: {}", rc.hooks.shell);
            println!("logging.level: {}", rc.logging.level);
            println!("active: {}", current_session().active().unwrap_or("(none)"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("FAIL shctx doctor");
            println!("{e}");
            if config_path.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            ExitCode::from(1)
        }
    }
}
