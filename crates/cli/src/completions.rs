//! Dynamic tab completion for context names and context files.
//!
//! Registered through `COMPLETE=<shell> shctx`, which `shctx init` emits.

use clap_complete::engine::CompletionCandidate;
use shctx_core::config::{ConfigLoader, ResolvedConfig};
use shctx_core::context::{Context, ContextStore};
use std::ffi::OsStr;

use crate::cmd::current_session;

/// Load the resolved config, returning None if it fails.
fn load_config() -> Option<ResolvedConfig> {
    ConfigLoader::load(None).ok()
}

/// Complete context names (for `enter` and `delete`).
pub fn complete_contexts(current: &OsStr) -> Vec<CompletionCandidate> {
    let Some(cfg) = load_config() else {
        return vec![];
    };
    let store = ContextStore::new(&cfg.root);
    contexts_matching(&store, current_session().active(), current.to_str().unwrap_or(""))
}

/// Complete files inside the active context (for `edit`).
pub fn complete_context_files(current: &OsStr) -> Vec<CompletionCandidate> {
    let active = current_session().active().map(str::to_owned);
    let (Some(cfg), Some(active)) = (load_config(), active) else {
        return vec![];
    };
    match ContextStore::new(&cfg.root).open(&active) {
        Ok(ctx) => files_matching(&ctx, current.to_str().unwrap_or("")),
        Err(_) => vec![],
    }
}

fn contexts_matching(
    store: &ContextStore,
    active: Option<&str>,
    prefix: &str,
) -> Vec<CompletionCandidate> {
    let Ok(names) = store.list() else {
        return vec![];
    };
    names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .map(|name| {
            let candidate = CompletionCandidate::new(name.clone());
            if active == Some(name.as_str()) {
                candidate.help(Some("active".into()))
            } else {
                candidate
            }
        })
        .collect()
}

fn files_matching(ctx: &Context, prefix: &str) -> Vec<CompletionCandidate> {
    let mut completions = vec![];

    for entry in walkdir::WalkDir::new(ctx.dir())
        .min_depth(1)
        .max_depth(4)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .take(100)
    {
        if let Ok(rel) = entry.path().strip_prefix(ctx.dir()) {
            let rel = rel.to_string_lossy();
            if rel.starts_with(prefix) {
                completions.push(CompletionCandidate::new(rel.to_string()));
            }
        }
    }

    completions
}
