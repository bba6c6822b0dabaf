//! `shctx list` and `shctx current`.

use std::io::{self, IsTerminal};

use crossterm::style::Stylize;
use serde::Serialize;
use shctx_core::config::ResolvedConfig;

use super::{current_session, open_detached, Result};

#[derive(Debug, Serialize)]
struct ContextOutput {
    name: String,
    active: bool,
}

#[derive(Debug, Serialize)]
struct CurrentOutput<'a> {
    active: Option<&'a str>,
}

pub fn run(cfg: &ResolvedConfig, json: bool) -> Result<()> {
    let manager = open_detached(cfg);
    let names = manager.list()?;
    let active = manager.active();

    if json {
        let items: Vec<ContextOutput> = names
            .iter()
            .map(|n| ContextOutput {
                name: n.clone(),
                active: active == Some(n.as_str()),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let color = io::stdout().is_terminal();
    for name in &names {
        if color && active == Some(name.as_str()) {
            println!("{}", name.clone().green().bold());
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

pub fn current(json: bool) -> Result<()> {
    let session = current_session();

    if json {
        let out = CurrentOutput { active: session.active() };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match session.active() {
        Some(name) => println!("{name}"),
        None => eprintln!("No active context."),
    }
    Ok(())
}
