//! `shctx init`: print shell integration code.

use std::process::ExitCode;

use shctx_core::shell::{init_script, ShellKind};

use crate::output;

pub fn run(shell: ShellKind) -> ExitCode {
    let exe = match std::env::current_exe() {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            output::warn(format!(
                "cannot resolve own path ({e}), falling back to PATH lookup"
            ));
            "shctx".to_string()
        }
    };
    print!("{}", init_script(shell, &exe));
    ExitCode::SUCCESS
}
