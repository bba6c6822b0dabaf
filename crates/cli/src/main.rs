mod cmd;
mod completions;
mod logging;
mod output;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::engine::ArgValueCompleter;
use clap_complete::CompleteEnv;
use shctx_core::config::ConfigLoader;
use shctx_core::shell::{ShellKind, ShellScript};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "shctx",
    version,
    about = "Named shell contexts with enter/leave hooks and isolated history"
)]
pub struct Cli {
    /// Config file (default: ~/.config/shctx/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print shell directives on stdout for the wrapper installed by `shctx init`
    #[arg(long, global = true, value_name = "SHELL", hide = true)]
    emit: Option<ShellKind>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new context
    New {
        /// Context name
        name: String,
    },

    /// Delete a context with its hooks and history
    Delete {
        /// Context name
        #[arg(add = ArgValueCompleter::new(completions::complete_contexts))]
        name: String,
    },

    /// Activate a context in the current shell
    Enter {
        /// Context name
        #[arg(add = ArgValueCompleter::new(completions::complete_contexts))]
        name: String,
    },

    /// Deactivate the current context
    Leave,

    /// Open a file of the active context in the editor (e.g. `enter`)
    Edit {
        /// Path relative to the context directory
        #[arg(add = ArgValueCompleter::new(completions::complete_context_files))]
        path: String,
    },

    /// Leave and re-enter the active context
    Reload,

    /// List contexts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the active context
    Current {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print shell integration code (eval it from your shell rc)
    Init {
        /// Target shell
        shell: ShellKind,
    },

    /// Validate configuration and print resolved paths
    Doctor,
}

fn main() -> ExitCode {
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_failure(e),
    };

    let Some(command) = cli.command else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    // These two must work even with a broken config.
    match command {
        Commands::Init { shell } => return cmd::init::run(shell),
        Commands::Doctor => return cmd::doctor::run(cli.config.as_deref()),
        _ => {}
    }

    let cfg = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            output::error(format!("configuration error: {e}"));
            return ExitCode::from(1);
        }
    };
    let _log_guard = logging::init(&cfg);

    let script = cli.emit.map(ShellScript::new);
    let result = cmd::dispatch(command, &cfg, script.as_ref());

    // Directives are printed even on failure so a partial transition (e.g. a
    // leave whose hook failed) still reaches the shell.
    if let Some(script) = &script {
        print!("{}", script.render());
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn print_usage() {
    let mut command = Cli::command();
    eprintln!("{}", command.render_help());
}

fn parse_failure(e: clap::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            // Help goes to stderr so the shell wrapper never evaluates it.
            eprint!("{}", e.render());
            ExitCode::SUCCESS
        }
        ErrorKind::InvalidSubcommand => {
            output::error(cmd::CliError::UnknownCommand(invalid_value(&e)));
            print_usage();
            ExitCode::from(1)
        }
        _ => {
            output::error(cmd::CliError::InvalidInvocation(first_line(&e)));
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn invalid_value(e: &clap::Error) -> String {
    use clap::error::{ContextKind, ContextValue};
    match e.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(s)) => s.clone(),
        _ => first_line(e),
    }
}

fn first_line(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.trim_start_matches("error: ").to_string()
}
