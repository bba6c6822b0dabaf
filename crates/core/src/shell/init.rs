//! `shctx init <shell>` output.

use super::{ShellKind, quote};

/// Subcommands whose output must be evaluated by the calling shell.
const EMITTING_COMMANDS: &str = "enter|leave|reload|edit";

/// Chains `shctx leave` in front of any EXIT trap already installed. A second
/// `eval` of the snippet finds its own handler and leaves the trap alone.
const BASH_EXIT_TRAP: &str = r#"__shctx_exit() { shctx leave; }
__shctx_prev_trap="$(trap -p EXIT)"
__shctx_prev_trap="${__shctx_prev_trap#trap -- }"
__shctx_prev_trap="${__shctx_prev_trap% EXIT}"
eval "__shctx_prev_trap=${__shctx_prev_trap:-''}"
case "$__shctx_prev_trap" in
    *__shctx_exit*) ;;
    '') trap '__shctx_exit' EXIT ;;
    *) trap "__shctx_exit; $__shctx_prev_trap" EXIT ;;
esac
unset __shctx_prev_trap
"#;

/// Build the integration snippet for `kind`.
///
/// `exe` is the path of the running binary; the wrapper calls it directly so
/// it keeps working when `shctx` itself is shadowed by the function.
pub fn init_script(kind: ShellKind, exe: &str) -> String {
    let exe = quote(exe);
    let shell = kind.as_str();

    let mut out = format!(
        r#"# shctx shell integration ({shell})
shctx() {{
    local __shctx_out __shctx_rc
    case "${{1-}}" in
        {EMITTING_COMMANDS})
            __shctx_out="$({exe} --emit {shell} "$@")"
            __shctx_rc=$?
            eval "$__shctx_out"
            return $__shctx_rc
            ;;
        *)
            {exe} "$@"
            ;;
    esac
}}
"#
    );

    // Leaving on exit is best-effort: it does not run when the shell is killed.
    match kind {
        ShellKind::Bash => out.push_str(BASH_EXIT_TRAP),
        ShellKind::Zsh => {
            out.push_str("autoload -Uz add-zsh-hook\n");
            out.push_str("__shctx_exit() { shctx leave; }\n");
            out.push_str("add-zsh-hook zshexit __shctx_exit\n");
        }
    }

    out.push_str(&format!("source <(COMPLETE={shell} {exe})\n"));
    out
}
