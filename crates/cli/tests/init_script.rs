use assert_cmd::prelude::*;
use predicates::prelude::*;
use shctx_core::shell::quote;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[test]
fn init_bash_prints_wrapper() {
    Command::new(assert_cmd::cargo::cargo_bin!("shctx"))
        .args(["init", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shctx() {"))
        .stdout(predicate::str::contains("--emit bash"))
        .stdout(predicate::str::contains("__shctx_exit() { shctx leave; }"));
}

#[test]
fn init_zsh_registers_exit_hook() {
    Command::new(assert_cmd::cargo::cargo_bin!("shctx"))
        .args(["init", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add-zsh-hook zshexit"));
}

#[test]
fn init_unknown_shell_fails() {
    Command::new(assert_cmd::cargo::cargo_bin!("shctx"))
        .args(["init", "fish"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported shell"));
}

#[test]
fn init_ignores_broken_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("shctx")).unwrap();
    std::fs::write(tmp.path().join("shctx/config.toml"), "version = [").unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("shctx"))
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["init", "bash"])
        .assert()
        .success();
}

/// Write the bash integration for the built binary to `<home>/init.bash`.
fn write_bash_init(home: &Path) -> PathBuf {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("shctx"))
        .args(["init", "bash"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let path = home.join("init.bash");
    fs::write(&path, output.stdout).unwrap();
    path
}

fn bash(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new("bash");
    cmd.args(["--norc", "--noprofile"])
        .env("HOME", home)
        .env("HISTFILE", home.join("default_history"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("SHCTX_ROOT", home.join("contexts"))
        .env_remove("SHCTX_ACTIVE")
        .env_remove("SHCTX_PREV_HISTFILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn bash_init_keeps_existing_exit_trap() {
    let tmp = tempfile::tempdir().unwrap();
    let init = write_bash_init(tmp.path());

    let script = format!(
        "trap 'echo user-trap-ran' EXIT\n. {init}\n. {init}\ntrap -p EXIT\n",
        init = quote(&init.to_string_lossy())
    );
    bash(tmp.path())
        .args(["-c", &script])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "trap -- '__shctx_exit; echo user-trap-ran' EXIT",
        ))
        .stdout(predicate::str::contains("__shctx_exit; __shctx_exit").not())
        .stdout(predicate::str::ends_with("user-trap-ran\n"));
}

#[test]
fn bash_exit_leaves_active_context() {
    let tmp = tempfile::tempdir().unwrap();
    let init = write_bash_init(tmp.path());
    let root = tmp.path().join("contexts");
    fs::create_dir_all(root.join("work")).unwrap();
    fs::write(root.join("work/leave"), "echo left-on-exit\n").unwrap();

    let script =
        format!(". {}\nshctx enter work\nexit 0\n", quote(&init.to_string_lossy()));
    bash(tmp.path())
        .args(["-c", &script])
        .assert()
        .success()
        .stdout(predicate::str::contains("left-on-exit"));
}

#[test]
fn bash_history_persists_across_enter_and_leave() {
    let tmp = tempfile::tempdir().unwrap();
    let init = write_bash_init(tmp.path());
    let root = tmp.path().join("contexts");
    fs::create_dir_all(root.join("work")).unwrap();

    // Commands must be read interactively to land in the history list.
    let session = format!(
        ". {}\nshctx enter work\necho only-in-work\nshctx leave\n\
         shctx enter work\nhistory\nshctx leave\nexit\n",
        quote(&init.to_string_lossy())
    );
    bash(tmp.path()).arg("-i").write_stdin(session).assert().success();

    let saved = fs::read_to_string(root.join("work/history")).unwrap();
    assert!(saved.contains("echo only-in-work\n"), "history file: {saved:?}");

    let outside =
        fs::read_to_string(tmp.path().join("default_history")).unwrap_or_default();
    assert!(!outside.contains("only-in-work"), "leaked outside: {outside:?}");
}
