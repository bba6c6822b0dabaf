//! Integration tests for the directives printed in `--emit` mode.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use shctx_core::shell::quote;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn shctx(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("shctx"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("SHCTX_ROOT", home.join("contexts"))
        .env_remove("SHCTX_ACTIVE")
        .env_remove("VISUAL")
        .env_remove("EDITOR")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn hook(home: &Path, name: &str, kind: &str) -> String {
    quote(&home.join("contexts").join(name).join(kind).to_string_lossy())
}

#[test]
fn enter_sources_hook_then_switches_history() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();

    let out = stdout_of(shctx(tmp.path()).args(["--emit", "bash", "enter", "work"]));

    let source = format!(". {}", hook(tmp.path(), "work", "enter"));
    let histfile = format!("HISTFILE={}", hook(tmp.path(), "work", "history"));
    let source_at = out.find(&source).expect("hook sourced");
    let switch_at = out.find(&histfile).expect("history switched");
    assert!(source_at < switch_at);
    assert!(out.ends_with("export SHCTX_ACTIVE=work\n"));
}

#[test]
fn enter_without_hook_file() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();
    fs::remove_file(tmp.path().join("contexts/work/enter")).unwrap();

    let out = stdout_of(shctx(tmp.path()).args(["--emit", "zsh", "enter", "work"]));
    assert!(!out.contains(". "));
    assert!(out.contains("fc -p "));
}

#[test]
fn enter_active_context_is_noop() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();

    shctx(tmp.path())
        .env("SHCTX_ACTIVE", "work")
        .args(["--emit", "bash", "enter", "work"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Already in context 'work'"));
}

#[test]
fn enter_other_context_fails() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();
    shctx(tmp.path()).args(["new", "home"]).assert().success();

    shctx(tmp.path())
        .env("SHCTX_ACTIVE", "work")
        .args(["--emit", "bash", "enter", "home"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("already in context 'work'"));
}

#[test]
fn enter_missing_context_fails() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path())
        .args(["--emit", "bash", "enter", "nope"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn enter_requires_shell_integration() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();

    shctx(tmp.path())
        .args(["enter", "work"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("shell integration is not loaded"));
}

#[test]
fn leave_flushes_then_sources_hook() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();

    let out = stdout_of(
        shctx(tmp.path()).env("SHCTX_ACTIVE", "work").args(["--emit", "bash", "leave"]),
    );

    let flush_at = out.find("history -a\n").expect("flush");
    let leave_hook = format!(". {}", hook(tmp.path(), "work", "leave"));
    let hook_at = out.find(&leave_hook).expect("leave hook");
    assert!(flush_at < hook_at);
    assert!(out.ends_with("unset SHCTX_ACTIVE\n"));
}

#[test]
fn leave_when_inactive_is_noop() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["--emit", "bash", "leave"]).assert().success().stdout("");
}

#[test]
fn reload_runs_leave_then_enter() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();

    let out = stdout_of(
        shctx(tmp.path()).env("SHCTX_ACTIVE", "work").args(["--emit", "zsh", "reload"]),
    );

    let leave = format!(". {}", hook(tmp.path(), "work", "leave"));
    let enter = format!(". {}", hook(tmp.path(), "work", "enter"));
    assert_eq!(out.matches(&leave).count(), 1);
    assert_eq!(out.matches(&enter).count(), 1);
    assert!(out.find(&leave).unwrap() < out.find(&enter).unwrap());
    assert!(!out.contains("SHCTX_ACTIVE"));
}

#[test]
fn reload_without_active_fails() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path())
        .args(["--emit", "bash", "reload"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no context is active"));
}

#[test]
fn edit_emits_editor_invocation() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();

    let out = stdout_of(
        shctx(tmp.path())
            .env("SHCTX_ACTIVE", "work")
            .env("EDITOR", "nano -w")
            .args(["--emit", "bash", "edit", "enter"]),
    );
    assert_eq!(out, format!("nano -w {}\n", hook(tmp.path(), "work", "enter")));
}

#[test]
fn edit_requires_active_context() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path())
        .env("EDITOR", "vi")
        .args(["--emit", "bash", "edit", "enter"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no context is active"));
}

#[test]
fn edit_requires_editor() {
    let tmp = tempdir().unwrap();
    shctx(tmp.path()).args(["new", "work"]).assert().success();

    shctx(tmp.path())
        .env("SHCTX_ACTIVE", "work")
        .args(["--emit", "bash", "edit", "enter"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no editor configured"));
}

#[test]
fn process_hooks_forward_exports() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("config/shctx/config.toml");
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, "version = 1\n[hooks]\nmode = \"process\"\n").unwrap();

    shctx(tmp.path()).args(["new", "work"]).assert().success();
    fs::write(
        tmp.path().join("contexts/work/enter"),
        "echo hello-from-hook\necho KUBECONFIG=/tmp/kube >> \"$SHCTX_ENV_FILE\"\n",
    )
    .unwrap();

    let output =
        shctx(tmp.path()).args(["--emit", "bash", "enter", "work"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("export KUBECONFIG=/tmp/kube\n"));
    assert!(!stdout.contains("hello-from-hook"));
    assert!(!stdout.contains(". "));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hello-from-hook"));
}

#[test]
fn process_hook_failure_exit_code() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("config/shctx/config.toml");
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, "version = 1\n[hooks]\nmode = \"process\"\n").unwrap();

    shctx(tmp.path()).args(["new", "work"]).assert().success();
    fs::write(tmp.path().join("contexts/work/enter"), "exit 4\n").unwrap();

    shctx(tmp.path())
        .args(["--emit", "bash", "enter", "work"])
        .assert()
        .code(4)
        .stdout("")
        .stderr(predicate::str::contains("exited with status 4"));
}
