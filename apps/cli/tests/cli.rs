use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `vars` with a hermetic environment rooted at `state`.
#[allow(deprecated)]
fn vars(state: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vars").unwrap();
    cmd.env_clear()
        .env("HOME", state)
        .env("XDG_STATE_HOME", state)
        .env("PATH", std::env::var_os("PATH").unwrap_or_default());
    cmd
}

#[test]
fn init_set_get_round_trip() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path())
        .args(["init", "api"])
        .assert()
        .success()
        .stdout("Initialized vars properties\n");

    vars(tmp.path()).args(["set", "api", "secret_key", "line1\nline2"]).assert().success();

    vars(tmp.path())
        .args(["get", "api", "secret_key"])
        .assert()
        .success()
        .stdout("line1\nline2\n");

    let file = tmp.path().join("api").join("vars.properties");
    assert_eq!(fs::read_to_string(file).unwrap(), "secret_key=line1\\nline2\n");
}

#[test]
fn scoped_store_lives_in_its_own_directory() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path()).args(["init", "pomo", "timer"]).assert().success();
    vars(tmp.path()).args(["set", "pomo", "timer", "default_duration", "25m"]).assert().success();

    assert!(tmp.path().join("pomo/timer/vars.properties").is_file());
    vars(tmp.path())
        .args(["get", "pomo", "timer", "default_duration"])
        .assert()
        .success()
        .stdout("25m\n");

    vars(tmp.path())
        .args(["get", "pomo", "default_duration"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("run 'init' first"));
}

#[test]
fn data_and_keys_are_sorted() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path()).args(["init", "app"]).assert().success();
    for (key, value) in [("zeta", "1"), ("alpha", "2"), ("mid", "x=y")] {
        vars(tmp.path()).args(["set", "app", key, value]).assert().success();
    }

    vars(tmp.path()).args(["data", "app"]).assert().success().stdout("alpha=2\nmid=x=y\nzeta=1\n");
    vars(tmp.path()).args(["keys", "app"]).assert().success().stdout("alpha\nmid\nzeta\n");
    vars(tmp.path()).args(["k", "app"]).assert().success().stdout("alpha\nmid\nzeta\n");
}

#[test]
fn unset_removes_key() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path()).args(["init", "app"]).assert().success();
    vars(tmp.path()).args(["set", "app", "token", "abc"]).assert().success();
    vars(tmp.path()).args(["unset", "app", "token"]).assert().success();

    vars(tmp.path())
        .args(["get", "app", "token"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("token"));
}

#[test]
fn state_root_flag_beats_environment() {
    let tmp = TempDir::new().unwrap();
    let explicit = tmp.path().join("explicit");

    vars(tmp.path())
        .arg("--state-root")
        .arg(&explicit)
        .args(["init", "api"])
        .assert()
        .success();

    assert!(explicit.join("api/vars.properties").is_file());
    assert!(!tmp.path().join("api").exists());
}

#[test]
fn state_root_from_environment_config() {
    let tmp = TempDir::new().unwrap();
    let configured = tmp.path().join("configured");

    vars(tmp.path())
        .env("VARS__STATE_ROOT", &configured)
        .args(["init", "api"])
        .assert()
        .success();

    assert!(configured.join("api/vars.properties").is_file());
}

#[test]
fn state_root_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("vars.toml");
    let configured = tmp.path().join("from-file");
    fs::write(&file, format!("state_root = {:?}\n", configured.display().to_string())).unwrap();

    vars(tmp.path()).arg("--config").arg(&file).args(["init", "api"]).assert().success();

    assert!(configured.join("api/vars.properties").is_file());
}

#[test]
fn missing_config_file_fails() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path())
        .arg("--config")
        .arg(tmp.path().join("absent.toml"))
        .args(["init", "api"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn uninitialized_store_exits_with_4() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path())
        .args(["get", "api", "token"])
        .assert()
        .code(4)
        .stdout("")
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn validation_errors_exit_with_3() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path()).args(["init", "bad/name"]).assert().code(3);
    vars(tmp.path()).args(["init", "api", "a\\b"]).assert().code(3);
    vars(tmp.path()).args(["get", "api", "one", "two", "key"]).assert().code(3);
    assert!(fs::read_dir(tmp.path()).unwrap().next().is_none());
}

#[test]
fn usage_errors_exit_with_2() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path()).args(["set", "api", "token"]).assert().code(2);
    vars(tmp.path()).args(["frobnicate"]).assert().code(2);
}

#[test]
fn quiet_and_verbose_conflict() {
    let tmp = TempDir::new().unwrap();
    vars(tmp.path()).args(["-q", "-v", "data", "api"]).assert().code(2);
}

#[cfg(unix)]
#[test]
fn edit_runs_configured_editor() {
    let tmp = TempDir::new().unwrap();

    vars(tmp.path()).args(["init", "api"]).assert().success();
    vars(tmp.path()).env("EDITOR", "test -f").args(["edit", "api"]).assert().success();
    vars(tmp.path()).env("VISUAL", "false").args(["edit", "api"]).assert().code(7);
}

#[test]
fn edit_before_init_exits_with_4() {
    let tmp = TempDir::new().unwrap();
    vars(tmp.path()).env("EDITOR", "true").args(["edit", "api"]).assert().code(4);
}
