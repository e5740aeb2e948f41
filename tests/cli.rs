use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with an empty home and config directory and no API key in the environment.
fn linear(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("linear").unwrap();
    cmd.env_remove("LINEAR_API_KEY")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_resource_commands() {
    let home = TempDir::new().unwrap();
    let assert = linear(&home).arg("--help").assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for command in ["issues", "projects", "teams", "cycles", "users", "labels", "init"] {
        assert!(out.contains(command), "help is missing {command}");
    }
}

#[test]
fn issues_help_lists_actions() {
    let home = TempDir::new().unwrap();
    linear(&home)
        .args(["issues", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("search"))
                .and(predicate::str::contains("edit")),
        );
}

#[test]
fn missing_api_key_exits_with_guidance() {
    let home = TempDir::new().unwrap();
    linear(&home)
        .args(["issues", "list"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::starts_with("Error: No API key provided")
                .and(predicate::str::contains("https://linear.app/settings/api")),
        );
}

#[test]
fn blank_api_key_flag_counts_as_missing() {
    let home = TempDir::new().unwrap();
    linear(&home)
        .args(["--api-key", "  ", "teams", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No API key provided"));
}

#[test]
fn invalid_format_is_rejected() {
    let home = TempDir::new().unwrap();
    linear(&home)
        .args(["--format", "xml", "issues", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'xml'"));
}

#[test]
fn out_of_range_priority_is_rejected() {
    let home = TempDir::new().unwrap();
    linear(&home)
        .args(["issues", "list", "--priority", "7"])
        .assert()
        .code(2);
}

#[test]
fn completions_need_no_configuration() {
    let home = TempDir::new().unwrap();
    linear(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linear"));
}

#[cfg(target_os = "linux")]
#[test]
fn malformed_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("linear");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "api_key = ").unwrap();

    linear(&home)
        .args(["users", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}
