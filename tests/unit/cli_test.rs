//! Tests for the htcap CLI

use std::fs;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::StaticServer;

/// Nothing listens on the discard port
const UNREACHABLE_URL: &str = "http://127.0.0.1:9/htcap";

fn htcap() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("htcap"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn htcap_in(temp: &TempDir, base_url: &str) -> assert_cmd::Command {
    let mut cmd = htcap();
    cmd.current_dir(temp.path())
        .arg("--base-dir")
        .arg(temp.path().join("www"))
        .args(["--base-url", base_url]);
    cmd
}

#[test]
fn test_version() {
    htcap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("htcap"));
}

#[test]
fn test_help() {
    htcap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(".htaccess"));
}

#[test]
fn test_no_args_shows_info() {
    htcap().assert().success().stdout(predicate::str::contains("htcap v"));
}

#[test]
fn test_list_shows_allowed_names() {
    htcap()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("canRewrite"))
        .stdout(predicate::str::contains("moduleLoaded(<name>)"))
        .stdout(predicate::str::contains("canPassEnvThroughRewrite"));
}

#[test]
fn test_list_json() {
    let output = htcap().args(["--json", "list"]).output().unwrap();
    assert!(output.status.success());
    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names.len(), 11);
}

#[test]
fn test_probe_unreachable_server_is_unknown() {
    let temp = TempDir::new().unwrap();

    htcap_in(&temp, UNREACHABLE_URL)
        .args(["probe", "canRewrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("canRewrite"))
        .stdout(predicate::str::contains("unknown"));

    assert!(temp.path().join("www/rewrite/.htaccess").exists());
}

#[test]
fn test_probe_json_status_is_null() {
    let temp = TempDir::new().unwrap();

    let output = htcap_in(&temp, UNREACHABLE_URL)
        .args(["--json", "probe", "moduleLoaded(rewrite)"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "moduleLoaded(rewrite)");
    assert!(json["status"].is_null());
    assert!(json["info"].as_str().unwrap().contains("request failed"));
}

#[test]
fn test_probe_unsupported_name_fails() {
    let temp = TempDir::new().unwrap();

    htcap_in(&temp, UNREACHABLE_URL)
        .args(["probe", "canTeleport"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported method"));

    assert!(!temp.path().join("www").exists());
}

#[test]
fn test_probe_without_base_url_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("htcap.toml");
    fs::write(&config, "base_dir = \"www\"\n").unwrap();

    htcap()
        .current_dir(temp.path())
        .args(["probe", "canRewrite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base URL"));
}

#[test]
fn test_config_file_supplies_target() {
    let server = StaticServer::start();
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("probe.toml");
    fs::write(
        &config,
        format!(
            "base_dir = {:?}\nbase_url = {:?}\n",
            server.dir().display().to_string(),
            server.url()
        ),
    )
    .unwrap();

    let output = htcap()
        .current_dir(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["--json", "probe", "canRewrite"])
        .output()
        .unwrap();
    assert!(output.status.success());

    // A plain file server ignores .htaccess, so 0.txt comes back unchanged
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], false);
}

#[test]
fn test_crash_command_stages_rules() {
    let temp = TempDir::new().unwrap();
    let rules = temp.path().join("rules.htaccess");
    fs::write(&rules, "Options -Indexes\n").unwrap();

    htcap_in(&temp, UNREACHABLE_URL)
        .arg("crash")
        .arg(&rules)
        .args(["--subdir", "mine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crashTest"));

    let staged = fs::read_to_string(temp.path().join("www/crash-tests/mine/.htaccess")).unwrap();
    assert_eq!(staged, "Options -Indexes\n");
}

#[test]
fn test_custom_command_reads_json() {
    let server = StaticServer::start();
    let temp = TempDir::new().unwrap();
    let definition = temp.path().join("hello.json");
    fs::write(
        &definition,
        r#"{
            "subdir": "hello",
            "files": [{ "path": "hello.txt", "content": "hello" }],
            "request": "hello.txt",
            "interpretation": [
                { "outcome": "success", "condition": { "test": "body-equals", "value": "hello" } }
            ]
        }"#,
    )
    .unwrap();

    let output = htcap()
        .current_dir(temp.path())
        .arg("--base-dir")
        .arg(server.dir())
        .args(["--base-url", server.url(), "--json", "custom"])
        .arg(&definition)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "customTest(hello)");
    assert_eq!(json["status"], true);
}

#[test]
fn test_report_json_covers_every_probe() {
    let server = StaticServer::start();
    let temp = TempDir::new().unwrap();

    let output = htcap()
        .current_dir(temp.path())
        .arg("--base-dir")
        .arg(server.dir())
        .args(["--base-url", server.url(), "--json", "report"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = json["results"].as_array().unwrap();
    // Ten fixed probes plus the three default modules
    assert_eq!(results.len(), 13);
    assert_eq!(json["base_url"], server.url());
}
