//! CLI integration tests for the `widgetry` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. Commands run from the crate directory so
//! fixture paths resolve relative to it.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn crate_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).to_path_buf()
}

/// Helper: create a Command for the `widgetry` binary with a clean environment.
fn widgetry() -> Command {
    let mut cmd = cargo_bin_cmd!("widgetry");
    cmd.current_dir(crate_dir())
        .env_remove("WIDGETRY_CONFIG")
        .env_remove("WIDGETRY_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    widgetry()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate embeddable UI widgets"));
}

#[test]
fn version_exits_0() {
    widgetry()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("widgetry"));
}

// ──────────────────────────────────────────────
// 2. Generate / extract
// ──────────────────────────────────────────────

#[test]
fn generate_prints_resource_json() {
    let json = stdout_json(widgetry().args([
        "generate",
        "Create a contact form with name and email",
        "--user",
        "u1",
    ]));
    assert_eq!(json["mimeType"], "text/html");
    assert_eq!(json["encoding"], "text");
    let uri = json["uri"].as_str().unwrap();
    assert!(uri.starts_with("ui://ai/form/form-u1-"), "uri was {}", uri);
    let text = json["text"].as_str().unwrap();
    assert_eq!(text.matches(r#"class="form-field""#).count(), 2);
}

#[test]
fn generate_html_prints_markup_only() {
    widgetry()
        .args(["generate", "a pie chart of revenue", "--user", "u1", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<div class=\"widgetry-chart\""))
        .stdout(predicate::str::contains("conic-gradient("));
}

#[test]
fn generate_without_user_id_fails() {
    widgetry()
        .args(["generate", "a form", "--user", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user id is required"));
}

#[test]
fn generate_honours_config_namespace() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("widgetry.toml");
    fs::write(&config, "[generator]\ndescribed_namespace = \"text\"\n").unwrap();
    let json = stdout_json(
        widgetry()
            .args(["generate", "hello there", "--user", "u9"])
            .env("WIDGETRY_CONFIG", &config),
    );
    assert!(json["uri"]
        .as_str()
        .unwrap()
        .starts_with("ui://text/custom/custom-u9-"));
}

#[test]
fn bad_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("widgetry.toml");
    fs::write(&config, "[host]\nnotification_ttl_secs = \"soon\"\n").unwrap();
    widgetry()
        .args(["--config", config.to_str().unwrap(), "templates"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error parsing config"));
}

#[test]
fn extract_prints_requirements() {
    let json = stdout_json(widgetry().args([
        "extract",
        "dashboard with sales and activity, title: Weekly",
    ]));
    assert_eq!(json["type"], "dashboard");
    assert_eq!(json["title"], "Weekly");
    assert_eq!(json["widgets"][0]["title"], "Total Sales");
    assert_eq!(json["widgets"][1]["kind"], "list");
}

// ──────────────────────────────────────────────
// 3. Compile
// ──────────────────────────────────────────────

#[test]
fn compile_form_fixture() {
    let json = stdout_json(widgetry().args([
        "compile",
        "form",
        "tests/fixtures/contact_form.json",
        "--user",
        "u1",
    ]));
    assert!(json["uri"]
        .as_str()
        .unwrap()
        .starts_with("ui://dynamic/form/form-u1-"));
    let text = json["text"].as_str().unwrap();
    assert_eq!(text.matches(r#"class="form-field""#).count(), 4);
    assert!(text.contains("<textarea"));
    assert!(text.contains("Send"));
}

#[test]
fn compile_dashboard_fixture_normalizes_metric_chart() {
    widgetry()
        .args([
            "compile",
            "dashboard",
            "tests/fixtures/ops_dashboard.json",
            "--user",
            "u1",
            "--html",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(">1234</div>"))
        .stdout(predicate::str::contains("dashboard-refresh"));
}

#[test]
fn compile_chart_fixture() {
    widgetry()
        .args([
            "compile",
            "chart",
            "tests/fixtures/quarterly_chart.json",
            "--user",
            "u1",
            "--html",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("height: 100px;"))
        .stdout(predicate::str::contains("height: 200px;"));
}

#[test]
fn compile_invalid_form_reports_field() {
    widgetry()
        .args([
            "--output",
            "json",
            "compile",
            "form",
            "tests/fixtures/broken_form.json",
            "--user",
            "u1",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("\"error\""))
        .stderr(predicate::str::contains("fields[0].options"));
}

#[test]
fn compile_missing_file_fails() {
    widgetry()
        .args(["compile", "chart", "tests/fixtures/nope.json", "--user", "u1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file"));
}

#[test]
fn quiet_suppresses_errors() {
    widgetry()
        .args(["--quiet", "compile", "chart", "tests/fixtures/nope.json", "--user", "u1"])
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
}

// ──────────────────────────────────────────────
// 4. Suggestions, templates, demo
// ──────────────────────────────────────────────

#[test]
fn suggest_lists_matching_groups() {
    widgetry()
        .args(["suggest", "a form on a profile card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact form with name, email, and message fields"))
        .stdout(predicate::str::contains("User profile card with avatar and stats"));
}

#[test]
fn templates_json() {
    let json = stdout_json(widgetry().args(["--output", "json", "templates"]));
    let kinds: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["form", "dashboard", "chart", "custom"]);
}

#[test]
fn demo_resource() {
    let json = stdout_json(widgetry().arg("demo"));
    assert_eq!(json["uri"], "ui://example/interactive-demo");
    assert!(json["text"].as_str().unwrap().contains("applySettings"));
}

// ──────────────────────────────────────────────
// 5. Frame
// ──────────────────────────────────────────────

#[test]
fn frame_html_resource() {
    widgetry()
        .args(["frame", "tests/fixtures/html_resource.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"sandbox="allow-scripts""#))
        .stdout(predicate::str::contains("srcdoc=\"&lt;p class=&quot;hello&quot;&gt;"));
}

#[test]
fn frame_unsupported_resource_shows_placeholder() {
    widgetry()
        .args(["frame", "tests/fixtures/json_resource.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unsupported resource type: application/json",
        ));
}

#[test]
fn frame_strict_rejects_unsupported_resource() {
    widgetry()
        .args(["frame", "--strict", "tests/fixtures/json_resource.json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported resource type: application/json"));
}

// ──────────────────────────────────────────────
// 6. Dispatch
// ──────────────────────────────────────────────

#[test]
fn dispatch_fixture_routes_and_drops() {
    let json = stdout_json(widgetry().args(["dispatch", "tests/fixtures/messages.jsonl"]));
    assert_eq!(json["received"], 9);
    assert_eq!(json["routed"], 7);
    assert_eq!(json["dropped"], 2);

    let messages: Vec<&str> = json["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            "hello",
            r#"Form submitted: {"email":"a@example.com"}"#,
            "Dashboard refreshed: dashboard-u1-1",
            "Chart exported: chart-u1-1",
        ]
    );
    assert_eq!(json["settings"]["theme"], "dark");
    assert_eq!(json["settings"]["fontSize"], 20);
    assert_eq!(json["settings"]["animationSpeed"], "fast");
    assert_eq!(json["submissions"][0]["formId"], "form-u1-1");
}

#[test]
fn dispatch_reads_stdin() {
    let json = stdout_json(
        widgetry()
            .args(["dispatch", "-"])
            .write_stdin("{\"type\": \"notify\", \"payload\": {\"message\": \"from stdin\"}}\n"),
    );
    assert_eq!(json["routed"], 1);
    assert_eq!(json["notifications"][0]["severity"], "info");
}
