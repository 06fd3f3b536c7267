//! Integration tests for the burp-history binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

use crate::helpers::{export_xml, item_xml, temp_fixture, write_file};

fn burp_history() -> Command {
    Command::cargo_bin("burp-history").expect("binary is built")
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_exits_0_and_shows_usage() {
    burp_history()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--csv-delimiter"));
}

// ============================================================================
// Conversion Tests
// ============================================================================

#[test]
fn defaults_to_html_next_to_input() {
    let (dir, input) = temp_fixture("history.xml");

    burp_history()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 record(s)"))
        .stdout(predicate::str::contains("history.html"));

    let html = fs::read_to_string(dir.path().join("history.html")).unwrap();
    assert_eq!(html.matches("<tr>").count(), 4);
}

#[test]
fn csv_with_semicolon_delimiter() {
    let (dir, input) = temp_fixture("history.xml");

    burp_history()
        .args(["--format", "csv", "--csv-delimiter", ";"])
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(dir.path().join("history.csv")).unwrap();
    assert!(csv.starts_with("Time;URL;Hostname;"));
}

#[test]
fn quiet_suppresses_summary() {
    let (_dir, input) = temp_fixture("history.xml");

    burp_history()
        .arg("-q")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn config_file_supplies_defaults() {
    let (dir, input) = temp_fixture("history.xml");
    let config = dir.path().join("burp-history.toml");
    fs::write(&config, "[output]\nformat = \"csv\"\ncsv_delimiter = \";\"\n").unwrap();

    burp_history()
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(dir.path().join("history.csv")).unwrap();
    assert!(csv.starts_with("Time;URL;"));
    assert!(!dir.path().join("history.html").exists());
}

#[test]
fn flags_override_config_file() {
    let (dir, input) = temp_fixture("history.xml");
    let config = dir.path().join("burp-history.toml");
    fs::write(&config, "[output]\nformat = \"csv\"\n").unwrap();

    burp_history()
        .args(["--format", "html", "--config"])
        .arg(&config)
        .arg(&input)
        .assert()
        .success();

    assert!(dir.path().join("history.html").exists());
    assert!(!dir.path().join("history.csv").exists());
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn no_arguments_shows_error() {
    burp_history()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn invalid_format_is_rejected_before_running() {
    let (dir, input) = temp_fixture("history.xml");

    burp_history()
        .args(["--format", "xlsx"])
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("xlsx"));

    assert!(!dir.path().join("history.xlsx").exists());
}

#[test]
fn invalid_delimiter_is_rejected() {
    let (_dir, input) = temp_fixture("history.xml");

    burp_history()
        .args(["--format", "csv", "--csv-delimiter", "|"])
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("CSV delimiter"));
}

#[test]
fn missing_input_fails_with_file_name() {
    burp_history()
        .arg("/nonexistent/history.xml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: /nonexistent/history.xml"));
}

#[test]
fn malformed_input_fails_without_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_file(&dir, "broken.xml", "<items><item><method>GET</method>");

    burp_history()
        .args(["--format", "csv"])
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a Burp Suite proxy history export"));

    assert!(!dir.path().join("broken.csv").exists());
}

#[test]
fn missing_required_field_names_item() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut items = vec![item_xml("GET", "https://example.com/", "GET / HTTP/1.1", None)];
    items.push("  <item><url>https://example.com/x</url></item>".to_string());
    let input = write_file(&dir, "history.xml", &export_xml(&items));

    burp_history()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("item 2: field `method` is missing"));

    assert!(!dir.path().join("history.html").exists());
}

#[test]
fn undecodable_body_warns_but_succeeds() {
    let dir = tempfile::TempDir::new().unwrap();
    let xml = "<items><item><method>GET</method><url>https://example.com/</url>\
               <request base64=\"true\">***</request></item></items>";
    let input = write_file(&dir, "history.xml", xml);

    burp_history()
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("could not be decoded"));
}

#[test]
fn invalid_config_fails() {
    let (dir, input) = temp_fixture("history.xml");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[output]\ncsv_delimiter = \"|\"\n").unwrap();

    burp_history()
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config"));
}
