//! Shared fixtures and builders for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tempfile::TempDir;

/// Directory holding the checked-in Burp exports.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copies a fixture into a fresh temp dir so reports land there.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &path).expect("copy fixture");
    (dir, path)
}

/// One `<item>` with base64 bodies. `response: None` omits the element.
pub fn item_xml(method: &str, url: &str, request: &str, response: Option<&str>) -> String {
    let response = response
        .map(|body| {
            format!(
                "<status>200</status><responselength>{}</responselength><mimetype>text</mimetype>\n    <response base64=\"true\"><![CDATA[{}]]></response>",
                body.len(),
                STANDARD.encode(body)
            )
        })
        .unwrap_or_default();
    format!(
        r#"  <item>
    <time>Tue Mar 12 10:22:33 CET 2024</time>
    <url><![CDATA[{url}]]></url>
    <host ip="198.51.100.1">example.com</host>
    <port>443</port>
    <protocol>https</protocol>
    <method><![CDATA[{method}]]></method>
    <path><![CDATA[/]]></path>
    <extension>null</extension>
    <request base64="true"><![CDATA[{request}]]></request>
    {response}
    <comment></comment>
  </item>"#,
        request = STANDARD.encode(request),
    )
}

/// Wraps items in an `<items>` export document.
pub fn export_xml(items: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<items burpVersion=\"2023.10\" exportTime=\"Tue Mar 12 10:30:00 CET 2024\">\n{}\n</items>\n",
        items.join("\n")
    )
}

/// Writes `content` to `dir/name`.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    path
}
