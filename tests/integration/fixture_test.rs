//! Tests against the checked-in Burp export.

use std::fs;

use burp_history::history;
use burp_history::normalize::normalize;
use burp_history::record::Protocol;
use burp_history::render::{renderer_for, CsvRenderer, HtmlRenderer};
use burp_history::{Column, CsvDelimiter, OutputFormat, RenderOptions, Renderer};

use crate::helpers::fixtures_dir;

fn fixture() -> String {
    fs::read_to_string(fixtures_dir().join("history.xml")).expect("read fixture")
}

#[test]
fn parses_every_item_in_order() {
    let records = history::parse_str(&fixture()).unwrap();

    assert_eq!(records.len(), 3);
    let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "https://shop.example.com/search?q=a,b",
            "https://api.example.com/api/login",
            "http://legacy.example.com/slow",
        ]
    );
}

#[test]
fn reads_metadata_fields() {
    let records = history::parse_str(&fixture()).unwrap();
    let login = &records[1];

    assert_eq!(login.method, "POST");
    assert_eq!(login.host.name, "api.example.com");
    assert_eq!(login.host.ip.as_deref(), Some("203.0.113.20"));
    assert_eq!(login.port, Some(443));
    assert_eq!(login.protocol, Some(Protocol::Https));
    assert_eq!(login.status, Some(401));
    assert_eq!(login.mime_type, None);
}

#[test]
fn item_without_response_has_no_status() {
    let records = history::parse_str(&fixture()).unwrap();
    let slow = &records[2];

    assert!(slow.response.is_none());
    assert_eq!(slow.status, None);
    assert_eq!(slow.protocol, Some(Protocol::Http));
    assert_eq!(slow.comment, "timed out");
}

#[test]
fn decodes_request_bodies() {
    let records = history::parse_str(&fixture()).unwrap();
    let normalized = normalize(&records[1], OutputFormat::Html);

    assert!(normalized
        .cell(Column::Request)
        .starts_with("POST /api/login HTTP/1.1\r\n"));
    assert!(normalized
        .cell(Column::Request)
        .ends_with(r#"{"user":"alice","password":"s3cret"}"#));
    assert!(normalized.decode_errors().is_empty());
}

#[test]
fn html_header_matches_column_order() {
    let records = history::parse_str(&fixture()).unwrap();
    let rows: Vec<_> = records
        .iter()
        .map(|r| normalize(r, OutputFormat::Html))
        .collect();
    let html = HtmlRenderer::default().render(&rows).unwrap().content;

    let head = html
        .split("<thead>")
        .nth(1)
        .and_then(|rest| rest.split("</thead>").next())
        .unwrap();
    let titles: Vec<&str> = head
        .split("<th>")
        .skip(1)
        .filter_map(|cell| cell.split("</th>").next())
        .collect();
    let expected: Vec<&str> = Column::ALL.iter().map(|c| c.title()).collect();
    assert_eq!(titles, expected);
    assert_eq!(html.matches("<tr>").count(), 4);
}

#[test]
fn delimiter_choice_controls_quoting_of_commas() {
    let records = history::parse_str(&fixture()).unwrap();
    let rows: Vec<_> = records
        .iter()
        .map(|r| normalize(r, OutputFormat::Csv))
        .collect();

    let comma = CsvRenderer::new(CsvDelimiter::Comma).render(&rows).unwrap().content;
    let semicolon = CsvRenderer::new(CsvDelimiter::Semicolon)
        .render(&rows)
        .unwrap()
        .content;

    assert!(comma.contains("\"search, with comma\""));
    assert!(semicolon.contains(";search, with comma"));
    assert!(!semicolon.contains("\"search, with comma\""));
}

#[test]
fn renderer_for_matches_direct_construction() {
    let records = history::parse_str(&fixture()).unwrap();
    let rows: Vec<_> = records
        .iter()
        .map(|r| normalize(r, OutputFormat::Csv))
        .collect();
    let options = RenderOptions {
        format: OutputFormat::Csv,
        csv_delimiter: CsvDelimiter::Semicolon,
        ..RenderOptions::default()
    };

    let via_tag = renderer_for(&options).render(&rows).unwrap();
    let direct = CsvRenderer::new(CsvDelimiter::Semicolon).render(&rows).unwrap();
    assert_eq!(via_tag, direct);
}
