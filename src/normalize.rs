//! Turns parsed records into renderer-ready text.
//!
//! Body payloads are decoded, converted to text, and, for CSV output, every
//! cell is held to the spreadsheet cell limit.

use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::record::{BodyEncoding, BoundedText, Column, EncodedBody, Record};
use crate::render::OutputFormat;

/// Largest cell a spreadsheet application accepts without mangling it.
pub const CSV_MAX_CELL_CHARS: usize = 32_760;

/// Appended to cells cut at [`CSV_MAX_CELL_CHARS`].
pub const TRUNCATION_MARKER: &str = "..[TRUNCATED!]";

/// A body payload that could not be decoded.
///
/// The affected cell is left empty; the record still renders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} body could not be decoded: {reason}", .column.title())]
pub struct DecodeError {
    pub column: Column,
    pub reason: String,
}

/// A record with every column converted to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    cells: Vec<String>,
    decode_errors: Vec<DecodeError>,
}

impl NormalizedRecord {
    /// Cells in [`Column::ALL`] order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }

    pub fn decode_errors(&self) -> &[DecodeError] {
        &self.decode_errors
    }
}

/// Normalizes one record for the given output format.
pub fn normalize(record: &Record, format: OutputFormat) -> NormalizedRecord {
    let mut decode_errors = Vec::new();

    let cells = Column::ALL
        .iter()
        .map(|&column| {
            let text = match record.column_text(column) {
                Some(text) => text.into_owned(),
                None => match record.body(column).map(decode_body) {
                    Some(Ok(text)) => text,
                    Some(Err(reason)) => {
                        tracing::warn!(
                            url = %record.url,
                            column = column.title(),
                            reason = reason.as_str(),
                            "body could not be decoded, leaving cell empty"
                        );
                        decode_errors.push(DecodeError { column, reason });
                        String::new()
                    }
                    None => String::new(),
                },
            };

            match format {
                OutputFormat::Csv => limit_cell(text, CSV_MAX_CELL_CHARS),
                OutputFormat::Html => text,
            }
        })
        .collect();

    NormalizedRecord {
        cells,
        decode_errors,
    }
}

/// Normalizes a whole sequence, keeping order.
pub fn normalize_all(records: &[Record], format: OutputFormat) -> Vec<NormalizedRecord> {
    records.iter().map(|r| normalize(r, format)).collect()
}

/// Decodes a body to text. Invalid UTF-8 is replaced, never rejected.
fn decode_body(body: &EncodedBody) -> Result<String, String> {
    match body.encoding {
        BodyEncoding::Plain => Ok(body.text.clone()),
        BodyEncoding::Base64 => {
            let compact: String = body
                .text
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let bytes = STANDARD.decode(compact).map_err(|e| e.to_string())?;
            Ok(bytes_to_text(bytes))
        }
    }
}

fn bytes_to_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Cuts `text` to exactly `max_chars` characters, ending with the marker.
fn limit_cell(text: String, max_chars: usize) -> String {
    if matches!(text.bounded(max_chars), Cow::Borrowed(_)) {
        return text;
    }
    let keep = max_chars.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut cut = text.bounded(keep).into_owned();
    cut.push_str(TRUNCATION_MARKER);
    cut
}
