//! HTML table report.

use std::borrow::Cow;
use std::fmt::{self, Write};

use super::{OutputFormat, RenderedDocument, Renderer};
use crate::error::RenderError;
use crate::normalize::NormalizedRecord;
use crate::record::Column;

/// Page title used when none is configured.
pub const DEFAULT_TITLE: &str = "Burp Suite proxy history";

const STYLE: &str = r#"    <style>
    table {
        border-collapse: collapse;
    }
    table, th, td {
        border: 1px solid black;
        font-family: Arial, sans-serif;
        padding: 5px;
    }
    th {
        text-align: left;
    }
    td {
        vertical-align: top;
    }
    pre {
        margin: 0;
        white-space: pre-wrap;
        word-break: break-all;
    }
    </style>
"#;

/// Renders one `<table>`: a header row, then a row per record.
///
/// Request and response cells are wrapped in `<pre>` so raw HTTP keeps its
/// line breaks. Cell values are never truncated.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl HtmlRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl Renderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, records: &[NormalizedRecord]) -> Result<RenderedDocument, RenderError> {
        let mut content = String::new();
        self.write_document(&mut content, records)?;

        Ok(RenderedDocument {
            format: OutputFormat::Html,
            content,
        })
    }
}

impl HtmlRenderer {
    fn write_document(&self, out: &mut impl Write, records: &[NormalizedRecord]) -> fmt::Result {
        out.write_str("<!DOCTYPE html>\n<html>\n    <head>\n")?;
        out.write_str("    <meta charset=\"utf-8\">\n")?;
        writeln!(out, "    <title>{}</title>", escape_html(&self.title))?;
        out.write_str(STYLE)?;
        out.write_str("    </head>\n    <body>\n")?;

        out.write_str("        <table><thead><tr>\n")?;
        for column in Column::ALL {
            writeln!(out, "<th>{}</th>", escape_html(column.title()))?;
        }
        out.write_str("</tr></thead><tbody>\n")?;

        for record in records {
            write_row(out, record)?;
        }

        out.write_str("</tbody></table>\n    </body>\n</html>\n")
    }
}

fn write_row(out: &mut impl Write, record: &NormalizedRecord) -> fmt::Result {
    out.write_str("<tr>\n")?;
    for column in Column::ALL {
        let value = escape_html(record.cell(column));
        if column.is_body() {
            writeln!(out, "<td><pre>{}</pre></td>", value)?;
        } else {
            writeln!(out, "<td>{}</td>", value)?;
        }
    }
    out.write_str("</tr>\n")
}

/// Escapes text for use inside HTML elements and quoted attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
