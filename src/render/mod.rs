//! Report renderers.
//!
//! Each output format implements [`Renderer`]; [`renderer_for`] picks one
//! from the format tag carried in [`RenderOptions`].

mod csv;
mod html;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{OptionError, RenderError};
use crate::normalize::NormalizedRecord;

pub use self::csv::CsvRenderer;
pub use self::html::{escape_html, HtmlRenderer, DEFAULT_TITLE};

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Self-contained HTML page with one table
    #[default]
    Html,
    /// Delimited text, one row per transaction
    Csv,
}

impl OutputFormat {
    /// File extension of the rendered report, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(OutputFormat::Html),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(OptionError {
                option: "format",
                value: s.to_string(),
                expected: "html, csv",
            }),
        }
    }
}

/// Field separator for CSV output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CsvDelimiter {
    #[default]
    Comma,
    /// Common in locales that use `,` as the decimal separator
    Semicolon,
}

impl CsvDelimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            CsvDelimiter::Comma => b',',
            CsvDelimiter::Semicolon => b';',
        }
    }

    pub fn as_char(&self) -> char {
        self.as_byte() as char
    }
}

impl fmt::Display for CsvDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for CsvDelimiter {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," => Ok(CsvDelimiter::Comma),
            ";" => Ok(CsvDelimiter::Semicolon),
            _ => Err(OptionError {
                option: "CSV delimiter",
                value: s.to_string(),
                expected: "',', ';'",
            }),
        }
    }
}

impl TryFrom<String> for CsvDelimiter {
    type Error = OptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Everything a renderer needs besides the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Only used for CSV
    pub csv_delimiter: CsvDelimiter,
    /// Only used for HTML
    pub html_title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            csv_delimiter: CsvDelimiter::default(),
            html_title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// A finished report, ready to be written to disk unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub format: OutputFormat,
    pub content: String,
}

/// Turns normalized records into a report.
///
/// Implementations must be deterministic: the same records and options
/// always produce byte-identical output.
pub trait Renderer {
    /// Format this renderer produces.
    fn format(&self) -> OutputFormat;

    /// Renders the header row followed by one row per record, in order.
    fn render(&self, records: &[NormalizedRecord]) -> Result<RenderedDocument, RenderError>;
}

/// Creates the renderer for `options.format`.
pub fn renderer_for(options: &RenderOptions) -> Box<dyn Renderer> {
    match options.format {
        OutputFormat::Html => Box::new(HtmlRenderer::new(options.html_title.clone())),
        OutputFormat::Csv => Box::new(CsvRenderer::new(options.csv_delimiter)),
    }
}
