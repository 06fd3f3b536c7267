//! Convert Burp Suite proxy history exports into HTML or CSV reports.
//!
//! The conversion is a single linear pipeline:
//!
//! - [`history`] parses the XML export into [`Record`]s
//! - [`normalize`] decodes bodies and applies format-specific cell limits
//! - [`render`] turns the normalized rows into an HTML or CSV document
//! - [`pipeline`] ties the stages together and writes the report

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod render;

pub use config::Config;
pub use error::{ConfigError, ConvertError, OptionError, ParseError, RenderError};
pub use normalize::{normalize, DecodeError, NormalizedRecord, CSV_MAX_CELL_CHARS};
pub use pipeline::{run, ConvertOptions, ConvertSummary};
pub use record::{Column, Record};
pub use render::{CsvDelimiter, OutputFormat, RenderOptions, RenderedDocument, Renderer};
