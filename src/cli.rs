//! Command-line definition.
//!
//! Lives in the library so `xtask` can render the man page from it.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::render::{CsvDelimiter, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "burp-history")]
#[command(about = "Convert Burp Suite proxy history exports to HTML or CSV reports")]
#[command(
    long_about = "Convert a Burp Suite proxy history export (Proxy > HTTP history > Save items) \
into an HTML table or a CSV file.\n\n\
The report is written next to the input with its extension replaced by .html or .csv, \
overwriting any existing file. CSV cells are limited to 32,760 characters for spreadsheet \
compatibility; HTML cells are never truncated."
)]
#[command(version)]
pub struct Cli {
    /// Burp Suite proxy history file (XML)
    pub file: PathBuf,

    /// Output format [default: html]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// CSV delimiter, ',' or ';' [default: ,]
    #[arg(short = 'd', long, value_name = "DELIMITER")]
    pub csv_delimiter: Option<CsvDelimiter>,

    /// Title of the HTML page
    #[arg(long)]
    pub title: Option<String>,

    /// TOML file with default options
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Log level implied by `-v`/`-q`.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
