//! Optional TOML configuration.
//!
//! Supplies defaults for the conversion options; command-line flags always win.
//!
//! ```toml
//! [output]
//! format = "csv"
//! csv_delimiter = ";"
//! html_title = "Pentest proxy log"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::render::{CsvDelimiter, OutputFormat, RenderOptions};

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
}

/// `[output]` section. Unset keys fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub csv_delimiter: Option<CsvDelimiter>,
    pub html_title: Option<String>,
}

impl Config {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parses config text. The error is a one-line description.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e: toml::de::Error| e.message().to_string())
    }

    /// Combines command-line values with this config.
    ///
    /// Each `Some` argument overrides the file; each `None` falls back to the
    /// file and then to [`RenderOptions::default`].
    pub fn render_options(
        &self,
        format: Option<OutputFormat>,
        csv_delimiter: Option<CsvDelimiter>,
        html_title: Option<String>,
    ) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            format: format.or(self.output.format).unwrap_or(defaults.format),
            csv_delimiter: csv_delimiter
                .or(self.output.csv_delimiter)
                .unwrap_or(defaults.csv_delimiter),
            html_title: html_title
                .or_else(|| self.output.html_title.clone())
                .unwrap_or(defaults.html_title),
        }
    }
}
