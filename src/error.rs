//! Error types for the conversion pipeline.
//!
//! Library code returns these typed errors; the binary wraps them with
//! `anyhow` only at the edge.

use std::io;
use std::path::PathBuf;

/// Errors raised while reading a proxy history export.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("not a Burp Suite proxy history export: {reason}")]
    Malformed { reason: String },

    #[error("item {item}: field `{field}` {reason}")]
    SchemaViolation {
        /// 1-based position of the offending `<item>`.
        item: usize,
        field: &'static str,
        reason: String,
    },
}

impl ParseError {
    pub(crate) fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::Malformed {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn missing(item: usize, field: &'static str) -> Self {
        Self::SchemaViolation {
            item,
            field,
            reason: "is missing".to_string(),
        }
    }

    pub(crate) fn invalid(item: usize, field: &'static str, value: &str) -> Self {
        Self::SchemaViolation {
            item,
            field,
            reason: format!("has invalid value {:?}", value),
        }
    }
}

/// Errors raised while turning normalized records into a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("CSV writer failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("rendered document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("failed to format HTML report")]
    Html(#[from] std::fmt::Error),
}

/// An unsupported value for a user-facing option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {option} {value:?} (expected one of: {expected})")]
pub struct OptionError {
    pub option: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Errors loading the optional TOML configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{}: failed to read config: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{}: invalid config: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Errors from a full conversion run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{}: failed to read input: {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error("{}: failed to render report: {source}", .path.display())]
    Render { path: PathBuf, source: RenderError },

    #[error("{}: failed to write output: {source}", .path.display())]
    WriteOutput { path: PathBuf, source: io::Error },

    #[error("{}: output path would overwrite the input file", .path.display())]
    OutputIsInput { path: PathBuf },
}
