//! Parse → normalize → render → write.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::history;
use crate::normalize::normalize_all;
use crate::render::{renderer_for, OutputFormat, RenderOptions, RenderedDocument};

/// Input of one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub render: RenderOptions,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub output: PathBuf,
    pub records: usize,
    /// Bytes written to `output`.
    pub bytes: usize,
    /// Body fields left empty because they could not be decoded.
    pub decode_errors: usize,
}

/// Report path for `input`: the same path with its extension swapped for the
/// format's (or added, when the input has none).
pub fn output_path(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

/// Converts an export into a report next to it.
///
/// The report is rendered completely in memory before anything touches the
/// filesystem, so a failed run leaves no partial file. An existing file at
/// the output path is overwritten.
pub fn run(options: &ConvertOptions) -> Result<ConvertSummary, ConvertError> {
    let input = options.input.as_path();
    let output = output_path(input, options.render.format);

    if output == input {
        return Err(ConvertError::OutputIsInput {
            path: input.to_path_buf(),
        });
    }

    let document = convert(input, &options.render)?;
    let decode_errors = document.decode_errors;
    let records = document.records;

    tracing::debug!(output = %output.display(), "writing report");
    fs::write(&output, document.rendered.content.as_bytes()).map_err(|source| {
        ConvertError::WriteOutput {
            path: output.clone(),
            source,
        }
    })?;

    Ok(ConvertSummary {
        bytes: document.rendered.content.len(),
        output,
        records,
        decode_errors,
    })
}

struct Converted {
    rendered: RenderedDocument,
    records: usize,
    decode_errors: usize,
}

fn convert(input: &Path, options: &RenderOptions) -> Result<Converted, ConvertError> {
    let bytes = fs::read(input).map_err(|source| ConvertError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    let records = history::parse(&bytes).map_err(|source| ConvertError::Parse {
        path: input.to_path_buf(),
        source,
    })?;

    let normalized = normalize_all(&records, options.format);
    let decode_errors = normalized.iter().map(|r| r.decode_errors().len()).sum();

    let renderer = renderer_for(options);
    tracing::debug!(
        records = normalized.len(),
        format = %renderer.format(),
        "rendering report"
    );
    let rendered = renderer
        .render(&normalized)
        .map_err(|source| ConvertError::Render {
            path: input.to_path_buf(),
            source,
        })?;

    Ok(Converted {
        rendered,
        records: records.len(),
        decode_errors,
    })
}
