//! Delimited-text report in the spreadsheet dialect (CRLF, minimal quoting).

use super::{CsvDelimiter, OutputFormat, RenderedDocument, Renderer};
use crate::error::RenderError;
use crate::normalize::NormalizedRecord;
use crate::record::Column;

/// Renders a header row and one row per record.
///
/// Fields holding the delimiter, a quote, or a line break are quoted and
/// embedded quotes are doubled. Cell length limits are applied during
/// normalization, not here.
#[derive(Debug, Clone, Default)]
pub struct CsvRenderer {
    delimiter: CsvDelimiter,
}

impl CsvRenderer {
    pub fn new(delimiter: CsvDelimiter) -> Self {
        Self { delimiter }
    }
}

impl Renderer for CsvRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn render(&self, records: &[NormalizedRecord]) -> Result<RenderedDocument, RenderError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter.as_byte())
            .terminator(csv::Terminator::CRLF)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());

        writer.write_record(Column::ALL.iter().map(|c| c.title()))?;
        for record in records {
            writer.write_record(record.cells())?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;

        Ok(RenderedDocument {
            format: OutputFormat::Csv,
            content: String::from_utf8(bytes)?,
        })
    }
}
