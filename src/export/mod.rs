//! CSV export of a view's filtered rows.
//!
//! The default [`CsvDialect::Legacy`] reproduces the console's historical
//! output byte for byte: header labels joined by commas, `\n` between lines,
//! no trailing newline, text columns flagged [`QuotePolicy::Always`] wrapped
//! in quotes, and any other field wrapped only when it contains a comma.
//! Embedded `"` characters are NOT escaped in this dialect, so a name such as
//! `Ann "Jo" Lee` yields a row that strict CSV readers reject. Callers that
//! need strictly valid output opt into [`CsvDialect::Rfc4180`].

/// Booking and customer column layouts.
pub mod columns;

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::info;

use crate::engine::traits::ListEntity;

/// Field delimiter of every dialect.
pub const DELIMITER: char = ',';

/// When a column's values are wrapped in quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotePolicy {
    /// Always quoted.
    Always,
    /// Quoted only when the value contains the delimiter.
    IfNeeded,
}

/// Output flavour of the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvDialect {
    /// Historical output, no quote escaping.
    #[default]
    Legacy,
    /// Strict RFC 4180 via the `csv` crate; quotes only where necessary and
    /// doubles embedded quotes. Ignores per-column [`QuotePolicy`].
    Rfc4180,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output was not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("csv writer could not be finalized: {0}")]
    Finish(String),
}

/// One exported column.
pub struct ColumnSpec<E> {
    /// Header label, written verbatim.
    pub label: &'static str,
    /// Quoting rule in the legacy dialect.
    pub quote: QuotePolicy,
    /// Renders the cell for a record.
    pub value: fn(&E) -> String,
}

impl<E> ColumnSpec<E> {
    /// Column quoted only when needed.
    pub fn plain(label: &'static str, value: fn(&E) -> String) -> Self {
        Self {
            label,
            quote: QuotePolicy::IfNeeded,
            value,
        }
    }

    /// Column that is always quoted.
    pub fn quoted(label: &'static str, value: fn(&E) -> String) -> Self {
        Self {
            label,
            quote: QuotePolicy::Always,
            value,
        }
    }
}

impl<E> Clone for ColumnSpec<E> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            quote: self.quote,
            value: self.value,
        }
    }
}

/// Legacy-dialect CSV text for `records`.
pub fn to_csv<E>(records: &[E], columns: &[ColumnSpec<E>]) -> String {
    let header = columns
        .iter()
        .map(|c| c.label)
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header);
    for rec in records {
        let row = columns
            .iter()
            .map(|c| legacy_cell((c.value)(rec), c.quote))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }
    lines.join("\n")
}

/// CSV text for `records` in the requested dialect.
pub fn render<E>(
    records: &[E],
    columns: &[ColumnSpec<E>],
    dialect: CsvDialect,
) -> Result<String, ExportError> {
    match dialect {
        CsvDialect::Legacy => Ok(to_csv(records, columns)),
        CsvDialect::Rfc4180 => to_csv_rfc4180(records, columns),
    }
}

/// Writes the entity's export file into `dir` and returns its path.
pub fn write_export<E: ListEntity>(
    dir: impl AsRef<Path>,
    records: &[E],
    dialect: CsvDialect,
) -> Result<PathBuf, ExportError> {
    let text = render(records, &E::export_columns(), dialect)?;
    let path = dir.as_ref().join(E::EXPORT_FILE_NAME);
    fs::write(&path, text)?;
    info!(path = %path.display(), rows = records.len(), "exported csv");
    Ok(path)
}

fn legacy_cell(value: String, quote: QuotePolicy) -> String {
    let wrap = match quote {
        QuotePolicy::Always => true,
        QuotePolicy::IfNeeded => value.contains(DELIMITER),
    };
    if wrap { format!("\"{value}\"") } else { value }
}

fn to_csv_rfc4180<E>(records: &[E], columns: &[ColumnSpec<E>]) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b',')
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(columns.iter().map(|c| c.label))?;
    for rec in records {
        wtr.write_record(columns.iter().map(|c| (c.value)(rec)))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Finish(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
