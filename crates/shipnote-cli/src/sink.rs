//! File-backed table sinks.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use shipnote_core::{NoticeError, Result, TableRequest, TableSink};

use crate::commands::OutputFormat;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the table as CSV. The whole file is rendered in memory and written
/// in one call, so a failed export leaves any existing file untouched.
pub struct CsvSink {
    path: PathBuf,
    utf8_bom: bool,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>, utf8_bom: bool) -> Self {
        Self {
            path: path.into(),
            utf8_bom,
        }
    }
}

impl TableSink for CsvSink {
    fn write_table(&mut self, request: &TableRequest) -> Result<()> {
        // CSV has no column widths
        debug!(
            "Sheet {}: width hints {:?}",
            request.sheet_name, request.column_widths
        );

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(&request.header).map_err(csv_error)?;
        for row in &request.rows {
            wtr.write_record(row).map_err(csv_error)?;
        }
        let data = wtr
            .into_inner()
            .map_err(|e| NoticeError::Export(e.to_string()))?;

        let mut content = Vec::with_capacity(data.len() + UTF8_BOM.len());
        if self.utf8_bom {
            content.extend_from_slice(UTF8_BOM);
        }
        content.extend_from_slice(&data);

        fs::write(&self.path, content)?;
        debug!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Writes the table request itself as pretty JSON.
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSink for JsonSink {
    fn write_table(&mut self, request: &TableRequest) -> Result<()> {
        let content = serde_json::to_string_pretty(request)?;
        fs::write(&self.path, content)?;
        debug!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Sink for `format` writing to `path`.
pub fn file_sink(path: PathBuf, format: OutputFormat, utf8_bom: bool) -> Box<dyn TableSink> {
    match format {
        OutputFormat::Csv => Box::new(CsvSink::new(path, utf8_bom)),
        OutputFormat::Json => Box::new(JsonSink::new(path)),
    }
}

fn csv_error(err: csv::Error) -> NoticeError {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => NoticeError::Io(e),
        kind => NoticeError::Export(format!("{:?}", kind)),
    }
}
