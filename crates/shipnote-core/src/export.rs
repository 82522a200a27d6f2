//! Hand-off to the spreadsheet writer and the status reported to the user.

use std::fmt;

use tracing::{error, info, warn};

use crate::error::{NoticeError, Result};
use crate::models::config::ExportConfig;
use crate::models::page::PageContent;
use crate::models::table::{NoticeTable, NoticeVariant, TableRequest};
use crate::notice::NoticeParser;

/// Receives a finished table and persists it.
pub trait TableSink {
    /// Write the whole table. Called once, after parsing has completed.
    fn write_table(&mut self, request: &TableRequest) -> Result<()>;
}

/// Outcome of one import, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// Table written.
    Completed,
    /// The input or output file is held open by another program.
    FileLocked,
    /// Any other failure, with its message.
    Failed(String),
}

impl ImportStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportStatus::Completed)
    }
}

impl From<&NoticeError> for ImportStatus {
    fn from(err: &NoticeError) -> Self {
        if err.is_resource_busy() {
            ImportStatus::FileLocked
        } else {
            ImportStatus::Failed(err.to_string())
        }
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStatus::Completed => write!(f, "内容识别完成"),
            ImportStatus::FileLocked => write!(f, "请关闭已打开的 pdf / 结果文件后再试"),
            ImportStatus::Failed(message) => write!(f, "操作失败：{}", message),
        }
    }
}

/// Load pages, parse them, and hand the table to `sink`.
///
/// The sink sees nothing unless loading and parsing both succeed, so a failed
/// import never leaves a partial file behind.
pub fn run_import<P, L, S>(
    parser: &P,
    load: L,
    variant: NoticeVariant,
    export: &ExportConfig,
    sink: &mut S,
) -> Result<NoticeTable>
where
    P: NoticeParser + ?Sized,
    L: FnOnce() -> Result<Vec<PageContent>>,
    S: TableSink + ?Sized,
{
    let pages = load()?;
    let table = parser.parse(&pages, variant);

    let request = table.to_request(&export.sheet_name, export.column_width);
    sink.write_table(&request)?;

    info!("Exported {} rows to sheet {}", request.rows.len(), request.sheet_name);
    Ok(table)
}

/// [`run_import`] reduced to the status shown to the user.
pub fn import_notice<P, L, S>(
    parser: &P,
    load: L,
    variant: NoticeVariant,
    export: &ExportConfig,
    sink: &mut S,
) -> ImportStatus
where
    P: NoticeParser + ?Sized,
    L: FnOnce() -> Result<Vec<PageContent>>,
    S: TableSink + ?Sized,
{
    match run_import(parser, load, variant, export, sink) {
        Ok(_) => ImportStatus::Completed,
        Err(err) => failure_status(&err),
    }
}

/// Map a failed import to its status and log it, `warn!` for a locked file
/// and `error!` otherwise.
pub fn failure_status(err: &NoticeError) -> ImportStatus {
    let status = ImportStatus::from(err);
    match status {
        ImportStatus::FileLocked => warn!("Import blocked by a locked file: {}", err),
        _ => error!("Import failed: {}", err),
    }
    status
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::notice::ShipmentNoticeParser;

    #[derive(Default)]
    struct MemorySink {
        written: Vec<TableRequest>,
        fail_with: Option<io::ErrorKind>,
    }

    impl TableSink for MemorySink {
        fn write_table(&mut self, request: &TableRequest) -> Result<()> {
            if let Some(kind) = self.fail_with {
                return Err(io::Error::new(kind, "write refused").into());
            }
            self.written.push(request.clone());
            Ok(())
        }
    }

    fn pages() -> Result<Vec<PageContent>> {
        Ok(vec![PageContent::from_fragments(
            1,
            ["000010 11223344", "B1 5 盒 20260101 20250101"],
        )])
    }

    #[test]
    fn test_import_writes_request() {
        let mut sink = MemorySink::default();
        let status = import_notice(
            &ShipmentNoticeParser::new(),
            pages,
            NoticeVariant::BatchTracked,
            &ExportConfig::default(),
            &mut sink,
        );

        assert_eq!(status, ImportStatus::Completed);
        assert_eq!(status.to_string(), "内容识别完成");
        assert_eq!(sink.written.len(), 1);
        assert_eq!(sink.written[0].sheet_name, "识别结果");
        assert_eq!(sink.written[0].rows.len(), 1);
        assert_eq!(sink.written[0].column_widths, vec![18u16; 12]);
    }

    #[test]
    fn test_locked_output_status() {
        let mut sink = MemorySink {
            fail_with: Some(io::ErrorKind::ResourceBusy),
            ..MemorySink::default()
        };
        let status = import_notice(
            &ShipmentNoticeParser::new(),
            pages,
            NoticeVariant::Priced,
            &ExportConfig::default(),
            &mut sink,
        );
        assert_eq!(status, ImportStatus::FileLocked);
        assert_eq!(status.to_string(), "请关闭已打开的 pdf / 结果文件后再试");
    }

    #[test]
    fn test_failure_status_mapping() {
        let busy = NoticeError::from(io::Error::new(io::ErrorKind::ResourceBusy, "locked"));
        assert_eq!(failure_status(&busy), ImportStatus::FileLocked);

        let other = NoticeError::Export("disk full".to_string());
        assert_eq!(
            failure_status(&other),
            ImportStatus::Failed("export error: disk full".to_string())
        );
    }

    #[test]
    fn test_load_failure_skips_sink() {
        let mut sink = MemorySink::default();
        let status = import_notice(
            &ShipmentNoticeParser::new(),
            || Err(NoticeError::Config("bad input".to_string())),
            NoticeVariant::Priced,
            &ExportConfig::default(),
            &mut sink,
        );
        assert!(sink.written.is_empty());
        assert_eq!(status.to_string(), "操作失败：configuration error: bad input");
    }
}
