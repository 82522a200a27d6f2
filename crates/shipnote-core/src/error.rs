//! Error types for the shipnote-core library.

use std::io;

use thiserror::Error;

/// Windows `ERROR_SHARING_VIOLATION`.
const WIN_SHARING_VIOLATION: i32 = 32;
/// Windows `ERROR_LOCK_VIOLATION`.
const WIN_LOCK_VIOLATION: i32 = 33;
/// POSIX `EBUSY`.
const EBUSY: i32 = 16;

/// Main error type for the shipnote library.
///
/// Field and structure misses inside the extraction core never surface here;
/// only intake, export and configuration failures do.
#[derive(Error, Debug)]
pub enum NoticeError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// The table could not be handed to the export collaborator.
    #[error("export error: {0}")]
    Export(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed page dump or configuration JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input file type the intake cannot read.
    #[error("unsupported input format: {0}")]
    UnsupportedInput(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl NoticeError {
    /// Whether the failure means another process holds the file open.
    ///
    /// This is the only failure a user can fix on the spot (close the
    /// spreadsheet or PDF viewer and retry), so it gets its own status.
    pub fn is_resource_busy(&self) -> bool {
        match self {
            NoticeError::Io(err) => is_busy_io(err),
            _ => false,
        }
    }
}

fn is_busy_io(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::ResourceBusy {
        return true;
    }
    match err.raw_os_error() {
        Some(code) if cfg!(windows) => code == WIN_SHARING_VIOLATION || code == WIN_LOCK_VIOLATION,
        Some(code) => code == EBUSY,
        None => false,
    }
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Result type for the shipnote library.
pub type Result<T> = std::result::Result<T, NoticeError>;
