//! Core library for shipment-notice extraction.
//!
//! This crate provides:
//! - PDF intake (page text and fragments)
//! - Token cleaning, line-item segmentation and field extraction
//! - Row building for the batch-tracked and priced notice layouts
//! - The table hand-off to a spreadsheet writer

pub mod error;
pub mod export;
pub mod intake;
pub mod models;
pub mod notice;
pub mod pdf;

pub use error::{NoticeError, PdfError, Result};
pub use intake::load_pages;
pub use export::{failure_status, import_notice, run_import, ImportStatus, TableSink};
pub use models::{NoticeTable, NoticeVariant, PageContent, ShipnoteConfig, TableRequest};
pub use notice::{NoticeParser, ShipmentNoticeParser};
pub use pdf::{PdfExtractor, PdfProcessor};
