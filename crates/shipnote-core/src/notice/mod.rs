//! Shipment-notice extraction.
//!
//! Pipeline, leaf first: token cleaning, document fields, line-item
//! segmentation, block fields, and variant-specific row building.

pub mod block;
pub mod fields;
pub mod normalize;
mod parser;
pub mod patterns;
pub mod rows;
pub mod segment;
pub mod tokens;

pub use block::{extract_block_fields, BlockFields};
pub use fields::{extract_document_fields, resolve_vendor_order, DocumentFields, FieldSource};
pub use normalize::{format_date8, normalize_temperature};
pub use parser::{NoticeParser, ShipmentNoticeParser};
pub use segment::{segment, LineItemBlock};
pub use tokens::{atomize, full_text, TokenSequence};
