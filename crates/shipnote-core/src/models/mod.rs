//! Data models: page input, configuration and table output.

pub mod config;
pub mod page;
pub mod table;

pub use config::ShipnoteConfig;
pub use page::{pages_from_json, PageContent};
pub use table::{NoticeTable, NoticeVariant, ParseStats, TableRequest, VendorOrderTier, PLACEHOLDER};
