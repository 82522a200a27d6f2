//! Tabular output of a parsed shipment notice.

use serde::{Deserialize, Serialize};

/// Placeholder written for a block field that could not be found.
pub const PLACEHOLDER: &str = "-";

/// Recognized shipment-notice layouts. Selected by the caller, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    /// Line items carry batch / quantity / unit / expiry / manufacture tuples.
    #[default]
    BatchTracked,
    /// Line items carry quantity / unit price / amount.
    Priced,
}

impl NoticeVariant {
    /// Column names for this layout, in row order.
    pub fn header(self) -> &'static [&'static str] {
        match self {
            NoticeVariant::BatchTracked => &[
                "发货日期",
                "发货单号",
                "客户订单号",
                "西门子订单号",
                "西门子编码",
                "储存温度",
                "UEG",
                "批号",
                "数量",
                "单位",
                "效期",
                "生产日期",
            ],
            NoticeVariant::Priced => &[
                "发货日期",
                "客户订单号",
                "西门子订单号",
                "西门子编码",
                "储存温度",
                "UEG",
                "数量",
                "单价",
                "金额",
            ],
        }
    }

    /// Number of columns in every row of this layout.
    pub fn column_count(self) -> usize {
        self.header().len()
    }
}

/// Which vendor-order strategy produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorOrderTier {
    /// Labeled value right after the vendor order label.
    DirectLabel,
    /// Order label and vendor keyword in the same line.
    Context,
    /// First code-like run after the vendor keyword.
    Proximity,
    /// Token scan after the first vendor/order token.
    TokenScan,
}

/// Counters collected while parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Tokens left after cleaning.
    pub tokens: usize,
    /// Line-item blocks found.
    pub blocks: usize,
    /// Strategy that resolved the vendor order number, if any did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_order_tier: Option<VendorOrderTier>,
}

/// Header plus data rows for one parsed notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeTable {
    pub variant: NoticeVariant,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(default)]
    pub stats: ParseStats,
}

impl NoticeTable {
    /// Empty table with the header of `variant`.
    pub fn new(variant: NoticeVariant) -> Self {
        Self {
            variant,
            header: variant.header().iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// Build the request handed to the export collaborator.
    pub fn to_request(&self, sheet_name: &str, column_width: u16) -> TableRequest {
        TableRequest {
            sheet_name: sheet_name.to_string(),
            header: self.header.clone(),
            rows: self.rows.clone(),
            column_widths: vec![column_width; self.header.len()],
        }
    }
}

/// A sheet ready to be written by a spreadsheet writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRequest {
    /// Sheet label.
    pub sheet_name: String,
    /// Header row.
    pub header: Vec<String>,
    /// Data rows, each as long as the header.
    pub rows: Vec<Vec<String>>,
    /// Display width hint per column, in characters.
    pub column_widths: Vec<u16>,
}
