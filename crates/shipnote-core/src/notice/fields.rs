//! Whole-document field extraction.
//!
//! Every field degrades to an empty string. The vendor order number is the
//! least reliably labeled field across document revisions, so it is resolved
//! through an ordered list of strategies where the first hit wins.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::patterns::{
    CODE_RUN, CODE_TOKEN, CUSTOMER_ORDER_NO, DELIVERY_DATE, DELIVERY_NOTE_NO, REFERENCE_PREFIX,
    VENDOR_KEYWORD, VENDOR_ORDER_CONTEXT, VENDOR_ORDER_LABELED, VENDOR_OR_ORDER_TOKEN,
};
use crate::models::config::ExtractionConfig;
use crate::models::table::VendorOrderTier;

/// Document-level values shared by every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFields {
    /// Notice date, `DD/DD/YYYY` as printed.
    pub delivery_date: String,
    /// Delivery note number (`SI…`).
    pub delivery_note_no: String,
    /// Customer order number (`LS-…`).
    pub customer_order_no: String,
    /// Vendor (Siemens) order number.
    pub vendor_order_no: String,
}

/// Inputs the document-field extractors search.
#[derive(Debug, Clone, Copy)]
pub struct FieldSource<'a> {
    /// Concatenated page text.
    pub text: &'a str,
    /// Cleaned token sequence.
    pub tokens: &'a [String],
    /// Characters searched after the vendor keyword.
    pub window_chars: usize,
    /// Tokens scanned after the first vendor/order token.
    pub token_scan: usize,
}

impl<'a> FieldSource<'a> {
    pub fn new(text: &'a str, tokens: &'a [String], config: &ExtractionConfig) -> Self {
        Self {
            text,
            tokens,
            window_chars: config.vendor_window_chars,
            token_scan: config.vendor_token_scan,
        }
    }
}

type Strategy = fn(&FieldSource<'_>) -> Option<String>;

/// Vendor order strategies, most specific first.
const VENDOR_ORDER_TIERS: [(VendorOrderTier, Strategy); 4] = [
    (VendorOrderTier::DirectLabel, vendor_order_labeled),
    (VendorOrderTier::Context, vendor_order_in_context),
    (VendorOrderTier::Proximity, vendor_order_near_keyword),
    (VendorOrderTier::TokenScan, vendor_order_in_tokens),
];

/// Extract all document-level fields.
pub fn extract_document_fields(source: &FieldSource<'_>) -> (DocumentFields, Option<VendorOrderTier>) {
    let vendor = resolve_vendor_order(source);

    let fields = DocumentFields {
        delivery_date: first_capture(&DELIVERY_DATE, source.text),
        delivery_note_no: first_capture(&DELIVERY_NOTE_NO, source.text),
        customer_order_no: first_capture(&CUSTOMER_ORDER_NO, source.text),
        vendor_order_no: vendor.as_ref().map(|(_, v)| v.clone()).unwrap_or_default(),
    };

    (fields, vendor.map(|(tier, _)| tier))
}

/// Run the vendor order tiers until one produces a value.
pub fn resolve_vendor_order(source: &FieldSource<'_>) -> Option<(VendorOrderTier, String)> {
    VENDOR_ORDER_TIERS.iter().find_map(|(tier, strategy)| {
        let value = strategy(source)?;
        trace!("Vendor order {} resolved by {:?}", value, tier);
        Some((*tier, value))
    })
}

fn first_capture(pattern: &regex::Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn vendor_order_labeled(source: &FieldSource<'_>) -> Option<String> {
    VENDOR_ORDER_LABELED
        .captures(source.text)
        .map(|caps| caps[1].to_string())
}

fn vendor_order_in_context(source: &FieldSource<'_>) -> Option<String> {
    let caps = VENDOR_ORDER_CONTEXT.captures(source.text)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

fn vendor_order_near_keyword(source: &FieldSource<'_>) -> Option<String> {
    let keyword = VENDOR_KEYWORD.find(source.text)?;
    let after = &source.text[keyword.end()..];
    let window_end = after
        .char_indices()
        .nth(source.window_chars)
        .map(|(i, _)| i)
        .unwrap_or(after.len());

    CODE_RUN
        .find(&after[..window_end])
        .map(|m| m.as_str().to_string())
}

fn vendor_order_in_tokens(source: &FieldSource<'_>) -> Option<String> {
    let tokens = source.tokens;
    let pos = tokens.iter().position(|t| VENDOR_OR_ORDER_TOKEN.is_match(t))?;
    let end = (pos + source.token_scan).min(tokens.len());

    tokens
        .get(pos + 1..end)?
        .iter()
        .find(|t| CODE_TOKEN.is_match(t) && !REFERENCE_PREFIX.is_match(t))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source<'a>(text: &'a str, tokens: &'a [String]) -> FieldSource<'a> {
        FieldSource::new(text, tokens, &ExtractionConfig::default())
    }

    #[test]
    fn test_labeled_document_fields() {
        let text = " 通知日期：15/01/2024 发货通知单号: SI20240001 客户订单号 LS-2024-017 西门子订单号: 4500123456";
        let (fields, tier) = extract_document_fields(&source(text, &[]));

        assert_eq!(fields.delivery_date, "15/01/2024");
        assert_eq!(fields.delivery_note_no, "SI20240001");
        assert_eq!(fields.customer_order_no, "LS-2024-017");
        assert_eq!(fields.vendor_order_no, "4500123456");
        assert_eq!(tier, Some(VendorOrderTier::DirectLabel));
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let (fields, tier) = extract_document_fields(&source("nothing useful here", &[]));
        assert_eq!(fields, DocumentFields::default());
        assert_eq!(tier, None);
    }

    #[test]
    fn test_note_number_needs_minimum_length() {
        let text = "发货通知单号:SI1234";
        let (fields, _) = extract_document_fields(&source(text, &[]));
        assert_eq!(fields.delivery_note_no, "");
    }

    #[test]
    fn test_context_tier_wins_over_later_tiers() {
        // The proximity and token tiers would both find "ZZZZZ99" here.
        let text = "订单号: ABC12345 供应商 西门子 ZZZZZ99";
        let tokens: Vec<String> = ["西门子", "ZZZZZ99"].iter().map(|s| s.to_string()).collect();
        let resolved = resolve_vendor_order(&source(text, &tokens));
        assert_eq!(resolved, Some((VendorOrderTier::Context, "ABC12345".to_string())));
    }

    #[test]
    fn test_context_tier_second_ordering() {
        let text = "Siemens 西门子 Healthcare 订单号:QX-77812";
        let resolved = resolve_vendor_order(&source(text, &[]));
        assert_eq!(resolved, Some((VendorOrderTier::Context, "QX-77812".to_string())));
    }

    #[test]
    fn test_proximity_tier_searches_after_keyword() {
        let text = "Shipped by SIEMENS: 4500998877 via road";
        let resolved = resolve_vendor_order(&source(text, &[]));
        assert_eq!(resolved, Some((VendorOrderTier::Proximity, "4500998877".to_string())));
    }

    #[test]
    fn test_proximity_window_is_bounded() {
        let text = format!("西门子{}4500998877", " ".repeat(250));
        let tokens: Vec<String> = Vec::new();
        let mut src = source(&text, &tokens);
        assert_eq!(resolve_vendor_order(&src), None);

        src.window_chars = 300;
        assert_eq!(
            resolve_vendor_order(&src),
            Some((VendorOrderTier::Proximity, "4500998877".to_string()))
        );
    }

    #[test]
    fn test_token_tier_skips_reference_codes() {
        let tokens: Vec<String> = ["header", "订单", "UEG:1234567", "ab", "45001122"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let resolved = resolve_vendor_order(&source("", &tokens));
        assert_eq!(resolved, Some((VendorOrderTier::TokenScan, "45001122".to_string())));
    }

    #[test]
    fn test_token_tier_scan_limit() {
        let mut tokens = vec!["订单".to_string()];
        tokens.extend((0..30).map(|_| "x".to_string()));
        tokens.push("45001122".to_string());
        assert_eq!(resolve_vendor_order(&source("", &tokens)), None);
    }

    fn order_token_then_code_at(offset: usize) -> Vec<String> {
        let mut tokens = vec!["订单".to_string()];
        tokens.extend((1..offset).map(|_| "x".to_string()));
        tokens.push("45001122".to_string());
        tokens
    }

    #[test]
    fn test_token_tier_scan_end_is_exclusive() {
        let tokens = order_token_then_code_at(29);
        assert_eq!(tokens[29], "45001122");
        assert_eq!(
            resolve_vendor_order(&source("", &tokens)),
            Some((VendorOrderTier::TokenScan, "45001122".to_string()))
        );

        let tokens = order_token_then_code_at(30);
        assert_eq!(tokens[30], "45001122");
        assert_eq!(resolve_vendor_order(&source("", &tokens)), None);
    }
}
