//! Per-line-item field extraction.

use serde::{Deserialize, Serialize};

use super::normalize::normalize_temperature;
use super::patterns::{PRODUCT_CODE, REFERENCE_CODE, REFERENCE_PREFIX, TEMPERATURE_RANGE};
use super::segment::LineItemBlock;
use crate::models::table::PLACEHOLDER;

/// Fields shared by every row emitted for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFields {
    /// 8-digit vendor product code, empty when absent.
    pub product_code: String,
    /// Normalized storage temperature, `-` when absent.
    pub temperature: String,
    /// UEG/REF number without its label, `-` when absent.
    pub reference_code: String,
}

/// Extract product code, temperature and reference code from a block.
pub fn extract_block_fields(block: &LineItemBlock<'_>) -> BlockFields {
    let tokens = block.tokens;

    let product_code = tokens
        .iter()
        .find(|t| PRODUCT_CODE.is_match(t))
        .cloned()
        .unwrap_or_default();

    let reference_code = tokens
        .iter()
        .find(|t| REFERENCE_CODE.is_match(t))
        .map(|t| REFERENCE_PREFIX.replace(t, "").into_owned())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    BlockFields {
        product_code,
        temperature: normalize_temperature(&raw_temperature(tokens)),
        reference_code,
    }
}

/// The first token holding a temperature range, or the first range found in
/// the joined block when the range was split across tokens.
fn raw_temperature(tokens: &[String]) -> String {
    if let Some(token) = tokens.iter().find(|t| TEMPERATURE_RANGE.is_match(t)) {
        return token.clone();
    }

    let joined = tokens.concat();
    TEMPERATURE_RANGE
        .find(&joined)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(items: &[&str]) -> BlockFields {
        let tokens: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        extract_block_fields(&LineItemBlock::new(&tokens))
    }

    #[test]
    fn test_all_fields_present() {
        let f = fields(&["000010", "11223344", "Reagent", "2~8℃", "UEG:778899", "L1"]);
        assert_eq!(f.product_code, "11223344");
        assert_eq!(f.temperature, "2～8℃");
        assert_eq!(f.reference_code, "778899");
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let f = fields(&["000010", "1234567", "Reagent"]);
        assert_eq!(f.product_code, "");
        assert_eq!(f.temperature, "-");
        assert_eq!(f.reference_code, "-");
    }

    #[test]
    fn test_temperature_split_across_tokens() {
        let f = fields(&["000010", "Store", "+02°C", "to", "+08°C"]);
        assert_eq!(f.temperature, "2～8℃");

        let f = fields(&["000010", "Temp:", "15", "~", "25℃"]);
        assert_eq!(f.temperature, "15～25℃");
    }

    #[test]
    fn test_reference_prefix_variants() {
        assert_eq!(fields(&["000010", "ref:4411"]).reference_code, "4411");
        assert_eq!(fields(&["000010", "REF:", "4411"]).reference_code, "-");
    }

    #[test]
    fn test_first_product_code_wins() {
        let f = fields(&["000010", "20250101", "11223344"]);
        assert_eq!(f.product_code, "20250101");
    }
}
