//! Row building for the two notice layouts.

use tracing::trace;

use super::block::BlockFields;
use super::fields::DocumentFields;
use super::normalize::format_date8;
use super::patterns::{DATE_DIGITS, DATE_SLASHED, PLAIN_NUMBER, UNIT_OF_MEASURE};
use super::segment::LineItemBlock;
use crate::models::table::{NoticeVariant, PLACEHOLDER};

/// Width of a batch tuple: batch, quantity, unit, expiry, manufacture date.
pub const BATCH_TUPLE_LEN: usize = 5;

/// Rows emitted for one line item.
pub fn build_rows(
    variant: NoticeVariant,
    document: &DocumentFields,
    fields: &BlockFields,
    block: &LineItemBlock<'_>,
) -> Vec<Vec<String>> {
    let prefix = row_prefix(variant, document, fields);

    match variant {
        NoticeVariant::BatchTracked => batch_tuples(block.tokens)
            .into_iter()
            .map(|tuple| [prefix.as_slice(), tuple.as_slice()].concat())
            .collect(),
        NoticeVariant::Priced => {
            let values = priced_values(block);
            vec![[prefix.as_slice(), values.as_slice()].concat()]
        }
    }
}

/// Document and block columns that lead every row.
pub fn row_prefix(variant: NoticeVariant, document: &DocumentFields, fields: &BlockFields) -> Vec<String> {
    let mut prefix = Vec::with_capacity(variant.column_count());
    prefix.push(document.delivery_date.clone());
    if variant == NoticeVariant::BatchTracked {
        prefix.push(document.delivery_note_no.clone());
    }
    prefix.extend([
        document.customer_order_no.clone(),
        document.vendor_order_no.clone(),
        fields.product_code.clone(),
        fields.temperature.clone(),
        fields.reference_code.clone(),
    ]);
    prefix
}

/// Slide a five-token window over the block and collect every batch tuple.
///
/// Matches never overlap: after a hit the scan resumes right after the tuple.
pub fn batch_tuples(tokens: &[String]) -> Vec<[String; BATCH_TUPLE_LEN]> {
    let mut tuples = Vec::new();
    let mut k = 0;

    while k + BATCH_TUPLE_LEN <= tokens.len() {
        match match_batch_tuple(&tokens[k..k + BATCH_TUPLE_LEN]) {
            Some(tuple) => {
                trace!("Batch tuple at offset {}: {:?}", k, tuple);
                tuples.push(tuple);
                k += BATCH_TUPLE_LEN;
            }
            None => k += 1,
        }
    }
    tuples
}

/// Check one window; dates come back in slash form.
pub fn match_batch_tuple(window: &[String]) -> Option<[String; BATCH_TUPLE_LEN]> {
    let [batch, qty, unit, expiry, manufactured] = window else {
        return None;
    };

    let is_match = PLAIN_NUMBER.is_match(qty)
        && UNIT_OF_MEASURE.is_match(unit)
        && is_tuple_date(expiry)
        && is_tuple_date(manufactured);

    is_match.then(|| {
        [
            batch.clone(),
            qty.clone(),
            unit.clone(),
            format_date8(expiry),
            format_date8(manufactured),
        ]
    })
}

fn is_tuple_date(token: &str) -> bool {
    DATE_SLASHED.is_match(token) || DATE_DIGITS.is_match(token)
}

/// Quantity, unit price and amount of a priced line item.
///
/// Quantity is the first plain number in the block, price the next one after
/// it, amount the last one. Every token is a candidate, the leading sequence
/// marker included. With a single number the amount repeats the quantity and
/// the price stays `-`.
pub fn priced_values(block: &LineItemBlock<'_>) -> [String; 3] {
    let numbers: Vec<&String> = block
        .tokens
        .iter()
        .filter(|t| PLAIN_NUMBER.is_match(t))
        .collect();

    let value = |t: Option<&&String>| t.map(|s| s.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string());

    [value(numbers.first()), value(numbers.get(1)), value(numbers.last())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_window_match_advances_past_tuple() {
        let tokens = toks(&["L1", "10", "件", "01/02/2025", "01/01/2025", "junkjunk"]);
        let tuples = batch_tuples(&tokens);
        let expected = ["L1", "10", "件", "01/02/2025", "01/01/2025"].map(String::from);
        assert_eq!(tuples, vec![expected]);
    }

    #[test]
    fn test_window_reformats_digit_dates() {
        let tokens = toks(&["000010", "11223344", "B7", "2.5", "PCE", "20260131", "20240201"]);
        let tuples = batch_tuples(&tokens);
        assert_eq!(tuples.len(), 1);
        assert_eq!(tuples[0][0], "B7");
        assert_eq!(tuples[0][3], "2026/01/31");
        assert_eq!(tuples[0][4], "2024/02/01");
    }

    #[test]
    fn test_multiple_batches_in_one_block() {
        let tokens = toks(&[
            "000010", "B1", "3", "Piece", "20260101", "20250101",
            "B2", "4", "Piece", "20260201", "20250201",
        ]);
        let tuples = batch_tuples(&tokens);
        assert_eq!(tuples.len(), 2);
        assert_eq!(tuples[1][0], "B2");
    }

    #[test]
    fn test_no_tuple_no_rows() {
        let tokens = toks(&["000010", "B1", "3", "kg", "20260101", "20250101"]);
        assert!(batch_tuples(&tokens).is_empty());
        assert!(batch_tuples(&toks(&["B1", "3", "件"])).is_empty());
    }

    #[test]
    fn test_priced_values() {
        let tokens = toks(&["9", "5.5", "49.5"]);
        assert_eq!(priced_values(&LineItemBlock::new(&tokens)), ["9", "5.5", "49.5"].map(String::from));
    }

    #[test]
    fn test_priced_values_count_marker_and_code() {
        let tokens = toks(&["000010", "11223344", "Kit", "4", "PCE", "12.5", "50.0"]);
        assert_eq!(
            priced_values(&LineItemBlock::new(&tokens)),
            ["000010", "11223344", "50.0"].map(String::from)
        );
    }

    #[test]
    fn test_priced_values_placeholders() {
        let tokens = toks(&["000010", "Reagent"]);
        assert_eq!(
            priced_values(&LineItemBlock::new(&tokens)),
            ["000010", "-", "000010"].map(String::from)
        );

        let tokens = toks(&["Reagent", "Kit"]);
        assert_eq!(priced_values(&LineItemBlock::new(&tokens)), ["-", "-", "-"].map(String::from));
    }

    #[test]
    fn test_row_width_matches_header() {
        let document = DocumentFields::default();
        let fields = BlockFields {
            product_code: "11223344".to_string(),
            temperature: "-".to_string(),
            reference_code: "-".to_string(),
        };
        let tokens = toks(&["000010", "B1", "3", "件", "20260101", "20250101", "7"]);
        let block = LineItemBlock::new(&tokens);

        for variant in [NoticeVariant::BatchTracked, NoticeVariant::Priced] {
            let rows = build_rows(variant, &document, &fields, &block);
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].len(), variant.column_count());
        }
    }
}
