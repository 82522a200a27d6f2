//! Line-item segmentation on 6-digit sequence markers.

use super::patterns::SEQUENCE_MARKER;

/// Tokens of one line item, starting with its sequence marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemBlock<'a> {
    pub tokens: &'a [String],
}

impl<'a> LineItemBlock<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self { tokens }
    }

    /// The leading sequence marker, if the block has one.
    pub fn marker(&self) -> Option<&'a str> {
        self.tokens
            .first()
            .filter(|t| is_sequence_marker(t))
            .map(String::as_str)
    }
}

pub fn is_sequence_marker(token: &str) -> bool {
    SEQUENCE_MARKER.is_match(token)
}

/// Split tokens into blocks, one per sequence marker, in encounter order.
///
/// Only the marker's shape matters. Line numbers may skip or repeat. Tokens
/// before the first marker belong to the document header and are dropped.
pub fn segment(tokens: &[String]) -> Vec<LineItemBlock<'_>> {
    let starts: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| is_sequence_marker(t))
        .map(|(i, _)| i)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(tokens.len());
            LineItemBlock::new(&tokens[start..end])
        })
        .collect()
}
