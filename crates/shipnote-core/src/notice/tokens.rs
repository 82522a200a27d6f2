//! Token atomization and cleaning.
//!
//! Fragments from the text extractor are broken into whitespace-, slash- and
//! parenthesis-free tokens, then pagination furniture, the recurring address
//! boilerplate and the trailing legal notice are removed. Every step copies
//! the kept spans of an immutable buffer; nothing is deleted in place.

use std::ops::Deref;

use tracing::debug;

use super::patterns::{PAGE_MARKER_EN, PAGE_MARKER_ZH, PAGE_NUMBER};
use crate::models::config::CleaningConfig;
use crate::models::page::PageContent;

/// Split a fragment into atomic tokens.
///
/// `"A/B (C)"` becomes `["A", "B", "C"]`.
pub fn atomize(fragment: &str) -> Vec<String> {
    fragment
        .split_whitespace()
        .flat_map(|piece| piece.split('/'))
        .map(|piece| piece.replace(['(', ')'], "").trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Concatenated page text used for whole-document regex search.
pub fn full_text(pages: &[PageContent]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push(' ');
        text.push_str(&page.search_text());
    }
    text
}

/// Start and end markers of the address/validity boilerplate.
#[derive(Debug, Clone, Copy)]
pub struct BoilerplateMarkers<'a> {
    /// Token exactly equal to this opens the range.
    pub start: &'a str,
    /// First token starting with this closes the range (inclusive).
    pub end_prefix: &'a str,
}

/// Ordered, cleaned tokens of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence(Vec<String>);

impl TokenSequence {
    /// Atomize every fragment of every page, in page order.
    pub fn from_pages(pages: &[PageContent]) -> Self {
        Self(
            pages
                .iter()
                .flat_map(|page| page.fragments.iter())
                .flat_map(|fragment| atomize(fragment))
                .collect(),
        )
    }

    /// Run the cleaning steps in order: pagination, boilerplate, legal tail.
    pub fn clean(self, config: &CleaningConfig) -> Self {
        let before = self.0.len();

        let tokens = drop_page_markers(&self.0);
        let tokens = remove_boilerplate(
            &tokens,
            BoilerplateMarkers {
                start: &config.boilerplate_start,
                end_prefix: &config.boilerplate_end_prefix,
            },
        );
        let tokens = truncate_at_legal_notice(&tokens, &config.legal_notices);

        debug!("Cleaned token stream: {} -> {} tokens", before, tokens.len());
        Self(tokens)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for TokenSequence {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for TokenSequence {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

/// Whether a single token is a page counter such as `Page1of3` or `第1页共3页`.
pub fn is_page_marker(token: &str) -> bool {
    PAGE_MARKER_EN.is_match(token) || PAGE_MARKER_ZH.is_match(token)
}

/// Drop page counters, including `Page N of M` split into four tokens.
pub fn drop_page_markers(tokens: &[String]) -> Vec<String> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if is_split_page_marker(&tokens[i..]) {
            i += 4;
            continue;
        }
        if !is_page_marker(&tokens[i]) {
            kept.push(tokens[i].clone());
        }
        i += 1;
    }
    kept
}

fn is_split_page_marker(tokens: &[String]) -> bool {
    match tokens {
        [page, n, of, m, ..] => {
            page.eq_ignore_ascii_case("page")
                && of.eq_ignore_ascii_case("of")
                && PAGE_NUMBER.is_match(n)
                && PAGE_NUMBER.is_match(m)
        }
        _ => false,
    }
}

/// Remove every `[start, end]` boilerplate range.
///
/// Each round looks for the first start token and the first end token at or
/// after the cursor. The round stops when either is missing or the end comes
/// before the start, so a stray end marker cannot stall the loop.
pub fn remove_boilerplate(tokens: &[String], markers: BoilerplateMarkers<'_>) -> Vec<String> {
    if markers.start.is_empty() || markers.end_prefix.is_empty() {
        return tokens.to_vec();
    }

    let mut kept = Vec::with_capacity(tokens.len());
    let mut cursor = 0;
    let mut removed = 0;

    loop {
        let rest = &tokens[cursor..];
        let start = rest.iter().position(|t| t == markers.start);
        let end = rest.iter().position(|t| t.starts_with(markers.end_prefix));

        match (start, end) {
            (Some(s), Some(e)) if e >= s => {
                kept.extend_from_slice(&rest[..s]);
                cursor += e + 1;
                removed += 1;
            }
            _ => break,
        }
    }
    kept.extend_from_slice(&tokens[cursor..]);

    debug!("Removed {} boilerplate ranges", removed);
    kept
}

/// Cut the sequence at the first legal notice.
///
/// A notice matches at a token that contains the whole phrase, or at a run of
/// tokens spelling the phrase word by word. Matching ignores case.
pub fn truncate_at_legal_notice(tokens: &[String], notices: &[String]) -> Vec<String> {
    let phrases: Vec<Vec<String>> = notices
        .iter()
        .map(|n| n.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>())
        .filter(|words| !words.is_empty())
        .collect();

    let tail = (0..tokens.len()).find(|&i| {
        phrases
            .iter()
            .any(|words| notice_starts_at(&tokens[i..], words))
    });

    match tail {
        Some(i) => {
            debug!("Legal notice at token {}, dropping {} tokens", i, tokens.len() - i);
            tokens[..i].to_vec()
        }
        None => tokens.to_vec(),
    }
}

fn notice_starts_at(tokens: &[String], words: &[String]) -> bool {
    let first = tokens[0].to_lowercase();
    if first.contains(&words.join(" ")) {
        return true;
    }
    tokens.len() >= words.len()
        && tokens
            .iter()
            .zip(words)
            .all(|(token, word)| token.to_lowercase() == *word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_atomize() {
        assert_eq!(atomize("A/B (C)"), toks(&["A", "B", "C"]));
        assert_eq!(atomize("  12345678\tL001/20250101 "), toks(&["12345678", "L001", "20250101"]));
    }

    #[test]
    fn test_atomize_separators_only() {
        assert!(atomize("( ) / ()").is_empty());
        assert!(atomize("").is_empty());
    }

    #[test]
    fn test_from_pages_keeps_page_order() {
        let pages = vec![
            PageContent::from_fragments(1, ["a b", "c/d"]),
            PageContent::from_fragments(2, ["(e)"]),
        ];
        let seq = TokenSequence::from_pages(&pages);
        assert_eq!(seq.into_inner(), toks(&["a", "b", "c", "d", "e"]));
    }

    #[test]
    fn test_full_text_prefers_page_text() {
        let mut first = PageContent::from_fragments(1, ["x", "y"]);
        first.text = Some("xy".to_string());
        let second = PageContent::from_fragments(2, ["z", "w"]);
        assert_eq!(full_text(&[first, second]), " xy z w");
    }

    #[test]
    fn test_drop_page_markers() {
        let tokens = toks(&["A", "Page1of2", "第1页共2页", "共2页", "第2页", "2页", "B", "页"]);
        assert_eq!(drop_page_markers(&tokens), toks(&["A", "B", "页"]));
    }

    #[test]
    fn test_drop_split_page_marker() {
        let tokens = toks(&["A", "Page", "2", "of", "3", "B", "Page", "two"]);
        assert_eq!(drop_page_markers(&tokens), toks(&["A", "B", "Page", "two"]));
    }

    #[test]
    fn test_boilerplate_removed_exhaustively() {
        let tokens = toks(&[
            "h1", "To", "addr", "有效期限至2025", "mid", "To", "addr2", "x", "有效期限至2026", "tail",
        ]);
        let markers = BoilerplateMarkers { start: "To", end_prefix: "有效期限至" };
        assert_eq!(remove_boilerplate(&tokens, markers), toks(&["h1", "mid", "tail"]));
    }

    #[test]
    fn test_boilerplate_end_before_start_stops() {
        let tokens = toks(&["有效期限至2025", "a", "To", "b"]);
        let markers = BoilerplateMarkers { start: "To", end_prefix: "有效期限至" };
        assert_eq!(remove_boilerplate(&tokens, markers), tokens);
    }

    #[test]
    fn test_boilerplate_missing_marker() {
        let tokens = toks(&["To", "a", "b"]);
        let markers = BoilerplateMarkers { start: "To", end_prefix: "有效期限至" };
        assert_eq!(remove_boilerplate(&tokens, markers), tokens);
    }

    #[test]
    fn test_truncate_at_split_notice() {
        let notices = CleaningConfig::default().legal_notices;
        let tokens = toks(&["000010", "x", "THESE", "items", "are", "controlled", "by"]);
        assert_eq!(truncate_at_legal_notice(&tokens, &notices), toks(&["000010", "x"]));

        let tokens = toks(&["a", "Reservation", "Clause:", "b"]);
        assert_eq!(truncate_at_legal_notice(&tokens, &notices), toks(&["a", "Reservation", "Clause:", "b"]));

        let tokens = toks(&["a", "Reservation", "Clause", "b"]);
        assert_eq!(truncate_at_legal_notice(&tokens, &notices), toks(&["a"]));
    }

    #[test]
    fn test_truncate_without_notice_keeps_all() {
        let notices = CleaningConfig::default().legal_notices;
        let tokens = toks(&["a", "These", "items"]);
        assert_eq!(truncate_at_legal_notice(&tokens, &notices), tokens);
    }

    #[test]
    fn test_clean_prebuilt_sequence() {
        let seq = TokenSequence::from(toks(&["第1页", "000010", "reservation", "clause", "x"]));
        let cleaned = seq.clean(&CleaningConfig::default());
        assert_eq!(&*cleaned, &toks(&["000010"])[..]);
    }

    #[test]
    fn test_clean_pipeline() {
        let pages = vec![
            PageContent::from_fragments(1, ["header", "To Some Street", "有效期限至2025-12-31", "000010 12345678", "Page 1 of 2"]),
            PageContent::from_fragments(2, ["To Some Street", "有效期限至2025-12-31", "000020", "These items are controlled by the U.S."]),
        ];
        let cleaned = TokenSequence::from_pages(&pages).clean(&CleaningConfig::default());
        assert_eq!(cleaned.into_inner(), toks(&["header", "000010", "12345678", "000020"]));
    }
}
