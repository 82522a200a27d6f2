//! Page-level input handed over by the text-extraction step.

use serde::{Deserialize, Serialize};

/// Text content of one document page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed).
    #[serde(default)]
    pub number: u32,

    /// Raw text fragments in reading order. A fragment may hold several
    /// logical tokens joined by whitespace or `/`.
    pub fragments: Vec<String>,

    /// Concatenated page text, when the extractor provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PageContent {
    /// Create a page from its fragments only.
    pub fn from_fragments<I, S>(number: u32, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            number,
            fragments: fragments.into_iter().map(Into::into).collect(),
            text: None,
        }
    }

    /// Create a page from extracted text, one fragment per non-empty line.
    pub fn from_text(number: u32, text: impl AsRef<str>) -> Self {
        let fragments: Vec<String> = text
            .as_ref()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            number,
            text: Some(fragments.join(" ")),
            fragments,
        }
    }

    /// Page text for whole-document search, on a single line so patterns can
    /// match across the extractor's line breaks. Falls back to space-joined
    /// fragments when the extractor gave no page text.
    pub fn search_text(&self) -> String {
        match &self.text {
            Some(text) => text.replace(['\r', '\n'], " "),
            None => self.fragments.join(" "),
        }
    }
}

/// Load pages from a JSON dump (an array of pages).
pub fn pages_from_json(json: &str) -> serde_json::Result<Vec<PageContent>> {
    serde_json::from_str(json)
}
