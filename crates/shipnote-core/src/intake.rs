//! Reading an input file into pages.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{NoticeError, Result};
use crate::models::config::PdfConfig;
use crate::models::page::{pages_from_json, PageContent};
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Load the pages of a notice from a PDF, a JSON page dump, or plain text.
///
/// The whole file is read up front, so a file locked by another program
/// fails here with its original I/O error.
pub fn load_pages(path: &Path, config: &PdfConfig) -> Result<Vec<PageContent>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Loading {}", path.display());

    let pages = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            extractor.extract_pages(config.min_text_length)?
        }
        "json" => pages_from_json(&fs::read_to_string(path)?)?,
        "txt" => {
            // Form feeds separate pages in text dumps
            fs::read_to_string(path)?
                .split('\u{0C}')
                .enumerate()
                .map(|(i, text)| PageContent::from_text(i as u32 + 1, text))
                .collect()
        }
        _ => return Err(NoticeError::UnsupportedInput(extension)),
    };

    debug!("Loaded {} pages", pages.len());
    Ok(pages)
}
