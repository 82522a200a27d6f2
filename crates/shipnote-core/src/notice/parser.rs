//! Shipment-notice parser: pages in, table out.

use std::time::Instant;

use tracing::{debug, info};

use super::block::extract_block_fields;
use super::fields::{extract_document_fields, FieldSource};
use super::rows::build_rows;
use super::segment::segment;
use super::tokens::{full_text, TokenSequence};
use crate::models::config::{CleaningConfig, ExtractionConfig, ShipnoteConfig};
use crate::models::page::PageContent;
use crate::models::table::{NoticeTable, NoticeVariant};

/// Trait for notice parsing.
pub trait NoticeParser {
    /// Parse the pages of one notice into a table for `variant`.
    ///
    /// Parsing never fails: unmatched fields become empty strings or `-`.
    fn parse(&self, pages: &[PageContent], variant: NoticeVariant) -> NoticeTable;
}

/// Rule-based parser for vendor shipment notices.
#[derive(Debug, Clone, Default)]
pub struct ShipmentNoticeParser {
    cleaning: CleaningConfig,
    extraction: ExtractionConfig,
}

impl ShipmentNoticeParser {
    /// Create a parser with default markers and search limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from a loaded configuration.
    pub fn from_config(config: &ShipnoteConfig) -> Self {
        Self {
            cleaning: config.cleaning.clone(),
            extraction: config.extraction.clone(),
        }
    }

    /// Set the cleaning markers.
    pub fn with_cleaning(mut self, cleaning: CleaningConfig) -> Self {
        self.cleaning = cleaning;
        self
    }

    /// Set the vendor order search limits.
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }
}

impl NoticeParser for ShipmentNoticeParser {
    fn parse(&self, pages: &[PageContent], variant: NoticeVariant) -> NoticeTable {
        let start = Instant::now();
        info!("Parsing {:?} notice from {} pages", variant, pages.len());

        let text = full_text(pages);
        let tokens = TokenSequence::from_pages(pages).clean(&self.cleaning);

        let source = FieldSource::new(&text, &tokens, &self.extraction);
        let (document, vendor_tier) = extract_document_fields(&source);
        debug!("Document fields: {:?}", document);

        let blocks = segment(&tokens);

        let mut table = NoticeTable::new(variant);
        for block in &blocks {
            let fields = extract_block_fields(block);
            let rows = build_rows(variant, &document, &fields, block);
            debug!(
                "Block {} -> {} rows",
                block.marker().unwrap_or("?"),
                rows.len()
            );
            table.rows.extend(rows);
        }

        table.stats.tokens = tokens.len();
        table.stats.blocks = blocks.len();
        table.stats.vendor_order_tier = vendor_tier;

        info!(
            "Extracted {} rows from {} blocks in {}ms",
            table.rows.len(),
            blocks.len(),
            start.elapsed().as_millis()
        );
        table
    }
}
