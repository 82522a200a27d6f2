//! Configuration structures for the notice pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the shipnote pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipnoteConfig {
    /// Token cleaning configuration.
    pub cleaning: CleaningConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF intake configuration.
    pub pdf: PdfConfig,

    /// Table export configuration.
    pub export: ExportConfig,
}

/// Markers used to strip furniture from the token stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Token that opens the address/validity boilerplate.
    pub boilerplate_start: String,

    /// Prefix of the token that closes the boilerplate.
    pub boilerplate_end_prefix: String,

    /// Legal notices that end the useful content. Matched case-insensitively.
    pub legal_notices: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            boilerplate_start: "To".to_string(),
            boilerplate_end_prefix: "有效期限至".to_string(),
            legal_notices: vec![
                "These items are controlled".to_string(),
                "RESERVATION CLAUSE".to_string(),
            ],
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters searched after the vendor keyword for an order number.
    pub vendor_window_chars: usize,

    /// Tokens scanned after the first vendor/order token.
    pub vendor_token_scan: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendor_window_chars: 200,
            vendor_token_scan: 30,
        }
    }
}

/// PDF intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Below this many characters of per-page text, fall back to
    /// whole-document extraction.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// Table export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Sheet label handed to the writer.
    pub sheet_name: String,

    /// Display width hint for every column.
    pub column_width: u16,

    /// Output file used when none is given.
    pub default_output: PathBuf,

    /// Prefix CSV output with a UTF-8 byte order mark so spreadsheet
    /// applications detect the encoding of the Chinese headers.
    pub utf8_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "识别结果".to_string(),
            column_width: 18,
            default_output: PathBuf::from("output.csv"),
            utf8_bom: true,
        }
    }
}

impl ShipnoteConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
