pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use shipnote_core::models::config::ShipnoteConfig;
use shipnote_core::NoticeVariant;

/// Notice layout selected on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum VariantArg {
    /// Twelve columns, one row per batch/quantity/expiry tuple
    BatchTracked,
    /// Nine columns, one row per line item with quantity, price and amount
    Priced,
}

impl From<VariantArg> for NoticeVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::BatchTracked => NoticeVariant::BatchTracked,
            VariantArg::Priced => NoticeVariant::Priced,
        }
    }
}

/// Output format of the extracted table.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV with the notice header row
    Csv,
    /// JSON table request (sheet name, header, rows, column widths)
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shipnote")
        .join("config.json")
}

/// Resolve the config file in effect: `--config` if given, else the default
/// location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load the explicit config file, or the default one if it exists, or
/// built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ShipnoteConfig> {
    if let Some(path) = config_path {
        return Ok(ShipnoteConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(ShipnoteConfig::from_file(&default_path)?)
    } else {
        Ok(ShipnoteConfig::default())
    }
}
