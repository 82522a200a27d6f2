//! Batch processing command for multiple notice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use shipnote_core::models::config::ShipnoteConfig;
use shipnote_core::{load_pages, run_import, ImportStatus, NoticeVariant, ShipmentNoticeParser};

use super::{load_config, OutputFormat, VariantArg};
use crate::sink::file_sink;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Notice layout shared by all inputs
    #[arg(long, value_enum, default_value = "batch-tracked")]
    variant: VariantArg,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileOutcome {
    path: PathBuf,
    status: ImportStatus,
    rows: usize,
}

impl FileOutcome {
    fn status_label(&self) -> &'static str {
        match self.status {
            ImportStatus::Completed => "success",
            ImportStatus::FileLocked => "locked",
            ImportStatus::Failed(_) => "error",
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "json" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = ShipmentNoticeParser::from_config(&config);
    let variant = NoticeVariant::from(args.variant);
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let outcome = process_file(&path, &parser, variant, &args, &config);

        if !outcome.status.is_success() {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", path.display(), outcome.status);
            } else {
                error!("Failed to process {}: {}", path.display(), outcome.status);
                pb.abandon();
                anyhow::bail!("Processing failed for {}: {}", path.display(), outcome.status);
            }
        }

        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = outcomes.iter().filter(|o| !o.status.is_success()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcomes.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!("  - {}: {}", outcome.path.display(), outcome.status);
        }
    }

    Ok(())
}

fn process_file(
    path: &Path,
    parser: &ShipmentNoticeParser,
    variant: NoticeVariant,
    args: &BatchArgs,
    config: &ShipnoteConfig,
) -> FileOutcome {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("notice");
    let output_path = args
        .output_dir
        .join(format!("{}.{}", stem, args.format.extension()));

    let mut sink = file_sink(output_path, args.format, config.export.utf8_bom);
    let result = run_import(
        parser,
        || load_pages(path, &config.pdf),
        variant,
        &config.export,
        sink.as_mut(),
    );

    match result {
        Ok(table) => {
            debug!("{}: {} rows", path.display(), table.rows.len());
            FileOutcome {
                path: path.to_path_buf(),
                status: ImportStatus::Completed,
                rows: table.rows.len(),
            }
        }
        Err(err) => FileOutcome {
            path: path.to_path_buf(),
            status: ImportStatus::from(&err),
            rows: 0,
        },
    }
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "status", "rows", "message"])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        wtr.write_record([
            filename,
            outcome.status_label(),
            &outcome.rows.to_string(),
            &outcome.status.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
