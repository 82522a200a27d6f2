//! Process command - extract the line-item table from a single notice.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use shipnote_core::{
    failure_status, load_pages, run_import, ImportStatus, NoticeTable, ShipmentNoticeParser,
};

use super::{load_config, OutputFormat, VariantArg};
use crate::sink::file_sink;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, JSON page dump, or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: export.default_output from the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Notice layout
    #[arg(long, value_enum, default_value = "batch-tracked")]
    variant: VariantArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Show token, block and vendor-order diagnostics
    #[arg(long)]
    show_stats: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let output_path = args.output.clone().unwrap_or_else(|| {
        config
            .export
            .default_output
            .with_extension(args.format.extension())
    });

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Reading {}...", args.input.display()));

    let parser = ShipmentNoticeParser::from_config(&config);
    let mut sink = file_sink(output_path.clone(), args.format, config.export.utf8_bom);

    let result = run_import(
        &parser,
        || load_pages(&args.input, &config.pdf),
        args.variant.into(),
        &config.export,
        sink.as_mut(),
    );

    pb.finish_and_clear();

    let table = match result {
        Ok(table) => table,
        Err(err) => anyhow::bail!("{}", failure_status(&err)),
    };

    println!("{} {}", style("✓").green(), ImportStatus::Completed);
    println!(
        "{} {} rows written to {}",
        style("✓").green(),
        table.rows.len(),
        output_path.display()
    );

    if args.show_stats {
        print_stats(&table);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_stats(table: &NoticeTable) {
    let tier = table
        .stats
        .vendor_order_tier
        .map(|tier| format!("{:?}", tier))
        .unwrap_or_else(|| "not found".to_string());

    println!();
    println!("{} Tokens: {}", style("ℹ").blue(), table.stats.tokens);
    println!("{} Line items: {}", style("ℹ").blue(), table.stats.blocks);
    println!("{} Rows: {}", style("ℹ").blue(), table.rows.len());
    println!("{} Vendor order source: {}", style("ℹ").blue(), tier);
}
