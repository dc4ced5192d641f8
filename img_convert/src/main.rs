use anyhow::Context;
use clap::Parser;
use img_convert::{convert_batch, ConversionRequest, DecodePolicy, WriteStrategy};
use shared_utils::logging::{init_logging, LogConfig};
use shared_utils::{print_error, print_success, print_summary_report};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "img-convert")]
#[command(version, about = "Batch JPG ⇄ PNG converter with optional target file size", long_about = None)]
struct Cli {
    /// Folder holding the source images (not searched recursively)
    #[arg(value_name = "INPUT_DIR")]
    input: PathBuf,

    /// Destination folder, created if missing
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,

    /// 1 / jpg-to-png, or 2 / png-to-jpg
    #[arg(short, long, default_value = "1")]
    direction: String,

    /// Per-file size ceiling in KB; 0 means no target
    #[arg(short = 's', long)]
    target_size_kb: Option<u64>,

    /// JPEG quality level 1 (smallest) to 5 (best)
    #[arg(short = 'q', long, allow_negative_numbers = true)]
    quality_level: Option<i64>,

    /// Skip files that fail to decode instead of stopping
    #[arg(long)]
    skip_corrupt: bool,

    /// Keep trial encodes in memory and write only the final one
    #[arg(long)]
    in_memory_search: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    if let Err(e) = init_logging("img_convert", LogConfig::default().with_level(level)) {
        eprintln!("⚠️  Logging disabled: {e:#}");
    }

    if let Err(e) = run(cli) {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let request = ConversionRequest::from_user_input(
        &cli.input,
        &cli.output,
        &cli.direction,
        cli.target_size_kb,
        cli.quality_level,
    )?
    .with_decode_policy(if cli.skip_corrupt {
        DecodePolicy::Skip
    } else {
        DecodePolicy::Abort
    })
    .with_write_strategy(if cli.in_memory_search {
        WriteStrategy::FinalOnly
    } else {
        WriteStrategy::EveryAttempt
    });

    let direction = request.direction();
    let report = convert_batch(request).with_context(|| {
        format!(
            "{} conversion of {} failed",
            direction,
            cli.input.display()
        )
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = report.summary();
    tracing::debug!(
        written = summary.written(),
        skipped = summary.skipped,
        "Batch finished"
    );
    print_summary_report(
        &summary,
        report.elapsed(),
        report.input_bytes(),
        report.output_bytes(),
        direction.label(),
    );
    print_success("Conversion completed!");
    Ok(())
}
