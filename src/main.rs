//! CLI entry point for lectern.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};

use lectern_core::convert::ConvertSettings;
use lectern_core::{CrawlConfig, HttpClient, pipeline};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Lectern starting");

    // Malformed patterns fail here, before any network activity.
    let config = CrawlConfig::new(
        args.start_url,
        &args.week_pattern,
        &args.lecture_pattern,
        args.subdir,
    )?;

    let convert_settings = (!args.no_convert).then_some(ConvertSettings {
        dpi: args.dpi,
        jpeg_quality: args.jpeg_quality,
    });

    let client = HttpClient::new();
    let report = pipeline::run(
        &client,
        &config,
        &args.output,
        &args.prefix,
        convert_settings,
    )
    .await?;

    info!(
        pages = report.pages_scanned,
        downloaded = report.downloaded(),
        skipped = report.download_skipped(),
        converted = report.converted(),
        failed = report.conversion_failures().len(),
        dir = %report.download_dir.display(),
        "run complete"
    );
    for failure in report.conversion_failures() {
        warn!(filename = %failure.filename, outcome = ?failure.outcome, "conversion failed");
    }

    Ok(())
}
