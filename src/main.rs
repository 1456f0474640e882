//! Snapcrawl main entry point
//!
//! This is the command-line interface for the snapcrawl page and image
//! archiver.

use clap::Parser;
use snapcrawl::config::build_config;
use snapcrawl::crawler::Coordinator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Snapcrawl: a bounded web page and image archiver
///
/// Snapcrawl fetches a seed page and a bounded neighborhood of linked pages
/// on the same site, saving each page's text and embedded images into a
/// dated archive directory.
#[derive(Parser, Debug)]
#[command(name = "snapcrawl")]
#[command(version)]
#[command(about = "Archive a web page and its neighborhood", long_about = None)]
struct Cli {
    /// The URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed_url: String,

    /// Maximum number of pages to fetch
    #[arg(short = 'p', long, default_value_t = 10)]
    max_pages: usize,

    /// Maximum link depth from the seed page
    #[arg(short = 'd', long, default_value_t = 2)]
    max_depth: u32,

    /// Per-request timeout in seconds
    #[arg(short = 't', long, default_value_t = 10)]
    timeout: u64,

    /// Number of concurrent image download workers
    #[arg(short = 'c', long, default_value_t = 5)]
    concurrency: usize,

    /// Directory under which the archive is created
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    // Configuration and archive setup failures are fatal; anything that goes
    // wrong after the crawl starts is counted in the report instead.
    let config = build_config(
        &cli.seed_url,
        cli.max_pages,
        cli.max_depth,
        cli.timeout,
        cli.concurrency,
    )?;

    let coordinator = Coordinator::new(config, &cli.output)?;
    let output_root = coordinator.output_root().to_path_buf();

    let report = coordinator.run().await;

    println!("Crawl complete.");
    println!("  Pages fetched:     {}", report.pages_fetched);
    println!("  Texts saved:       {}", report.texts_saved);
    println!("  Images downloaded: {}", report.images_downloaded);
    println!("  Errors:            {}", report.errors);
    println!("  Archive:           {}", output_root.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("snapcrawl=info,warn"),
        1 => EnvFilter::new("snapcrawl=debug,info"),
        2 => EnvFilter::new("snapcrawl=trace,debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
