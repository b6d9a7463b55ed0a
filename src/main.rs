//! PageSift main entry point
//!
//! This is the command-line interface for the PageSift website crawler.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pagesift::config::{validate_seed, CrawlOptions};
use pagesift::crawler::crawl;
use pagesift::enrich::{Enricher, DEFAULT_ANALYSIS_PROMPT};
use tracing_subscriber::EnvFilter;

/// PageSift: a bounded, polite website crawler
///
/// PageSift walks a website breadth-first from a seed URL, converts each
/// page to markdown, extracts metadata and links, and prints a JSON report
/// to stdout. Page and depth budgets, domain containment, and a politeness
/// delay keep the crawl bounded.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version)]
#[command(about = "A bounded, polite website crawler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a website and print a JSON report to stdout
    Crawl(CrawlArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Seed URL to start crawling from
    #[arg(long)]
    url: String,

    /// Maximum number of pages to process
    #[arg(long, default_value_t = 20)]
    max_pages: usize,

    /// Maximum link depth from the seed (0 crawls only the seed)
    #[arg(long, default_value_t = 3)]
    max_depth: usize,

    /// Politeness delay between page fetches, in seconds (0 to 3600)
    #[arg(long, default_value_t = 1.0)]
    delay_seconds: f64,

    /// Stay on the seed's host (default)
    #[arg(long, overrides_with = "no_same_domain_only")]
    same_domain_only: bool,

    /// Follow links to other hosts
    #[arg(long, overrides_with = "same_domain_only")]
    no_same_domain_only: bool,

    /// Only crawl URLs matching at least one of these patterns
    #[arg(long, num_args = 1..)]
    include_patterns: Option<Vec<String>>,

    /// Never crawl URLs matching any of these patterns
    #[arg(long, num_args = 1..)]
    exclude_patterns: Option<Vec<String>>,

    /// Analyze each page with the OpenAI API (requires OPENAI_API_KEY)
    #[arg(long)]
    ai_analysis: bool,

    /// Instruction given to the analysis model
    #[arg(long, default_value = DEFAULT_ANALYSIS_PROMPT)]
    ai_prompt: String,

    /// Accepted for interface stability; robots.txt is not enforced
    #[arg(long)]
    respect_robots: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Crawl(args) => run_crawl(args).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Diagnostics go to stderr; stdout belongs to the JSON report. At the
/// default verbosity, RUST_LOG overrides the built-in filter.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pagesift=info,warn")),
            1 => EnvFilter::new("pagesift=debug,info"),
            2 => EnvFilter::new("pagesift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl subcommand
async fn run_crawl(args: CrawlArgs) -> anyhow::Result<()> {
    let seed = validate_seed(&args.url)?;

    // --same-domain-only is the default; the negative flag turns it off.
    let same_domain_only = args.same_domain_only || !args.no_same_domain_only;

    let options = CrawlOptions {
        max_pages: args.max_pages,
        max_depth: args.max_depth,
        delay_seconds: args.delay_seconds,
        same_domain_only,
        include_patterns: args.include_patterns,
        exclude_patterns: args
            .exclude_patterns
            .unwrap_or_else(CrawlOptions::default_exclude_patterns),
        respect_robots: args.respect_robots,
    };

    let enricher = if args.ai_analysis {
        let api_key = std::env::var("OPENAI_API_KEY").ok();
        if api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; analysis will be degraded");
        }
        Some(
            Enricher::new(api_key, args.ai_prompt)
                .context("failed to build the analysis client")?,
        )
    } else {
        None
    };

    let report = crawl(seed, options, enricher).await?;

    let json = serde_json::to_string_pretty(&report).context("failed to serialize the report")?;
    println!("{json}");

    Ok(())
}
