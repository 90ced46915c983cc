use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use leadscout_core::{merge_batches, read_listings_csv, write_listings_csv};
use leadscout_engine::{Orchestrator, RunRequest, RunState};

#[derive(Debug, Parser)]
#[command(name = "leadscout-cli")]
#[command(about = "LeadScout command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a scraping pass and export the leads to CSV.
    Scrape {
        /// Geographic area to search, e.g. "Austin, TX".
        #[arg(long)]
        location: String,

        /// Comma-separated business categories, e.g. "plumbers,electricians".
        #[arg(long)]
        terms: String,

        /// Cap on listings collected per search term.
        #[arg(long, default_value_t = 20)]
        max_results: usize,

        /// Visit each listing's website and harvest contact emails.
        #[arg(long)]
        emails: bool,

        /// Directory for the output CSV (overrides LEADSCOUT_DATA_DIR).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Merge previously exported CSV files into one deduplicated file.
    Merge {
        /// CSV files to merge, earliest first. Earlier files win on
        /// duplicate place IDs.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path of the merged CSV.
        #[arg(long)]
        out: PathBuf,
    },
}

fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape {
            location,
            terms,
            max_results,
            emails,
            out_dir,
        } => scrape(location, &terms, max_results, emails, out_dir).await,
        Commands::Merge { files, out } => merge(&files, &out),
    }
}

async fn scrape(
    location: String,
    terms: &str,
    max_results: usize,
    emails: bool,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let search_terms = split_terms(terms);
    anyhow::ensure!(
        !search_terms.is_empty(),
        "--terms must name at least one category"
    );

    let mut config = leadscout_core::load_app_config()?;
    if let Some(dir) = out_dir {
        config.data_dir = dir;
    }

    let orchestrator = Orchestrator::from_config(&config)?;
    let mut status_rx = orchestrator.subscribe();

    let progress = tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let snapshot = status_rx.borrow_and_update().clone();
            if snapshot.is_running && !snapshot.message.is_empty() {
                println!("[{:>3}%] {}", snapshot.progress_percent, snapshot.message);
            }
        }
    });

    let outcome = orchestrator
        .run_blocking(RunRequest {
            search_terms,
            location,
            max_results,
            include_emails: emails,
        })
        .await
        .context("another run is active")?
        .context("scraping run failed")?;
    progress.abort();

    let status = orchestrator.status();
    if status.state == RunState::Completed {
        println!(
            "Done: {} leads written to {}",
            outcome.listings.len(),
            outcome.output_file.display()
        );
    }
    Ok(())
}

fn merge(files: &[PathBuf], out: &PathBuf) -> anyhow::Result<()> {
    let mut batches = Vec::with_capacity(files.len());
    for file in files {
        let listings = read_listings_csv(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        tracing::info!(file = %file.display(), rows = listings.len(), "loaded batch");
        batches.push(listings);
    }

    let merged = merge_batches(batches);
    write_listings_csv(out, &merged)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("Merged {} files into {} ({} leads)", files.len(), out.display(), merged.len());
    Ok(())
}
