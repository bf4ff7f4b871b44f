//! # Daily World News
//!
//! A two-stage batch pipeline that fetches international news from RSS
//! feeds and an optional NewsAPI headline source, deduplicates the items,
//! summarizes them through an AI backend (Qwen, OpenAI, or DeepSeek) with a
//! deterministic non-AI fallback, and renders a date-stamped Hexo blog post.
//!
//! ## Usage
//!
//! ```sh
//! daily_world_news fetch      # sources -> temp/raw_news.json
//! daily_world_news summarize  # temp/raw_news.json -> source/_posts/<date>-daily-international-news.md
//! ```
//!
//! ## Architecture
//!
//! The stages share only the intermediate snapshot file:
//! 1. **Fetch**: RSS sources (sequentially) + optional NewsAPI, then
//!    title-deduplication and a snapshot write
//! 2. **Summarize**: snapshot read, backend selection with fallback, post
//!    rendering
//!
//! Every data source is best-effort: a failing source degrades output
//! quality but never aborts the run. Only a missing/corrupt snapshot or an
//! empty article set aborts the summarize stage.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod aggregate;
mod api;
mod cli;
mod feeds;
mod models;
mod newsapi;
mod outputs;
mod snapshot;
mod sources;
mod summarize;
mod utils;

use cli::{Cli, Command};
use models::Article;
use newsapi::FetchOutcome;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.snapshot_path, ?args.posts_dir, "Parsed CLI arguments");

    match args.command {
        Command::Fetch => run_fetch(&args).await?,
        Command::Summarize => run_summarize(&args).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// The fetch stage: sources -> aggregate -> snapshot.
///
/// Always writes a snapshot, even when every source failed; an empty
/// snapshot is the summarize stage's signal that there is nothing to do.
async fn run_fetch(args: &Cli) -> Result<(), Box<dyn Error>> {
    info!("Starting international news fetch");

    let client = reqwest::Client::builder()
        .user_agent(concat!("daily_world_news/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let mut all_articles: Vec<Article> = Vec::new();

    // Sources are processed one at a time; each failure stays local.
    for source in sources::RSS_SOURCES {
        if !source.enabled {
            debug!(source = %source.name, "Source disabled; skipping");
            continue;
        }
        let articles = feeds::fetch_feed(&client, source).await;
        all_articles.extend(articles);
    }

    match newsapi::fetch_newsapi(&client, args.news_api_key.as_deref()).await {
        FetchOutcome::Fetched(articles) => all_articles.extend(articles),
        FetchOutcome::Skipped => {}
        FetchOutcome::Failed(reason) => {
            warn!(%reason, "NewsAPI contributed no articles");
        }
    }

    let total_fetched = all_articles.len();
    let unique = aggregate::dedupe_by_title(all_articles);
    info!(
        fetched = total_fetched,
        unique = unique.len(),
        "Aggregation finished"
    );

    let written = snapshot::write_snapshot(&args.snapshot_path, unique).await?;
    info!(
        path = %args.snapshot_path,
        total = written.total,
        "Fetch stage complete; snapshot ready for summarization"
    );

    Ok(())
}

/// The summarize stage: snapshot -> summary -> blog post.
///
/// Fails when the snapshot is missing/corrupt or holds zero articles;
/// everything else degrades to the fallback formatter.
async fn run_summarize(args: &Cli) -> Result<(), Box<dyn Error>> {
    info!("Starting AI summarization");

    let snapshot = match snapshot::read_snapshot(&args.snapshot_path).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(
                path = %args.snapshot_path,
                error = %e,
                "Cannot load news snapshot; did the fetch stage run?"
            );
            return Err(e);
        }
    };

    let articles = match snapshot.articles_to_summarize() {
        Ok(articles) => articles,
        Err(e) => {
            error!("Snapshot holds no articles; nothing to summarize");
            return Err(e);
        }
    };

    let summary = summarize::summarize(&args.summarize_config(), articles).await;
    let path = outputs::post::write_post(&args.posts_dir, &summary, articles).await?;

    info!(path = %path.display(), "Summarize stage complete");
    Ok(())
}
