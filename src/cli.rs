//! Command-line interface definitions.
//!
//! The two pipeline stages are exposed as subcommands with no per-stage
//! flags; all behavior is driven by configuration. Credentials and the
//! backend selection come from the environment (`AI_PROVIDER`,
//! `QWEN_API_KEY`, `OPENAI_API_KEY`, `DEEPSEEK_API_KEY`, `NEWS_API_KEY`),
//! bound here through clap so the whole configuration is assembled once at
//! startup and passed down explicitly.

use crate::summarize::{Provider, SummarizeConfig};
use clap::{Parser, Subcommand};

/// Command-line arguments for the daily news pipeline.
///
/// # Examples
///
/// ```sh
/// # Fetch news into the intermediate snapshot
/// daily_world_news fetch
///
/// # Summarize the snapshot and render today's post
/// AI_PROVIDER=deepseek DEEPSEEK_API_KEY=... daily_world_news summarize
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the intermediate news snapshot
    #[arg(long, default_value = "temp/raw_news.json")]
    pub snapshot_path: String,

    /// Output directory for rendered blog posts
    #[arg(long, default_value = "source/_posts")]
    pub posts_dir: String,

    /// AI backend used by the summarize stage
    #[arg(long, env = "AI_PROVIDER", value_enum, default_value = "qwen")]
    pub ai_provider: Provider,

    /// DashScope API key for the Qwen backend
    #[arg(long, env = "QWEN_API_KEY", hide_env_values = true)]
    pub qwen_api_key: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// DeepSeek API key
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub deepseek_api_key: Option<String>,

    /// NewsAPI key; enables the optional headline fetcher
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,
}

/// The pipeline stage to run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch news from all sources, deduplicate, and write the snapshot
    Fetch,
    /// Summarize the snapshot and render today's blog post
    Summarize,
}

impl Cli {
    /// Extract the summarization-stage configuration.
    pub fn summarize_config(&self) -> SummarizeConfig {
        SummarizeConfig {
            provider: self.ai_provider,
            qwen_api_key: self.qwen_api_key.clone(),
            openai_api_key: self.openai_api_key.clone(),
            deepseek_api_key: self.deepseek_api_key.clone(),
        }
    }
}
