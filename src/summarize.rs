//! Summarization backend selection, prompt construction, and the
//! deterministic fallback formatter.
//!
//! One backend is chosen by the `AI_PROVIDER` configuration value (default:
//! Qwen). Exactly one backend is attempted per run; a missing credential, a
//! transport failure, or a bad response all collapse to "no summary", after
//! which [`fallback_summary`] formats the articles without AI. The fallback
//! cannot fail, so the summarize stage always has a body to render as long
//! as at least one article exists.
//!
//! # Truncation constants
//!
//! The per-destination snippet lengths are deliberately distinct:
//! [`PROMPT_SNIPPET_CHARS`] (200) feeds the AI prompts while
//! [`SNIPPET_CHARS`] (150) feeds the fallback formatter and the NewsAPI
//! mapping. Do not unify them.

use crate::api::{ChatClient, DashScopeClient};
use crate::models::Article;
use crate::utils::truncate_chars;
use clap::ValueEnum;
use tracing::{error, info, instrument, warn};

/// Articles included in an AI prompt, at most.
pub const PROMPT_ARTICLE_LIMIT: usize = 10;
/// Article summary cap (in chars) inside AI prompts.
pub const PROMPT_SNIPPET_CHARS: usize = 200;
/// Article summary cap (in chars) in the fallback formatter and the
/// NewsAPI mapping.
pub const SNIPPET_CHARS: usize = 150;
/// Articles included in the fallback summary, at most.
pub const FALLBACK_ARTICLE_LIMIT: usize = 8;

/// The configured summarization backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// Qwen via DashScope (free tier available).
    Qwen,
    /// OpenAI `gpt-3.5-turbo`.
    Openai,
    /// DeepSeek's OpenAI-compatible API.
    Deepseek,
    /// No AI; always use the fallback formatter.
    None,
}

/// Configuration for the summarization stage, assembled once at startup.
#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    pub provider: Provider,
    pub qwen_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub deepseek_api_key: Option<String>,
}

/// Produce the summary body for the given articles.
///
/// Attempts the configured backend, then falls back unconditionally to
/// [`fallback_summary`] if it produced nothing. No retry across backends.
#[instrument(level = "info", skip_all, fields(provider = ?config.provider, count = articles.len()))]
pub async fn summarize(config: &SummarizeConfig, articles: &[Article]) -> String {
    let attempted = match config.provider {
        Provider::Qwen => summarize_with_qwen(config.qwen_api_key.as_deref(), articles).await,
        Provider::Openai => summarize_with_openai(config.openai_api_key.as_deref(), articles).await,
        Provider::Deepseek => {
            summarize_with_deepseek(config.deepseek_api_key.as_deref(), articles).await
        }
        Provider::None => {
            info!("AI provider set to none");
            None
        }
    };

    match attempted {
        Some(summary) => summary,
        None => {
            warn!("No AI summary produced; using fallback formatter");
            fallback_summary(articles)
        }
    }
}

/// Summarize with Qwen via DashScope.
async fn summarize_with_qwen(api_key: Option<&str>, articles: &[Article]) -> Option<String> {
    let Some(api_key) = api_key else {
        warn!("QWEN_API_KEY not configured; skipping Qwen");
        return None;
    };

    info!("Summarizing with Qwen");
    let client = DashScopeClient::qwen(api_key);
    match client.ask(&qwen_prompt(articles)).await {
        Ok(summary) => {
            info!("Qwen summary completed");
            Some(summary)
        }
        Err(e) => {
            error!(error = %e, "Qwen summarization failed");
            None
        }
    }
}

/// Summarize with OpenAI.
async fn summarize_with_openai(api_key: Option<&str>, articles: &[Article]) -> Option<String> {
    let Some(api_key) = api_key else {
        warn!("OPENAI_API_KEY not configured; skipping OpenAI");
        return None;
    };

    info!("Summarizing with OpenAI");
    let client = ChatClient::openai(api_key);
    match client.ask(&chat_prompt(articles)).await {
        Ok(summary) => {
            info!("OpenAI summary completed");
            Some(summary)
        }
        Err(e) => {
            error!(error = %e, "OpenAI summarization failed");
            None
        }
    }
}

/// Summarize with DeepSeek.
async fn summarize_with_deepseek(api_key: Option<&str>, articles: &[Article]) -> Option<String> {
    let Some(api_key) = api_key else {
        warn!("DEEPSEEK_API_KEY not configured; skipping DeepSeek");
        return None;
    };

    info!("Summarizing with DeepSeek");
    let client = ChatClient::deepseek(api_key);
    match client.ask(&chat_prompt(articles)).await {
        Ok(summary) => {
            info!("DeepSeek summary completed");
            Some(summary)
        }
        Err(e) => {
            error!(error = %e, "DeepSeek summarization failed");
            None
        }
    }
}

/// Build the Qwen prompt: a detailed editorial brief with a numbered
/// article listing (title, source label, 200-char snippet).
fn qwen_prompt(articles: &[Article]) -> String {
    let news_text = articles
        .iter()
        .take(PROMPT_ARTICLE_LIMIT)
        .enumerate()
        .map(|(i, article)| {
            format!(
                "【{}】标题：{}\n来源：{}\n简介：{}...",
                i + 1,
                article.title,
                article.source,
                truncate_chars(&article.summary, PROMPT_SNIPPET_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "请以专业新闻编辑的角度，用中文总结今天的国际新闻热点。\n\n\
         要求：\n\
         1. 从以下新闻中选出 5-8 条最重要、最有影响力的新闻\n\
         2. 每条新闻用简洁的语言概括（50-80字）\n\
         3. 保持客观中立的报道风格\n\
         4. 按重要性排序\n\
         5. 格式：## 标题\n\n内容\n\n---\n\n\
         原始新闻：\n\n\
         {}\n\n\
         请开始总结：",
        news_text
    )
}

/// Build the compact prompt shared by the OpenAI and DeepSeek backends.
fn chat_prompt(articles: &[Article]) -> String {
    let news_text = articles
        .iter()
        .take(PROMPT_ARTICLE_LIMIT)
        .enumerate()
        .map(|(i, article)| {
            format!(
                "[{}] {}\n{}",
                i + 1,
                article.title,
                truncate_chars(&article.summary, PROMPT_SNIPPET_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "请用中文总结今天的国际新闻热点，选出 5-8 条最重要的新闻，每条 50-80 字概括。\n\n\
         原始新闻：\n\
         {}",
        news_text
    )
}

/// Format a summary without AI: numbered headings, a source line, a
/// 150-char snippet, and a link reference for up to eight articles.
///
/// Pure function of the input articles; cannot fail. Used both when no AI
/// backend is configured and as the universal fallback when one fails.
pub fn fallback_summary(articles: &[Article]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (i, article) in articles.iter().take(FALLBACK_ARTICLE_LIMIT).enumerate() {
        parts.push(format!("## {}. {}", i + 1, article.title));
        parts.push(format!("\n**来源**：{}", article.source));
        parts.push(format!("\n{}...", truncate_chars(&article.summary, SNIPPET_CHARS)));
        parts.push(format!("\n\n[📰 阅读原文]({})", article.link));
        parts.push("\n\n---\n".to_string());
    }
    parts.join("\n")
}
