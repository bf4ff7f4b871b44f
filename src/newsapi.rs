//! Optional NewsAPI top-headlines fetcher.
//!
//! NewsAPI participation is gated on a `NEWS_API_KEY` credential. Without
//! one, the fetcher no-ops silently (logged as skipped, no network access).
//! With one, it issues a single bounded request and maps the returned items
//! into [`Article`] records. Any request or parse error degrades to an
//! empty result, the same local-failure policy applied to RSS sources.

use crate::models::Article;
use crate::summarize::SNIPPET_CHARS;
use crate::utils::truncate_chars;
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use tracing::{info, instrument, warn};
use url::Url;

/// Maximum number of headlines mapped from a NewsAPI response.
pub const NEWSAPI_LIMIT: usize = 5;

const NEWSAPI_URL: &str = "https://newsapi.org/v2/top-headlines";

/// Outcome of the optional NewsAPI fetch.
///
/// Keeping "not configured" distinct from "call failed" lets the caller log
/// the two cases differently; both contribute zero articles.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The request succeeded; may still carry zero articles.
    Fetched(Vec<Article>),
    /// No API key configured; the request was never attempted.
    Skipped,
    /// The request or response handling failed.
    Failed(String),
}

/// Fetch top headlines from NewsAPI, if an API key is configured.
#[instrument(level = "info", skip_all)]
pub async fn fetch_newsapi(client: &Client, api_key: Option<&str>) -> FetchOutcome {
    let Some(api_key) = api_key else {
        info!("NEWS_API_KEY not configured; skipping NewsAPI");
        return FetchOutcome::Skipped;
    };

    info!("Fetching top headlines from NewsAPI");
    match try_fetch_newsapi(client, api_key).await {
        Ok(articles) => {
            info!(count = articles.len(), "NewsAPI fetch succeeded");
            FetchOutcome::Fetched(articles)
        }
        Err(e) => {
            warn!(error = %e, "NewsAPI fetch failed; continuing without it");
            FetchOutcome::Failed(e.to_string())
        }
    }
}

async fn try_fetch_newsapi(client: &Client, api_key: &str) -> Result<Vec<Article>, Box<dyn Error>> {
    let url = Url::parse_with_params(
        NEWSAPI_URL,
        &[
            ("apiKey", api_key),
            ("language", "en"),
            ("pageSize", "10"),
            ("category", "general"),
        ],
    )?;

    let response = client.get(url).send().await?.error_for_status()?;
    let body: HeadlinesResponse = response.json().await?;

    Ok(body
        .articles
        .into_iter()
        .take(NEWSAPI_LIMIT)
        .map(item_to_article)
        .collect())
}

fn item_to_article(item: HeadlineItem) -> Article {
    let provider = item
        .source
        .and_then(|s| s.name)
        .unwrap_or_else(|| "Unknown".to_string());

    Article {
        title: item.title.unwrap_or_default(),
        summary: truncate_chars(&item.description.unwrap_or_default(), SNIPPET_CHARS).to_string(),
        link: item.url.unwrap_or_default(),
        published: item.published_at.unwrap_or_default(),
        source: format!("NewsAPI - {}", provider),
    }
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<HeadlineItem>,
}

#[derive(Debug, Deserialize)]
struct HeadlineItem {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<HeadlineSource>,
}

#[derive(Debug, Deserialize)]
struct HeadlineSource {
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_mapping_synthesizes_source_label() {
        let body: HeadlinesResponse = serde_json::from_str(
            r#"{
                "status": "ok",
                "articles": [{
                    "title": "Headline",
                    "description": "Details here.",
                    "url": "https://example.com/h",
                    "publishedAt": "2025-05-06T08:00:00Z",
                    "source": {"id": null, "name": "Reuters"}
                }]
            }"#,
        )
        .unwrap();

        let article = item_to_article(body.articles.into_iter().next().unwrap());
        assert_eq!(article.source, "NewsAPI - Reuters");
        assert_eq!(article.title, "Headline");
        assert_eq!(article.published, "2025-05-06T08:00:00Z");
    }

    #[test]
    fn test_item_mapping_unknown_provider_and_nulls() {
        let item: HeadlineItem = serde_json::from_str(
            r#"{"title": null, "description": null, "url": null, "publishedAt": null, "source": null}"#,
        )
        .unwrap();

        let article = item_to_article(item);
        assert_eq!(article.source, "NewsAPI - Unknown");
        assert_eq!(article.title, "");
        assert_eq!(article.link, "");
    }

    #[test]
    fn test_item_mapping_truncates_description() {
        let long = "d".repeat(400);
        let item = HeadlineItem {
            title: Some("T".to_string()),
            description: Some(long),
            url: Some("https://example.com".to_string()),
            published_at: None,
            source: None,
        };

        let article = item_to_article(item);
        assert_eq!(article.summary.chars().count(), SNIPPET_CHARS);
    }

    #[tokio::test]
    async fn test_fetch_without_key_skips() {
        let client = Client::new();
        match fetch_newsapi(&client, None).await {
            FetchOutcome::Skipped => {}
            other => panic!("expected Skipped, got {:?}", other),
        }
    }
}
