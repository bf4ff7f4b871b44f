//! RSS feed fetching and normalization.
//!
//! Each source is fetched and parsed independently. A source that is
//! unreachable, unparseable, or empty yields zero articles and a log line;
//! it never aborts the pipeline. At most [`PER_SOURCE_LIMIT`] entries are
//! taken per source, in feed order.

use crate::models::{Article, SourceDescriptor};
use crate::sources::PER_SOURCE_LIMIT;
use feed_rs::parser;
use reqwest::Client;
use std::error::Error;
use tracing::{info, instrument, warn};

/// Fetch one RSS source and normalize its entries into [`Article`] records.
///
/// All failures are local: any HTTP or parse error is logged and converted
/// into an empty result. Callers are expected to skip disabled sources
/// before calling.
#[instrument(level = "info", skip_all, fields(source = %source.name))]
pub async fn fetch_feed(client: &Client, source: &SourceDescriptor) -> Vec<Article> {
    info!(url = %source.url, "Fetching RSS source");

    match try_fetch_feed(client, source).await {
        Ok(articles) if articles.is_empty() => {
            warn!("Source returned no entries");
            Vec::new()
        }
        Ok(articles) => {
            info!(count = articles.len(), "Fetched source successfully");
            articles
        }
        Err(e) => {
            warn!(error = %e, "Source fetch failed; continuing without it");
            Vec::new()
        }
    }
}

async fn try_fetch_feed(
    client: &Client,
    source: &SourceDescriptor,
) -> Result<Vec<Article>, Box<dyn Error>> {
    let response = client.get(source.url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    let feed = parser::parse(&body[..])?;

    let articles = feed
        .entries
        .into_iter()
        .take(PER_SOURCE_LIMIT)
        .map(|entry| entry_to_article(entry, source.name))
        .collect();

    Ok(articles)
}

/// Map one feed entry to an [`Article`], defaulting missing fields to
/// empty/placeholder strings rather than failing.
fn entry_to_article(entry: feed_rs::model::Entry, source_name: &str) -> Article {
    let title = entry
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "No title".to_string());

    // Prefer the summary; fall back to the content body like the feed's
    // description field.
    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_default();

    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();

    let published = entry
        .published
        .map(|dt| dt.to_rfc2822())
        .unwrap_or_default();

    Article {
        title,
        summary,
        link,
        published,
        source: source_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com</link>
    <item>
      <title>First story</title>
      <description>Something happened.</description>
      <link>https://example.com/1</link>
      <pubDate>Tue, 06 May 2025 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second story</title>
      <link>https://example.com/2</link>
    </item>
    <item><title>s3</title><link>https://example.com/3</link></item>
    <item><title>s4</title><link>https://example.com/4</link></item>
    <item><title>s5</title><link>https://example.com/5</link></item>
    <item><title>s6</title><link>https://example.com/6</link></item>
  </channel>
</rss>"#;

    #[test]
    fn test_entry_mapping_fills_fields() {
        let feed = parser::parse(SAMPLE_RSS.as_bytes()).unwrap();
        let entry = feed.entries.into_iter().next().unwrap();
        let article = entry_to_article(entry, "Test Feed");

        assert_eq!(article.title, "First story");
        assert_eq!(article.summary, "Something happened.");
        assert_eq!(article.link, "https://example.com/1");
        assert!(article.published.contains("2025"));
        assert_eq!(article.source, "Test Feed");
    }

    #[test]
    fn test_entry_mapping_defaults_missing_fields() {
        let feed = parser::parse(SAMPLE_RSS.as_bytes()).unwrap();
        let entry = feed.entries.into_iter().nth(1).unwrap();
        let article = entry_to_article(entry, "Test Feed");

        assert_eq!(article.title, "Second story");
        assert_eq!(article.summary, "");
        assert_eq!(article.published, "");
    }

    #[test]
    fn test_per_source_limit_applied() {
        let feed = parser::parse(SAMPLE_RSS.as_bytes()).unwrap();
        let articles: Vec<Article> = feed
            .entries
            .into_iter()
            .take(PER_SOURCE_LIMIT)
            .map(|e| entry_to_article(e, "Test Feed"))
            .collect();
        assert_eq!(articles.len(), PER_SOURCE_LIMIT);
        assert_eq!(articles[4].title, "s5");
    }
}
