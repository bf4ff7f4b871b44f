//! Data models for fetched news articles and the intermediate snapshot.
//!
//! This module defines the core data structures shared by both pipeline
//! stages:
//! - [`Article`]: A normalized news item from an RSS feed or NewsAPI
//! - [`SourceDescriptor`]: Static configuration for one RSS source
//! - [`Snapshot`]: The deduplicated article set written between stages
//!
//! The snapshot JSON layout (`timestamp`, `total`, `articles`) is the sole
//! interface between the `fetch` and `summarize` stages.

use serde::{Deserialize, Serialize};

/// A normalized news article.
///
/// Articles are immutable once created. Identity for deduplication is the
/// lower-cased title (see [`Article::dedup_key`]); no other field
/// participates in equality. The `published` field keeps whatever timestamp
/// string the source provided and is never normalized.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// A short summary or description; may be truncated for display/prompts.
    pub summary: String,
    /// Link to the original article. May be empty when the source omits it.
    pub link: String,
    /// Publication timestamp as reported by the source.
    pub published: String,
    /// Human-readable source label (e.g. "BBC World", "NewsAPI - Reuters").
    pub source: String,
}

impl Article {
    /// The deduplication key: the lower-cased title.
    pub fn dedup_key(&self) -> String {
        self.title.to_lowercase()
    }
}

/// Static configuration for one RSS source.
///
/// The registry of sources lives in [`crate::sources::RSS_SOURCES`];
/// descriptors are compile-time constants and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct SourceDescriptor {
    /// Display name used as the article `source` label.
    pub name: &'static str,
    /// Feed URL.
    pub url: &'static str,
    /// Disabled sources are skipped entirely, not even attempted.
    pub enabled: bool,
}

/// The intermediate document connecting the fetch and summarize stages.
///
/// Written once per pipeline run by the fetch stage and read once by the
/// summarize stage; full overwrite, never updated in place.
///
/// Invariant: `total == articles.len()`.
#[derive(Debug, Deserialize, Serialize)]
pub struct Snapshot {
    /// Capture time in ISO-8601 UTC.
    pub timestamp: String,
    /// Number of deduplicated articles.
    pub total: usize,
    /// The deduplicated articles in first-seen order.
    pub articles: Vec<Article>,
}

impl Snapshot {
    /// Build a snapshot from a deduplicated article list, stamped with the
    /// current UTC time.
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            total: articles.len(),
            articles,
        }
    }

    /// Borrow the articles for summarization, refusing an empty snapshot.
    ///
    /// An empty capture means the fetch stage found nothing; the summarize
    /// stage aborts without producing a post.
    pub fn articles_to_summarize(&self) -> Result<&[Article], Box<dyn std::error::Error>> {
        if self.articles.is_empty() {
            return Err("nothing to summarize: snapshot is empty".into());
        }
        Ok(&self.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            summary: "Summary".to_string(),
            link: "https://example.com/a".to_string(),
            published: "Mon, 06 May 2025 12:00:00 GMT".to_string(),
            source: "BBC World".to_string(),
        }
    }

    #[test]
    fn test_dedup_key_lowercases_title() {
        assert_eq!(article("Breaking NEWS").dedup_key(), "breaking news");
        assert_eq!(article("breaking news").dedup_key(), "breaking news");
    }

    #[test]
    fn test_snapshot_new_sets_total() {
        let snapshot = Snapshot::new(vec![article("One"), article("Two")]);
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.total, snapshot.articles.len());
        assert!(!snapshot.timestamp.is_empty());
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = Snapshot {
            timestamp: "2025-05-06T08:00:00.000000".to_string(),
            total: 1,
            articles: vec![article("Test Article")],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("2025-05-06T08:00:00.000000"));
        assert!(json.contains("Test Article"));
    }

    #[test]
    fn test_snapshot_deserialization() {
        let json = r#"{
            "timestamp": "2025-05-06T08:00:00.000000",
            "total": 0,
            "articles": []
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.timestamp, "2025-05-06T08:00:00.000000");
        assert_eq!(snapshot.total, 0);
        assert!(snapshot.articles.is_empty());
    }

    #[test]
    fn test_empty_snapshot_refuses_summarization() {
        let snapshot = Snapshot::new(Vec::new());
        let err = snapshot.articles_to_summarize().unwrap_err();
        assert!(err.to_string().contains("nothing to summarize"));
    }

    #[test]
    fn test_populated_snapshot_yields_articles() {
        let snapshot = Snapshot::new(vec![article("One"), article("Two")]);
        let articles = snapshot.articles_to_summarize().unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "One");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let snapshot = Snapshot {
            timestamp: "2025-05-06T08:00:00.000000".to_string(),
            total: 2,
            articles: vec![article("国际新闻一"), article("Second story")],
        };

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.timestamp, snapshot.timestamp);
        assert_eq!(restored.total, snapshot.total);
        assert_eq!(restored.articles, snapshot.articles);
    }
}
