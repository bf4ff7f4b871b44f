//! The static registry of international news RSS sources.
//!
//! Each source can be toggled independently; disabled sources are skipped
//! by the fetch stage without being attempted.

use crate::models::SourceDescriptor;

/// Maximum number of articles taken from each RSS source, in feed order.
pub const PER_SOURCE_LIMIT: usize = 5;

/// The ordered list of configured RSS sources.
pub const RSS_SOURCES: &[SourceDescriptor] = &[
    SourceDescriptor {
        name: "BBC World",
        url: "https://feeds.bbci.co.uk/news/world/rss.xml",
        enabled: true,
    },
    SourceDescriptor {
        name: "CNN World",
        url: "http://rss.cnn.com/rss/edition_world.rss",
        enabled: true,
    },
    SourceDescriptor {
        name: "Reuters World",
        url: "https://www.reutersagency.com/feed/?taxonomy=best-topics&post_type=best",
        enabled: true,
    },
    SourceDescriptor {
        name: "Google News",
        url: "https://news.google.com/rss?hl=en-US&gl=US&ceid=US:en",
        enabled: true,
    },
    SourceDescriptor {
        name: "The Guardian World",
        url: "https://www.theguardian.com/world/rss",
        enabled: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_five_sources() {
        assert_eq!(RSS_SOURCES.len(), 5);
    }

    #[test]
    fn test_source_names_are_distinct() {
        let mut names: Vec<&str> = RSS_SOURCES.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), RSS_SOURCES.len());
    }

    #[test]
    fn test_source_urls_parse() {
        for source in RSS_SOURCES {
            assert!(url::Url::parse(source.url).is_ok(), "bad url for {}", source.name);
        }
    }
}
