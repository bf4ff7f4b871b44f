//! Order-stable deduplication of fetched articles.

use crate::models::Article;
use itertools::Itertools;
use tracing::info;

/// Remove duplicate articles by case-insensitive title, keeping the first
/// occurrence in input order.
///
/// The input is the concatenation of all per-source fetches followed by the
/// NewsAPI items, so "first occurrence" means first in source-then-API order.
pub fn dedupe_by_title(articles: Vec<Article>) -> Vec<Article> {
    let total = articles.len();
    let unique: Vec<Article> = articles
        .into_iter()
        .unique_by(|article| article.dedup_key())
        .collect();

    info!(fetched = total, unique = unique.len(), "Deduplicated articles");
    unique
}
