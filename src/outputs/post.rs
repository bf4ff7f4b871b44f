//! Rendering of the daily blog post document.
//!
//! The post consists of a YAML front-matter block (title templated with the
//! current date, fixed categories/tags, a short description), the summary
//! body verbatim, the sorted list of distinct source labels, a numbered
//! link list for the first ten articles, and a fixed informational footer
//! carrying the generation timestamp.

use crate::models::Article;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Articles linked in the 相关链接 section, at most.
pub const LINKED_ARTICLE_LIMIT: usize = 10;

/// Assemble the full post document.
///
/// Pure function of the summary body, the articles, and the generation
/// time; the async writer wraps it with the current UTC time.
pub fn build_post(summary: &str, articles: &[Article], now: DateTime<Utc>) -> String {
    let date_str = now.format("%Y-%m-%d").to_string();
    let datetime_str = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let mut content = format!(
        "---\n\
         title: 国际新闻热点 {date}\n\
         date: {datetime}\n\
         categories:\n\
         \x20 - 国际新闻\n\
         tags:\n\
         \x20 - 每日新闻\n\
         \x20 - AI总结\n\
         \x20 - 国际动态\n\
         description: 今日国际新闻热点 AI 智能总结，涵盖政治、经济、科技等领域重要新闻\n\
         ---\n\
         \n\
         > 📰 本文由 AI 自动生成，精选今日国际重要新闻，每日更新\n\
         \n\
         ## 📊 今日新闻概览\n\
         \n\
         {summary}\n\
         \n\
         ---\n\
         \n\
         ## 📚 新闻来源\n\
         \n\
         本文内容汇总自以下可信新闻源：\n\
         \n",
        date = date_str,
        datetime = datetime_str,
        summary = summary,
    );

    // Distinct source labels, alphabetically sorted, once each.
    let sources: BTreeSet<&str> = articles.iter().map(|a| a.source.as_str()).collect();
    for source in sources {
        let _ = writeln!(content, "- {}", source);
    }

    content.push_str("\n\n---\n\n## 🔗 相关链接\n\n");

    // Numbering follows the article's position, so a skipped empty link
    // leaves a gap rather than renumbering.
    for (i, article) in articles.iter().take(LINKED_ARTICLE_LIMIT).enumerate() {
        if !article.link.is_empty() {
            let _ = writeln!(content, "{}. [{}]({})", i + 1, article.title, article.link);
        }
    }

    let _ = write!(
        content,
        "\n\n---\n\n\
         ## ℹ️ 关于本文\n\
         \n\
         - **生成时间**：{} UTC\n\
         - **数据来源**：多个国际主流新闻媒体\n\
         - **总结方式**：AI 智能分析与提炼\n\
         - **更新频率**：每日自动更新\n\
         \n\
         > 💡 提示：本文由自动化系统生成，旨在提供快速的新闻概览。详细内容请点击原文链接查看。\n",
        datetime_str,
    );

    content
}

/// Render the post and write it to
/// `{posts_dir}/{YYYY-MM-DD}-daily-international-news.md`.
///
/// Creates the posts directory as needed and overwrites any post already
/// written for the same day. Returns the path written.
#[instrument(level = "info", skip_all, fields(posts_dir = %posts_dir.as_ref().display()))]
pub async fn write_post(
    posts_dir: impl AsRef<Path>,
    summary: &str,
    articles: &[Article],
) -> Result<PathBuf, Box<dyn Error>> {
    let now = Utc::now();
    let content = build_post(summary, articles, now);

    let posts_dir = posts_dir.as_ref();
    fs::create_dir_all(posts_dir).await?;

    let filename = format!("{}-daily-international-news.md", now.format("%Y-%m-%d"));
    let path = posts_dir.join(filename);
    fs::write(&path, content).await?;

    info!(path = %path.display(), "Wrote blog post");
    Ok(path)
}
