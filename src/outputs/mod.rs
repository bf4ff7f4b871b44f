//! Output generation for the rendered blog post.
//!
//! The summarize stage produces one Hexo-style Markdown post per calendar
//! day, written to the posts directory:
//!
//! ```text
//! source/_posts/
//! └── 2025-05-06-daily-international-news.md
//! ```
//!
//! Re-running on the same day overwrites the same file.

pub mod post;
