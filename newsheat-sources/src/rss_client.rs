//! RSS/Atom feed client
//!
//! Fetches a configured feed and turns its items into [`Article`] records,
//! optionally keeping only items that mention the search keyword.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use newsheat_core::{Article, SourceConfig};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::html::{clean_html, truncate_with_ellipsis};
use crate::http::HttpFetcher;

/// Summaries longer than this are cut and suffixed with "..."
const SUMMARY_MAX_CHARS: usize = 300;

static REDDIT_VOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s+(points?|upvotes?)").expect("valid reddit votes regex")
});

/// Feed item fields before cleanup
#[derive(Debug, Default)]
struct RawItem {
    title: Option<String>,
    link: Option<String>,
    summary_html: Option<String>,
    content_html: Option<String>,
    published: Option<String>,
}

/// RSS/Atom feed client
#[derive(Debug, Clone, Default)]
pub struct RssClient {
    fetcher: HttpFetcher,
}

impl RssClient {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch one feed and return up to `limit` matching articles
    pub async fn fetch_source(
        &self,
        source: &SourceConfig,
        keyword: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Article>, SourceError> {
        let content = self.fetcher.fetch_text(&source.url).await?;
        let articles = parse_feed(&content, source, keyword, limit)?;
        debug!("Parsed {} articles from {}", articles.len(), source.name);
        Ok(articles)
    }
}

/// Parse RSS or Atom text into articles for `source`.
///
/// Scans at most `limit * 2` items, skipping items without a title or link
/// and, when `keyword` is set, items that mention it in neither title nor
/// summary.
pub fn parse_feed(
    content: &str,
    source: &SourceConfig,
    keyword: Option<&str>,
    limit: usize,
) -> Result<Vec<Article>, SourceError> {
    let items = read_items(content)
        .ok_or_else(|| SourceError::ParseError(format!("Failed to parse feed: {}", source.url)))?;

    let keyword = keyword.filter(|k| !k.is_empty()).map(str::to_lowercase);
    let is_reddit = source.url.contains("reddit.com");
    let mut articles = Vec::new();

    for item in items.into_iter().take(limit.saturating_mul(2)) {
        if articles.len() >= limit {
            break;
        }

        let Some(title) = item.title.as_deref().map(clean_html) else {
            continue;
        };
        let Some(url) = item.link.as_deref().map(clean_html).filter(|u| !u.is_empty()) else {
            continue;
        };

        let summary = item
            .summary_html
            .as_deref()
            .or(item.content_html.as_deref())
            .map(clean_html)
            .map(|s| truncate_with_ellipsis(&s, SUMMARY_MAX_CHARS))
            .unwrap_or_default();

        if let Some(keyword) = &keyword {
            if !title.to_lowercase().contains(keyword) && !summary.to_lowercase().contains(keyword) {
                continue;
            }
        }

        let reddit_upvotes = if is_reddit {
            let raw = format!(
                "{} {} {}",
                item.title.as_deref().unwrap_or_default(),
                item.summary_html.as_deref().unwrap_or_default(),
                item.content_html.as_deref().unwrap_or_default()
            );
            extract_reddit_upvotes(&raw).filter(|votes| *votes > 0)
        } else {
            None
        };

        articles.push(Article {
            title,
            summary: Some(summary),
            url: Some(url),
            source: Some(source.name.clone()),
            published_at: item.published.as_deref().map(normalize_date),
            hn_points: None,
            hn_comments: None,
            reddit_upvotes,
            category: Some(source.category.clone()),
            language: Some(source.language.clone()),
        });
    }

    Ok(articles)
}

/// Try RSS first, then Atom
fn read_items(content: &str) -> Option<Vec<RawItem>> {
    if let Ok(channel) = rss::Channel::read_from(content.as_bytes()) {
        return Some(channel.items().iter().map(rss_item).collect());
    }

    match atom_syndication::Feed::read_from(content.as_bytes()) {
        Ok(feed) => Some(feed.entries().iter().map(atom_entry).collect()),
        Err(e) => {
            warn!("Feed is neither RSS nor Atom: {}", e);
            None
        }
    }
}

fn rss_item(item: &rss::Item) -> RawItem {
    let published = item.pub_date().map(str::to_string).or_else(|| {
        item.dublin_core_ext()
            .and_then(|dc| dc.dates().first().cloned())
    });

    RawItem {
        title: item.title().map(str::to_string),
        link: item.link().map(str::to_string),
        summary_html: item.description().map(str::to_string),
        content_html: item.content().map(str::to_string),
        published,
    }
}

fn atom_entry(entry: &atom_syndication::Entry) -> RawItem {
    let link = entry
        .links()
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| entry.links().first())
        .map(|l| l.href().to_string());

    let published = entry.published().unwrap_or(entry.updated()).to_rfc3339();

    RawItem {
        title: Some(entry.title().to_string()),
        link,
        summary_html: entry.summary().map(|s| s.as_str().to_string()),
        content_html: entry.content().and_then(|c| c.value()).map(str::to_string),
        published: Some(published),
    }
}

/// Normalize a feed date (RFC 2822 or RFC 3339) to RFC 3339.
/// Dates in neither format become "now".
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|_| Utc::now().to_rfc3339())
}

/// Upvote count from Reddit item markup ("123 points", "45 upvotes")
pub fn extract_reddit_upvotes(content: &str) -> Option<u64> {
    REDDIT_VOTES
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsheat_core::SourceKind;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Tech</title>
    <link>https://example.com</link>
    <description>Example</description>
    <item>
      <title>Rust 1.80 released</title>
      <link>https://example.com/rust-180</link>
      <description><![CDATA[<p>LazyLock is <b>stable</b>.</p>]]></description>
      <pubDate>Thu, 25 Jul 2024 14:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Go 1.23 released</title>
      <link>https://example.com/go-123</link>
      <description>Iterators land in Go.</description>
    </item>
    <item>
      <title>No link here</title>
      <description>Should be skipped</description>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>r/programming</title>
  <id>urn:example</id>
  <updated>2024-07-25T10:00:00+00:00</updated>
  <entry>
    <title>Why we rewrote it in Rust</title>
    <id>urn:1</id>
    <link rel="alternate" href="https://www.reddit.com/r/programming/comments/1"/>
    <updated>2024-07-25T09:00:00+00:00</updated>
    <content type="html">&lt;p&gt;submitted by someone, 321 points&lt;/p&gt;</content>
  </entry>
</feed>"#;

    fn source(url: &str) -> SourceConfig {
        SourceConfig::new("example", "Example Tech", url, SourceKind::Rss, &["general"])
            .with_category("startup")
    }

    #[test]
    fn test_parse_rss_feed() {
        let articles = parse_feed(RSS, &source("https://example.com/feed"), None, 10).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Rust 1.80 released");
        assert_eq!(articles[0].summary.as_deref(), Some("LazyLock is stable."));
        assert_eq!(articles[0].source.as_deref(), Some("Example Tech"));
        assert_eq!(articles[0].category.as_deref(), Some("startup"));
        assert_eq!(
            articles[0].published_at.as_deref(),
            Some("2024-07-25T14:00:00+00:00")
        );
        assert!(articles[1].published_at.is_none());
        assert!(articles[0].reddit_upvotes.is_none());
    }

    #[test]
    fn test_parse_feed_keyword_filter_and_limit() {
        let rust_only = parse_feed(RSS, &source("https://example.com/feed"), Some("RUST"), 10).unwrap();
        assert_eq!(rust_only.len(), 1);

        let by_summary = parse_feed(RSS, &source("https://example.com/feed"), Some("iterators"), 10).unwrap();
        assert_eq!(by_summary[0].title, "Go 1.23 released");

        let limited = parse_feed(RSS, &source("https://example.com/feed"), None, 1).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_parse_atom_reddit_feed() {
        let articles = parse_feed(
            ATOM,
            &source("https://www.reddit.com/r/programming/.rss"),
            None,
            10,
        )
        .unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url.as_deref(), Some("https://www.reddit.com/r/programming/comments/1"));
        assert_eq!(articles[0].reddit_upvotes, Some(321));
        assert_eq!(articles[0].published_at.as_deref(), Some("2024-07-25T09:00:00+00:00"));
    }

    #[test]
    fn test_reddit_upvotes_found_in_title() {
        let feed = ATOM
            .replace("Why we rewrote it in Rust", "Why we rewrote it in Rust [87 upvotes]")
            .replace("submitted by someone, 321 points", "submitted by someone");
        let articles = parse_feed(
            &feed,
            &source("https://www.reddit.com/r/programming/.rss"),
            None,
            10,
        )
        .unwrap();

        assert_eq!(articles[0].reddit_upvotes, Some(87));
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        let err = parse_feed("<html>not a feed</html>", &source("https://x"), None, 5).unwrap_err();
        assert!(matches!(err, SourceError::ParseError(_)));
    }

    #[test]
    fn test_summary_is_truncated() {
        let long = "word ".repeat(100);
        let feed = RSS.replace("Iterators land in Go.", &long);
        let articles = parse_feed(&feed, &source("https://example.com/feed"), None, 10).unwrap();
        let summary = articles[1].summary.as_deref().unwrap();
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 303);
    }

    #[test]
    fn test_extract_reddit_upvotes() {
        assert_eq!(extract_reddit_upvotes("1 point"), Some(1));
        assert_eq!(extract_reddit_upvotes("has 42 Upvotes today"), Some(42));
        assert_eq!(extract_reddit_upvotes("no votes"), None);
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("Thu, 25 Jul 2024 14:00:00 GMT"), "2024-07-25T14:00:00+00:00");
        assert_eq!(normalize_date("2024-07-25T09:00:00Z"), "2024-07-25T09:00:00+00:00");
        assert!(DateTime::parse_from_rfc3339(&normalize_date("sometime")).is_ok());
    }
}
