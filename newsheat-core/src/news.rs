//! News records produced by the fetch layer and consumed by the ranking engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category tag that marks an article as coming from an official vendor blog
pub const OFFICIAL_BLOG_CATEGORY: &str = "official_blog";

/// Anything that can be attributed to an origin site or feed
pub trait Sourced {
    /// Source identifier, if the record carries one
    fn source(&self) -> Option<&str>;
}

/// An extracted article, before scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article title (may be empty when extraction failed)
    #[serde(default)]
    pub title: String,
    /// Brief summary/excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Article URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Name of the site or feed this article came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Publication time as delivered by the source (RFC 3339 when well-formed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// Hacker News points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hn_points: Option<u64>,
    /// Hacker News comment count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hn_comments: Option<u64>,
    /// Upvotes scraped from a Reddit feed item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reddit_upvotes: Option<u64>,
    /// Classification tag (e.g. "startup", "community", "official_blog")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Language code of the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when the category marks an official vendor announcement
    pub fn is_official(&self) -> bool {
        self.category.as_deref() == Some(OFFICIAL_BLOG_CATEGORY)
    }
}

impl Sourced for Article {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// An article after the ranking engine has scored it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedArticle {
    #[serde(flatten)]
    pub article: Article,
    /// Heat score in 0..=100
    pub heat_score: u8,
    /// Other sources carrying the same story
    #[serde(default)]
    pub duplicate_sources: Vec<String>,
}

impl Sourced for RankedArticle {
    fn source(&self) -> Option<&str> {
        self.article.source()
    }
}

/// Envelope returned by a news search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Keyword the search ran for
    pub keyword: String,
    /// Number of articles in `results`
    pub total_found: usize,
    /// When the search completed
    pub search_time: DateTime<Utc>,
    /// Ranked articles, hottest first
    pub results: Vec<RankedArticle>,
}

impl SearchResult {
    pub fn new(keyword: impl Into<String>, results: Vec<RankedArticle>) -> Self {
        Self {
            keyword: keyword.into(),
            total_found: results.len(),
            search_time: Utc::now(),
            results,
        }
    }
}
