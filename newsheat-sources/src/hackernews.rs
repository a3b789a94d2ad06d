//! Hacker News client backed by the Algolia search API

use chrono::{DateTime, Utc};
use newsheat_core::{Article, SourceConfig};
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;
use crate::http::HttpFetcher;

const ALGOLIA_SEARCH_URL: &str = "https://hn.algolia.com/api/v1/search";
const HN_ITEM_URL: &str = "https://news.ycombinator.com/item?id=";

#[derive(Debug, Deserialize)]
pub struct AlgoliaResponse {
    #[serde(default)]
    pub hits: Vec<AlgoliaHit>,
}

#[derive(Debug, Deserialize)]
pub struct AlgoliaHit {
    #[serde(rename = "objectID", default)]
    pub object_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub points: Option<u64>,
    pub num_comments: Option<u64>,
    pub created_at: Option<String>,
}

/// Hacker News client
#[derive(Debug, Clone, Default)]
pub struct HackerNewsClient {
    fetcher: HttpFetcher,
}

impl HackerNewsClient {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }

    /// Story search for `keyword`, or the current front page without one
    pub async fn fetch_source(
        &self,
        source: &SourceConfig,
        keyword: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Article>, SourceError> {
        let url = search_url(keyword, limit);
        let response: AlgoliaResponse = self.fetcher.fetch_json(&url).await?;
        let articles = hits_to_articles(response.hits, source);
        debug!("Hacker News returned {} stories", articles.len());
        Ok(articles)
    }
}

/// Algolia search URL for a keyword query or the front page
pub fn search_url(keyword: Option<&str>, limit: usize) -> String {
    match keyword.filter(|k| !k.is_empty()) {
        Some(keyword) => format!(
            "{}?query={}&tags=story&hitsPerPage={}",
            ALGOLIA_SEARCH_URL,
            urlencoding::encode(keyword),
            limit
        ),
        None => format!("{}?tags=front_page&hitsPerPage={}", ALGOLIA_SEARCH_URL, limit),
    }
}

/// Convert Algolia hits to articles; untitled hits are skipped
pub fn hits_to_articles(hits: Vec<AlgoliaHit>, source: &SourceConfig) -> Vec<Article> {
    hits.into_iter()
        .filter_map(|hit| {
            let title = hit.title.filter(|t| !t.is_empty())?;
            let url = hit
                .url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| format!("{}{}", HN_ITEM_URL, hit.object_id));
            let points = hit.points.unwrap_or(0);
            let comments = hit.num_comments.unwrap_or(0);

            let published_at = hit.created_at.map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_else(|_| Utc::now().to_rfc3339())
            });

            Some(Article {
                title,
                summary: Some(format!("HN: {} points, {} comments", points, comments)),
                url: Some(url),
                source: Some(source.name.clone()),
                published_at,
                hn_points: Some(points),
                hn_comments: Some(comments),
                reddit_upvotes: None,
                category: Some("community".to_string()),
                language: Some("en".to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsheat_core::SourceKind;

    const RESPONSE: &str = r#"{
        "hits": [
            {
                "objectID": "41000001",
                "title": "Show HN: A tiny Rust database",
                "url": "https://example.com/tinydb",
                "points": 412,
                "num_comments": 97,
                "created_at": "2024-07-25T09:30:00.000Z"
            },
            {
                "objectID": "41000002",
                "title": "Ask HN: What are you working on?",
                "url": null,
                "points": null,
                "num_comments": 12,
                "created_at": "2024-07-25T08:00:00.000Z"
            },
            {
                "objectID": "41000003",
                "title": "",
                "points": 3
            }
        ]
    }"#;

    fn hn() -> SourceConfig {
        SourceConfig::new(
            "hackernews",
            "Hacker News",
            "https://hn.algolia.com/api/v1/search?tags=front_page",
            SourceKind::Api,
            &["general"],
        )
    }

    #[test]
    fn test_hits_to_articles() {
        let response: AlgoliaResponse = serde_json::from_str(RESPONSE).unwrap();
        let articles = hits_to_articles(response.hits, &hn());

        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.summary.as_deref(), Some("HN: 412 points, 97 comments"));
        assert_eq!(first.hn_points, Some(412));
        assert_eq!(first.hn_comments, Some(97));
        assert_eq!(first.category.as_deref(), Some("community"));
        assert_eq!(first.source.as_deref(), Some("Hacker News"));
        assert_eq!(first.published_at.as_deref(), Some("2024-07-25T09:30:00+00:00"));

        let second = &articles[1];
        assert_eq!(second.url.as_deref(), Some("https://news.ycombinator.com/item?id=41000002"));
        assert_eq!(second.hn_points, Some(0));
    }

    #[test]
    fn test_search_url() {
        assert_eq!(
            search_url(Some("rust async"), 10),
            "https://hn.algolia.com/api/v1/search?query=rust%20async&tags=story&hitsPerPage=10"
        );
        assert_eq!(
            search_url(None, 5),
            "https://hn.algolia.com/api/v1/search?tags=front_page&hitsPerPage=5"
        );
    }
}
