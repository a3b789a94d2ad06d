//! End-to-end search over canned feeds: parse, route, rank, balance

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use newsheat_core::{Article, Region, SourceConfig, SourceKind};
use newsheat_services::{ArticleFetcher, NewsSearchService, SearchConfig, SearchRequest};
use newsheat_sources::rss_client::parse_feed;
use newsheat_sources::{HttpFetcher, SourceError};

/// Serves feed documents from memory, keyed by source URL
struct CannedFeeds {
    feeds: HashMap<String, String>,
}

#[async_trait]
impl ArticleFetcher for CannedFeeds {
    async fn fetch(
        &self,
        source: &SourceConfig,
        keyword: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Article>, SourceError> {
        let body = self
            .feeds
            .get(&source.url)
            .ok_or_else(|| SourceError::HttpStatus {
                status: 404,
                url: source.url.clone(),
            })?;
        parse_feed(body, source, keyword, limit)
    }
}

fn rss(items: &[(&str, &str, String)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, link, date)| {
            format!(
                "<item><title>{}</title><link>{}</link><description>{}</description><pubDate>{}</pubDate></item>",
                title, link, title, date
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title><link>https://x</link><description>d</description>{}</channel></rss>"#,
        items
    )
}

fn service() -> NewsSearchService {
    let fresh = Utc::now().to_rfc2822();
    let old = (Utc::now() - Duration::days(5)).to_rfc2822();

    let sources = vec![
        SourceConfig::new("alpha", "Alpha", "https://alpha/feed", SourceKind::Rss, &["general"]),
        SourceConfig::new("beta", "Beta", "https://beta/feed", SourceKind::Rss, &["general"]),
        SourceConfig::new("gamma", "Gamma", "https://gamma/feed", SourceKind::Rss, &["ai"]),
        SourceConfig::new("gone", "Gone", "https://gone/feed", SourceKind::Rss, &["general"]),
    ];

    let feeds = HashMap::from([
        (
            "https://alpha/feed".to_string(),
            rss(&[
                ("GPT-5 released", "https://alpha/1", fresh.clone()),
                ("GPT-5 pricing explained", "https://alpha/2", fresh.clone()),
                ("GPT-5 and the old guard", "https://alpha/3", old.clone()),
                ("Unrelated gadget review", "https://alpha/4", fresh.clone()),
            ]),
        ),
        (
            "https://beta/feed".to_string(),
            rss(&[("GPT-5 Released!", "https://beta/1", fresh.clone())]),
        ),
        (
            "https://gamma/feed".to_string(),
            rss(&[("Inside GPT-5 training", "https://gamma/1", old)]),
        ),
    ]);

    let config = SearchConfig {
        region: Some(Region::Global),
        ..SearchConfig::default()
    };

    NewsSearchService::with_fetcher(
        sources,
        Arc::new(CannedFeeds { feeds }),
        HttpFetcher::default(),
        config,
    )
}

#[tokio::test]
async fn test_corroborated_story_ranks_first() {
    let result = service().search(&SearchRequest::new("GPT-5")).await.unwrap();

    // keyword filter drops the gadget review
    assert!(result.results.iter().all(|r| r.article.title.contains("GPT-5")));

    let top = &result.results[0];
    assert_eq!(top.heat_score, 95);
    assert!(!top.duplicate_sources.is_empty());

    let scores: Vec<u8> = result.results.iter().map(|r| r.heat_score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_balance_caps_each_source() {
    let mut request = SearchRequest::new("GPT-5");
    request.max_per_source = 1;

    let result = service().search(&request).await.unwrap();

    let mut per_source: HashMap<String, usize> = HashMap::new();
    for ranked in &result.results {
        *per_source
            .entry(ranked.article.source.clone().unwrap_or_default())
            .or_default() += 1;
    }
    assert!(per_source.values().all(|count| *count == 1));
    assert_eq!(result.total_found, result.results.len());
}

#[tokio::test]
async fn test_unbalanced_all_sources_search() {
    let mut request = SearchRequest::new("GPT-5");
    request.balance = false;
    request.all_sources = true;

    let result = service().search(&request).await.unwrap();

    // 3 from Alpha, 1 from Beta, 1 from Gamma; "Gone" fails quietly
    assert_eq!(result.total_found, 5);
}
