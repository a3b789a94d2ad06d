//! Candidate page discovery through a web search engine (Baidu)

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use newsheat_core::PageRef;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::html::clean_html;
use crate::http::HttpFetcher;

const BAIDU_SEARCH_URL: &str = "https://www.baidu.com/s";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

pub const DEFAULT_MAX_RESULTS: usize = 10;

static RESULT_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<h3[^>]*class="[^"]*(?:\bt\b|c-title)[^"]*"[^>]*>\s*<a[^>]+href="(https?://[^"]+)"[^>]*>([\s\S]*?)</a>"#,
    )
    .expect("valid result anchor regex")
});

// Result pages of search engines themselves; redirect links are kept
static SEARCH_PAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"baidu\.com/s\?",
        r"bing\.com/search\?",
        r"google\.com/search\?",
        r"so\.com/s\?",
        r"sogou\.com/web\?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid search page regex"))
    .collect()
});

/// Search-engine client returning candidate pages
#[derive(Debug, Clone, Default)]
pub struct PageSearchClient {
    fetcher: HttpFetcher,
}

impl PageSearchClient {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }

    /// Run every query and merge the results, deduplicated by URL.
    ///
    /// Failed queries are skipped. At most `max_results * 2` pages are
    /// returned.
    pub async fn search(&self, queries: &[String], max_results: usize) -> Vec<PageRef> {
        let mut seen = HashSet::new();
        let mut pages = Vec::new();

        for query in queries {
            let url = search_url(query, max_results);
            let html = match self.fetcher.fetch_once(&url, SEARCH_TIMEOUT).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Search for {:?} failed: {}", query, e);
                    continue;
                }
            };

            let found = parse_results(&html);
            debug!("Query {:?} -> {} results", query, found.len());
            for page in found {
                if seen.insert(page.url.clone()) {
                    pages.push(page);
                }
            }
        }

        pages.truncate(max_results.saturating_mul(2));
        info!("Page search found {} candidate pages", pages.len());
        pages
    }
}

pub fn search_url(query: &str, max_results: usize) -> String {
    format!(
        "{}?wd={}&rn={}",
        BAIDU_SEARCH_URL,
        urlencoding::encode(query),
        max_results
    )
}

/// Result anchors on a search page, excluding links back to search pages
pub fn parse_results(html: &str) -> Vec<PageRef> {
    RESULT_ANCHOR
        .captures_iter(html)
        .filter(|caps| !is_search_page_url(&caps[1]))
        .map(|caps| PageRef {
            url: caps[1].to_string(),
            title: clean_html(&caps[2]),
        })
        .collect()
}

/// Whether `url` is a search engine's own result page
pub fn is_search_page_url(url: &str) -> bool {
    SEARCH_PAGE_PATTERNS.iter().any(|p| p.is_match(url))
}
