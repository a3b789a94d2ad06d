//! News Search Service
//!
//! Picks the sources worth querying for a keyword (network region, then
//! keyword domains), fetches them concurrently and hands the collected
//! articles to the ranking engine.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use newsheat_core::{Article, Region, SearchResult, SourceConfig, SourceKind};
use newsheat_ranking::{rank_articles_now, RankingOptions, DEFAULT_MAX_PER_SOURCE};
use newsheat_sources::{
    classify_keyword, default_sources, domain_description, filter_sources_by_region, load_sources,
    sources_for_domains, HackerNewsClient, HttpFetcher, RegionDetector, RssClient, SourceError,
};

use crate::config::{SearchConfig, DEFAULT_PER_SOURCE_LIMIT};
use crate::error::ServiceError;

/// Fetches articles from one configured source
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(
        &self,
        source: &SourceConfig,
        keyword: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Article>, SourceError>;
}

/// Dispatches to the feed parser or the Hacker News client by source kind
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    rss: RssClient,
    hackernews: HackerNewsClient,
}

impl SourceFetcher {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            rss: RssClient::new(fetcher.clone()),
            hackernews: HackerNewsClient::new(fetcher),
        }
    }
}

#[async_trait]
impl ArticleFetcher for SourceFetcher {
    async fn fetch(
        &self,
        source: &SourceConfig,
        keyword: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Article>, SourceError> {
        match source.kind {
            SourceKind::Api if source.is_hackernews() => {
                self.hackernews.fetch_source(source, keyword, limit).await
            }
            kind if kind.is_feed() => self.rss.fetch_source(source, keyword, limit).await,
            kind => Err(SourceError::InvalidConfig(format!(
                "unsupported source type {:?} for {}",
                kind, source.id
            ))),
        }
    }
}

/// One search request
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub keyword: String,
    /// Articles requested from each source
    pub limit: usize,
    /// Cap per source after ranking
    pub max_per_source: usize,
    pub balance: bool,
    /// Skip keyword domain routing and query every reachable source
    pub all_sources: bool,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            limit: DEFAULT_PER_SOURCE_LIMIT,
            max_per_source: DEFAULT_MAX_PER_SOURCE,
            balance: true,
            all_sources: false,
        }
    }
}

/// News search pipeline
pub struct NewsSearchService {
    sources: Vec<SourceConfig>,
    fetcher: Arc<dyn ArticleFetcher>,
    http: HttpFetcher,
    region: Mutex<RegionDetector>,
    config: SearchConfig,
}

impl NewsSearchService {
    /// Build the service from configuration, loading the source list
    pub fn new(config: SearchConfig) -> Result<Self, ServiceError> {
        let sources = match &config.sources_path {
            Some(path) => load_sources(path)?,
            None => default_sources(),
        };
        let http = HttpFetcher::default();
        let fetcher = Arc::new(SourceFetcher::new(http.clone()));
        Ok(Self::with_fetcher(sources, fetcher, http, config))
    }

    /// Build the service around an explicit source list and fetcher
    pub fn with_fetcher(
        sources: Vec<SourceConfig>,
        fetcher: Arc<dyn ArticleFetcher>,
        http: HttpFetcher,
        config: SearchConfig,
    ) -> Self {
        info!(
            "Initializing NewsSearchService ({} sources, concurrency {}, region {})",
            sources.len(),
            config.concurrency(),
            config.region.map(|r| r.as_str()).unwrap_or("auto")
        );

        let detector = RegionDetector::new()
            .with_forced_region(config.region)
            .with_ttl(chrono::Duration::seconds(config.region_ttl_secs));

        Self {
            sources,
            fetcher,
            http,
            region: Mutex::new(detector),
            config,
        }
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Request for `keyword` with the configured per-source limit
    pub fn request(&self, keyword: impl Into<String>) -> SearchRequest {
        SearchRequest {
            limit: self.config.per_source_limit,
            ..SearchRequest::new(keyword)
        }
    }

    /// Region in effect, probing the network when the cached result is stale
    pub async fn region(&self) -> Region {
        self.region.lock().await.detect(&self.http).await
    }

    /// Sources to query for `keyword`
    pub async fn select_sources(&self, keyword: &str, all_sources: bool) -> Vec<SourceConfig> {
        let region = self.region().await;
        let reachable = filter_sources_by_region(&self.sources, region);

        if all_sources {
            info!("Searching all {} reachable sources", reachable.len());
            return reachable;
        }

        let domains = classify_keyword(keyword);
        let selected = sources_for_domains(&reachable, &domains);
        let labels: Vec<&str> = domains.iter().map(|d| domain_description(d)).collect();
        info!(
            "Detected domains [{}]; searching {} of {} reachable sources",
            labels.join(", "),
            selected.len(),
            reachable.len()
        );
        selected
    }

    /// Run a search: select sources, fetch, rank
    #[instrument(skip(self), fields(keyword = %request.keyword))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, ServiceError> {
        if request.max_per_source == 0 && request.balance {
            return Err(ServiceError::invalid_input("max_per_source must be at least 1"));
        }

        let sources = self.select_sources(&request.keyword, request.all_sources).await;
        let articles = self
            .fetch_all(&sources, &request.keyword, request.limit)
            .await;

        let options = RankingOptions {
            keyword: request.keyword.clone(),
            max_per_source: request.max_per_source,
            balance: request.balance,
        };
        let ranked = rank_articles_now(articles, &options);

        Ok(SearchResult::new(request.keyword.clone(), ranked))
    }

    /// Fetch every source, at most `concurrency` at a time.
    ///
    /// Failed sources are logged and contribute nothing. Results are
    /// concatenated in source order.
    pub async fn fetch_all(
        &self,
        sources: &[SourceConfig],
        keyword: &str,
        limit: usize,
    ) -> Vec<Article> {
        let keyword = Some(keyword).filter(|k| !k.is_empty());
        let fetcher = &self.fetcher;

        let batches: Vec<Vec<Article>> = stream::iter(sources.iter().cloned())
            .map(|source| async move {
                match fetcher.fetch(&source, keyword, limit).await {
                    Ok(articles) => {
                        debug!("{}: {} articles", source.name, articles.len());
                        articles
                    }
                    Err(e) => {
                        warn!("Failed to fetch {}: {}", source.name, e);
                        Vec::new()
                    }
                }
            })
            .buffered(self.config.concurrency())
            .collect()
            .await;

        let articles: Vec<Article> = batches.into_iter().flatten().collect();
        info!(
            "Collected {} articles from {} sources",
            articles.len(),
            sources.len()
        );
        articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StubFetcher {
        by_source: HashMap<String, Vec<Article>>,
    }

    #[async_trait]
    impl ArticleFetcher for StubFetcher {
        async fn fetch(
            &self,
            source: &SourceConfig,
            _keyword: Option<&str>,
            limit: usize,
        ) -> Result<Vec<Article>, SourceError> {
            match self.by_source.get(&source.id) {
                Some(articles) => Ok(articles.iter().take(limit).cloned().collect()),
                None => Err(SourceError::RequestFailed("connection reset".to_string())),
            }
        }
    }

    fn service(region: Region) -> NewsSearchService {
        service_with(SearchConfig {
            region: Some(region),
            ..SearchConfig::default()
        })
    }

    fn service_with(config: SearchConfig) -> NewsSearchService {
        let sources = vec![
            SourceConfig::new("tc", "TechCrunch", "https://tc", SourceKind::Rss, &["general"]),
            SourceConfig::new("k8s", "Kubernetes Blog", "https://k8s", SourceKind::Rss, &["devops"]),
            SourceConfig::new("36kr", "36Kr", "https://36kr", SourceKind::Rss, &["general"])
                .with_region(Region::Cn),
            SourceConfig::new("down", "Down", "https://down", SourceKind::Rss, &["general"]),
        ];
        let by_source = HashMap::from([
            (
                "tc".to_string(),
                vec![Article::new("Docker raises prices", "TechCrunch")],
            ),
            (
                "k8s".to_string(),
                vec![Article::new("Kubernetes 1.31", "Kubernetes Blog").with_category("official_blog")],
            ),
            ("36kr".to_string(), vec![Article::new("大模型融资", "36Kr")]),
        ]);

        NewsSearchService::with_fetcher(
            sources,
            Arc::new(StubFetcher { by_source }),
            HttpFetcher::default(),
            config,
        )
    }

    #[tokio::test]
    async fn test_select_sources_routes_by_domain() {
        let service = service(Region::Global);

        let general: Vec<String> = service
            .select_sources("zzzz", false)
            .await
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(general, vec!["tc", "36kr", "down"]);

        let devops = service.select_sources("docker", false).await;
        assert!(devops.iter().any(|s| s.id == "k8s"));

        assert_eq!(service.select_sources("zzzz", true).await.len(), 4);
    }

    #[tokio::test]
    async fn test_select_sources_restricted_region() {
        let service = service(Region::Cn);
        let ids: Vec<String> = service
            .select_sources("docker", true)
            .await
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["36kr"]);
    }

    #[tokio::test]
    async fn test_search_survives_failed_source() {
        let service = service(Region::Global);
        let result = service.search(&SearchRequest::new("docker")).await.unwrap();

        assert_eq!(result.keyword, "docker");
        assert_eq!(result.total_found, result.results.len());
        let titles: Vec<&str> = result.results.iter().map(|r| r.article.title.as_str()).collect();
        assert!(titles.contains(&"Docker raises prices"));
        assert!(titles.contains(&"Kubernetes 1.31"));
        // keyword in title outranks an untouched official post
        assert_eq!(result.results[0].article.title, "Docker raises prices");
    }

    #[tokio::test]
    async fn test_request_uses_configured_limit() {
        let service = service_with(SearchConfig {
            region: Some(Region::Global),
            per_source_limit: 1,
            ..SearchConfig::default()
        });
        let request = service.request("docker");
        assert_eq!(request.limit, 1);
        assert_eq!(request.max_per_source, DEFAULT_MAX_PER_SOURCE);

        let articles = service.fetch_all(service.sources(), "", request.limit).await;
        assert_eq!(articles.len(), 3);
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_search_future_is_send() {
        let service = service(Region::Global);
        let request = SearchRequest::new("docker");
        let search = service.search(&request);
        assert_send(&search);
        let fetch = service.fetch_all(service.sources(), "docker", 3);
        assert_send(&fetch);
    }

    #[tokio::test]
    async fn test_search_rejects_zero_cap() {
        let service = service(Region::Global);
        let mut request = SearchRequest::new("docker");
        request.max_per_source = 0;
        assert!(matches!(
            service.search(&request).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }
}
