//! Link Extraction Service
//!
//! Deep-fetches candidate pages through a bounded worker pool and reports
//! each page's links as soon as that page completes. The whole run is
//! bounded by a deadline; pages still in flight when it passes are
//! abandoned.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use newsheat_core::{LinkRecord, PageRef};
use newsheat_sources::{HttpFetcher, LinkExtractor, PageSearchClient, SourceError};

use crate::config::{clamp_workers, LinkConfig};

/// Produces the links found on one page
#[async_trait]
pub trait PageLinks: Send + Sync {
    async fn links(&self, page: &PageRef) -> Result<Vec<LinkRecord>, SourceError>;
}

#[async_trait]
impl PageLinks for LinkExtractor {
    async fn links(&self, page: &PageRef) -> Result<Vec<LinkRecord>, SourceError> {
        self.fetch_and_extract(page).await
    }
}

/// Outcome counters for one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub pages: usize,
    /// Pages fetched and scanned, with or without links
    pub completed: usize,
    pub failed: usize,
    /// Pages not finished when the deadline passed
    pub abandoned: usize,
    pub links: usize,
}

/// Page search and link extraction pipeline
pub struct LinkExtractionService {
    search: PageSearchClient,
    extractor: Arc<dyn PageLinks>,
    config: LinkConfig,
}

impl LinkExtractionService {
    pub fn new(config: LinkConfig) -> Self {
        let http = HttpFetcher::default();
        let extractor = LinkExtractor::new(http.clone(), config.media);
        Self::with_extractor(PageSearchClient::new(http), Arc::new(extractor), config)
    }

    pub fn with_extractor(
        search: PageSearchClient,
        extractor: Arc<dyn PageLinks>,
        config: LinkConfig,
    ) -> Self {
        Self {
            search,
            extractor,
            config,
        }
    }

    /// Candidate pages for `queries`
    pub async fn search_pages(&self, queries: &[String], max_results: usize) -> Vec<PageRef> {
        self.search.search(queries, max_results).await
    }

    /// Extract links from `pages`, calling `on_page` once per page that
    /// yielded at least one link, in completion order.
    pub async fn extract<F>(&self, pages: Vec<PageRef>, mut on_page: F) -> ExtractSummary
    where
        F: FnMut(Vec<LinkRecord>),
    {
        let mut summary = ExtractSummary {
            pages: pages.len(),
            ..ExtractSummary::default()
        };
        if pages.is_empty() {
            return summary;
        }

        let workers = clamp_workers(self.config.workers);
        let deadline = Instant::now() + self.config.deadline;
        info!(
            "Extracting links from {} pages with {} workers",
            pages.len(),
            workers
        );

        let extractor = &self.extractor;
        let mut pending = stream::iter(pages)
            .map(|page| async move {
                let result = extractor.links(&page).await;
                (page, result)
            })
            .buffer_unordered(workers);

        loop {
            match timeout_at(deadline, pending.next()).await {
                Ok(Some((page, Ok(links)))) => {
                    summary.completed += 1;
                    debug!("{} -> {} links", page.url, links.len());
                    if !links.is_empty() {
                        summary.links += links.len();
                        on_page(links);
                    }
                }
                Ok(Some((page, Err(e)))) => {
                    summary.failed += 1;
                    warn!("{} -> {}", page.url, e);
                }
                Ok(None) => break,
                Err(_) => {
                    summary.abandoned = summary.pages - summary.completed - summary.failed;
                    warn!(
                        "Deadline of {:?} reached, abandoning {} pages",
                        self.config.deadline, summary.abandoned
                    );
                    break;
                }
            }
        }

        info!(
            "Link extraction done: {} completed, {} failed, {} abandoned, {} links",
            summary.completed, summary.failed, summary.abandoned, summary.links
        );
        summary
    }

    /// Run [`Self::extract`] and collect the per-page batches
    pub async fn extract_all(&self, pages: Vec<PageRef>) -> (Vec<Vec<LinkRecord>>, ExtractSummary) {
        let mut batches = Vec::new();
        let summary = self.extract(pages, |links| batches.push(links)).await;
        (batches, summary)
    }
}
