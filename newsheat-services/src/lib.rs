//! Pipelines for newsheat
//!
//! This crate wires the source layer to the ranking engine:
//! - [`NewsSearchService`] selects sources for a keyword, fetches them
//!   concurrently and ranks the result
//! - [`LinkExtractionService`] finds candidate pages and deep-extracts
//!   file-share links from them with a bounded worker pool

pub mod config;
pub mod error;
pub mod link_extraction;
pub mod news_search;

pub use config::{LinkConfig, SearchConfig};
pub use error::{ServiceError, ServiceResult};
pub use link_extraction::{ExtractSummary, LinkExtractionService, PageLinks};
pub use news_search::{ArticleFetcher, NewsSearchService, SearchRequest, SourceFetcher};
