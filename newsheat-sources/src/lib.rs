//! Record producers for the newsheat ranking engine
//!
//! This crate turns the outside world into flat record lists:
//! - RSS/Atom feeds and the Hacker News Algolia API (news articles)
//! - Search-engine result pages and deep-fetched pages (file-share links)
//!
//! It also carries the routing helpers that decide which sources to query:
//! keyword-to-domain classification and network-region detection.

pub mod catalog;
pub mod domains;
pub mod error;
pub mod hackernews;
pub mod html;
pub mod http;
pub mod links;
pub mod network;
pub mod page_search;
pub mod rss_client;

pub use catalog::{default_sources, load_sources};
pub use domains::{classify_keyword, domain_description, resolve_alias, sources_for_domains};
pub use error::SourceError;
pub use hackernews::HackerNewsClient;
pub use http::{FetchConfig, HttpFetcher};
pub use links::LinkExtractor;
pub use network::{filter_sources_by_region, RegionCheck, RegionDetector};
pub use page_search::PageSearchClient;
pub use rss_client::RssClient;
