//! Service configuration
//!
//! Every setting has a default; `from_env` overrides them from
//! `NEWSHEAT_*` environment variables. CLI flags are applied on top by the
//! binary.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use newsheat_core::{MediaKind, Region};
use newsheat_sources::network::DEFAULT_REGION_TTL_SECS;

use crate::error::ServiceError;

pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;
pub const DEFAULT_WORKERS: usize = 4;
pub const MAX_WORKERS: usize = 8;
pub const DEFAULT_PER_SOURCE_LIMIT: usize = 15;

/// Clamp a worker count to 1..=8
pub fn clamp_workers(workers: usize) -> usize {
    workers.clamp(1, MAX_WORKERS)
}

/// Parse `auto`, `cn` or `global`; `auto` means "detect"
pub fn parse_region_preference(value: &str) -> Result<Option<Region>, ServiceError> {
    match value.trim().to_lowercase().as_str() {
        "" | "auto" => Ok(None),
        other => other.parse().map(Some).map_err(ServiceError::config),
    }
}

/// Configuration for [`crate::NewsSearchService`]
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// `sources.json` to load instead of the built-in catalog
    pub sources_path: Option<PathBuf>,
    /// Forced region; `None` probes the network
    pub region: Option<Region>,
    /// Sources fetched at once
    pub fetch_concurrency: usize,
    /// Seconds a region probe result stays valid
    pub region_ttl_secs: i64,
    /// Articles requested from each source
    pub per_source_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources_path: None,
            region: None,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            region_ttl_secs: DEFAULT_REGION_TTL_SECS,
            per_source_limit: DEFAULT_PER_SOURCE_LIMIT,
        }
    }
}

impl SearchConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - NEWSHEAT_SOURCES: path to a sources.json file
    /// - NEWSHEAT_REGION: auto | cn | global
    /// - NEWSHEAT_FETCH_CONCURRENCY: 1..=8
    /// - NEWSHEAT_REGION_TTL_SECS: probe cache lifetime
    /// - NEWSHEAT_PER_SOURCE_LIMIT: articles requested from each source
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
        let mut config = Self::default();

        if let Some(path) = lookup("NEWSHEAT_SOURCES").filter(|p| !p.is_empty()) {
            config.sources_path = Some(PathBuf::from(path));
        }

        if let Some(region) = lookup("NEWSHEAT_REGION") {
            config.region = parse_region_preference(&region)?;
        }

        if let Some(raw) = lookup("NEWSHEAT_FETCH_CONCURRENCY") {
            let value: usize = raw.trim().parse().map_err(|_| {
                ServiceError::config(format!("NEWSHEAT_FETCH_CONCURRENCY is not a number: {}", raw))
            })?;
            config.fetch_concurrency = value;
        }

        if let Some(raw) = lookup("NEWSHEAT_REGION_TTL_SECS") {
            config.region_ttl_secs = raw.trim().parse().map_err(|_| {
                ServiceError::config(format!("NEWSHEAT_REGION_TTL_SECS is not a number: {}", raw))
            })?;
        }

        if let Some(raw) = lookup("NEWSHEAT_PER_SOURCE_LIMIT") {
            config.per_source_limit = raw
                .trim()
                .parse()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| {
                    ServiceError::config(format!(
                        "NEWSHEAT_PER_SOURCE_LIMIT must be a positive number: {}",
                        raw
                    ))
                })?;
        }

        Ok(config)
    }

    /// Effective fetch concurrency, clamped to 1..=8
    pub fn concurrency(&self) -> usize {
        clamp_workers(self.fetch_concurrency)
    }
}

/// Configuration for [`crate::LinkExtractionService`]
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Pages fetched at once, clamped to 1..=8
    pub workers: usize,
    /// Wall-clock budget for a whole extraction run
    pub deadline: Duration,
    pub media: MediaKind,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            deadline: Duration::from_secs(20),
            media: MediaKind::Film,
        }
    }
}

impl LinkConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = clamp_workers(workers);
        self
    }

    pub fn with_media(mut self, media: MediaKind) -> Self {
        self.media = media;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}
