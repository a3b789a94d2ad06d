//! Source definitions for the fetch layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{NewsheatError, NewsheatResult};

/// How a source is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// RSS or Atom feed
    Rss,
    /// Newsletter archive published as a feed
    NewsletterRss,
    /// JSON API (Hacker News via Algolia)
    Api,
}

impl SourceKind {
    pub fn is_feed(&self) -> bool {
        matches!(self, SourceKind::Rss | SourceKind::NewsletterRss)
    }
}

/// Network region the process can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Only mainland China sources are reachable
    Cn,
    /// International sources are reachable
    Global,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Cn => "cn",
            Region::Global => "global",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cn" | "china" => Ok(Region::Cn),
            "global" | "intl" => Ok(Region::Global),
            _ => Err(format!("Unknown region: {}", s)),
        }
    }
}

/// A configured news source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier (e.g., "hackernews", "techcrunch")
    pub id: String,
    /// Display name, used as the article `source`
    pub name: String,
    /// Feed or API URL
    pub url: String,
    /// Fetch strategy
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Region tag; "cn" sources stay reachable on restricted networks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Technical domains this source covers
    #[serde(default = "default_domains")]
    pub domains: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_domains() -> Vec<String> {
    vec!["general".to_string()]
}

fn default_enabled() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

impl SourceConfig {
    pub fn new(id: &str, name: &str, url: &str, kind: SourceKind, domains: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            kind,
            region: None,
            domains: domains.iter().map(|s| s.to_string()).collect(),
            enabled: true,
            language: default_language(),
            category: default_category(),
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region.as_str().to_string());
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn is_cn(&self) -> bool {
        self.region.as_deref() == Some(Region::Cn.as_str())
    }

    /// Hacker News is the only API source the fetch layer understands
    pub fn is_hackernews(&self) -> bool {
        self.kind == SourceKind::Api && self.id.contains("hackernews")
    }
}

/// On-disk source list (`{"sources": [...]}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceList {
    pub sources: Vec<SourceConfig>,
}

impl SourceList {
    /// Parse and validate a source list document
    pub fn from_json(raw: &str) -> NewsheatResult<Self> {
        let list: SourceList = serde_json::from_str(raw)
            .map_err(|e| NewsheatError::parse(format!("invalid source list: {}", e)))?;

        for (i, source) in list.sources.iter().enumerate() {
            if source.id.trim().is_empty() || source.url.trim().is_empty() {
                return Err(NewsheatError::config(format!(
                    "source #{} needs both an id and a url",
                    i + 1
                )));
            }
        }

        Ok(list)
    }

    /// Read a source list file
    pub fn load(path: impl AsRef<Path>) -> NewsheatResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
