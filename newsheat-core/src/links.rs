//! Records produced by the link-extraction pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate page to deep-fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

/// File-share host (or magnet) a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanKind {
    Quark,
    Baidu,
    Aliyun,
    Uc,
    Magnet,
}

impl PanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanKind::Quark => "quark",
            PanKind::Baidu => "baidu",
            PanKind::Aliyun => "aliyun",
            PanKind::Uc => "uc",
            PanKind::Magnet => "magnet",
        }
    }
}

impl fmt::Display for PanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of media the extracted links are expected to carry.
/// Decides whether links are tagged with video quality or audio format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Film,
    Music,
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "film" | "films" | "video" => Ok(MediaKind::Film),
            "music" | "audio" => Ok(MediaKind::Music),
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}

/// A file-share or magnet link found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Title of the page the link was found on
    pub title: String,
    pub pan: PanKind,
    pub url: String,
    /// Video quality tag (film pages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Audio format tag (music pages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Extraction code / password printed next to the link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_code: Option<String>,
    pub source: String,
    pub page_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_record_wire_names() {
        let link = LinkRecord {
            title: "Some Film".to_string(),
            pan: PanKind::Quark,
            url: "https://pan.quark.cn/s/abc123".to_string(),
            quality: Some("1080P".to_string()),
            format: None,
            extract_code: Some("x7k2".to_string()),
            source: "deep-search".to_string(),
            page_url: "https://example.com/post/1".to_string(),
        };

        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["pan"], "quark");
        assert_eq!(value["extractCode"], "x7k2");
        assert_eq!(value["pageUrl"], "https://example.com/post/1");
        assert!(value.get("format").is_none());
    }
}
