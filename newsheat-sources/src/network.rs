//! Network region detection
//!
//! Probes a couple of international endpoints to decide whether global
//! sources are reachable; on restricted networks only `cn` sources are used.
//! The last result is kept on the detector value itself, together with the
//! clock used to age it, so callers and tests control both.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use newsheat_core::{Region, SourceConfig};
use tracing::{debug, info};

use crate::http::HttpFetcher;

/// Endpoints probed in order; the first 200 means global access
pub const DEFAULT_PROBE_URLS: &[&str] = &[
    "https://www.cloudflare.com/cdn-cgi/trace",
    "https://techcrunch.com/feed/",
];

/// How long a probe result stays valid
pub const DEFAULT_REGION_TTL_SECS: i64 = 300;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Source of "now" for cache aging
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Outcome of one probe round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionCheck {
    pub region: Region,
    pub checked_at: DateTime<Utc>,
}

/// Detects which network region this process is in
pub struct RegionDetector {
    probe_urls: Vec<String>,
    probe_timeout: Duration,
    ttl: chrono::Duration,
    forced: Option<Region>,
    last_check: Option<RegionCheck>,
    clock: Clock,
}

impl RegionDetector {
    pub fn new() -> Self {
        Self {
            probe_urls: DEFAULT_PROBE_URLS.iter().map(|s| s.to_string()).collect(),
            probe_timeout: PROBE_TIMEOUT,
            ttl: chrono::Duration::seconds(DEFAULT_REGION_TTL_SECS),
            forced: None,
            last_check: None,
            clock: Arc::new(Utc::now),
        }
    }

    /// Skip probing and always report `region`
    pub fn with_forced_region(mut self, region: Option<Region>) -> Self {
        self.forced = region;
        self
    }

    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Seed the detector with a previous result
    pub fn with_last_check(mut self, check: RegionCheck) -> Self {
        self.last_check = Some(check);
        self
    }

    pub fn with_probe_urls(mut self, urls: Vec<String>) -> Self {
        self.probe_urls = urls;
        self
    }

    pub fn last_check(&self) -> Option<RegionCheck> {
        self.last_check
    }

    /// Region known without probing: forced, or a still-fresh last check
    pub fn cached_region(&self) -> Option<Region> {
        if let Some(region) = self.forced {
            return Some(region);
        }

        let check = self.last_check?;
        let age = (self.clock)() - check.checked_at;
        (age <= self.ttl).then_some(check.region)
    }

    /// Record a probe outcome at the current clock time
    pub fn record(&mut self, region: Region) -> RegionCheck {
        let check = RegionCheck {
            region,
            checked_at: (self.clock)(),
        };
        self.last_check = Some(check);
        check
    }

    /// Current region, probing the network when nothing fresh is cached
    pub async fn detect(&mut self, fetcher: &HttpFetcher) -> Region {
        if let Some(region) = self.cached_region() {
            debug!("Using cached network region: {}", region);
            return region;
        }

        let mut region = Region::Cn;
        for url in &self.probe_urls {
            match fetcher.probe(url, self.probe_timeout).await {
                Some(status) if status.as_u16() == 200 => {
                    region = Region::Global;
                    break;
                }
                Some(status) => debug!("Probe {} answered {}", url, status),
                None => {}
            }
        }

        info!("Detected network region: {}", region);
        self.record(region);
        region
    }
}

impl Default for RegionDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Enabled sources reachable from `region`
pub fn filter_sources_by_region(sources: &[SourceConfig], region: Region) -> Vec<SourceConfig> {
    sources
        .iter()
        .filter(|source| source.enabled)
        .filter(|source| region == Region::Global || source.is_cn())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use newsheat_core::SourceKind;
    use std::sync::Mutex;

    fn manual_clock(start: DateTime<Utc>) -> (Clock, Arc<Mutex<DateTime<Utc>>>) {
        let now = Arc::new(Mutex::new(start));
        let handle = Arc::clone(&now);
        let clock: Clock = Arc::new(move || *handle.lock().unwrap());
        (clock, now)
    }

    #[test]
    fn test_forced_region_short_circuits() {
        let detector = RegionDetector::new().with_forced_region(Some(Region::Cn));
        assert_eq!(detector.cached_region(), Some(Region::Cn));
    }

    #[test]
    fn test_cache_expires_after_ttl() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let (clock, now) = manual_clock(start);
        let mut detector = RegionDetector::new().with_clock(clock);

        assert_eq!(detector.cached_region(), None);
        detector.record(Region::Global);
        assert_eq!(detector.cached_region(), Some(Region::Global));

        *now.lock().unwrap() = start + chrono::Duration::seconds(300);
        assert_eq!(detector.cached_region(), Some(Region::Global));

        *now.lock().unwrap() = start + chrono::Duration::seconds(301);
        assert_eq!(detector.cached_region(), None);
    }

    #[test]
    fn test_seeded_last_check() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let (clock, _) = manual_clock(start + chrono::Duration::seconds(10));
        let detector = RegionDetector::new()
            .with_clock(clock)
            .with_last_check(RegionCheck {
                region: Region::Cn,
                checked_at: start,
            });
        assert_eq!(detector.cached_region(), Some(Region::Cn));
    }

    #[tokio::test]
    async fn test_detect_uses_cache_without_probing() {
        let detector_fetcher = HttpFetcher::default();
        let mut detector = RegionDetector::new()
            .with_probe_urls(vec!["http://127.0.0.1:9/unreachable".to_string()])
            .with_forced_region(Some(Region::Global));
        assert_eq!(detector.detect(&detector_fetcher).await, Region::Global);
        assert!(detector.last_check().is_none());
    }

    #[test]
    fn test_filter_sources_by_region() {
        let mut disabled = SourceConfig::new("x", "X", "https://x", SourceKind::Rss, &["general"]);
        disabled.enabled = false;
        let sources = vec![
            SourceConfig::new("tc", "TechCrunch", "https://tc", SourceKind::Rss, &["general"]),
            SourceConfig::new("36kr", "36Kr", "https://36kr", SourceKind::Rss, &["general"])
                .with_region(Region::Cn),
            disabled,
        ];

        assert_eq!(filter_sources_by_region(&sources, Region::Global).len(), 2);
        let cn = filter_sources_by_region(&sources, Region::Cn);
        assert_eq!(cn.len(), 1);
        assert_eq!(cn[0].id, "36kr");
    }
}
