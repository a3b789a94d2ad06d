//! File-share and magnet link extraction from fetched pages

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use newsheat_core::{LinkRecord, MediaKind, PageRef, PanKind};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::html::truncate_chars;
use crate::http::HttpFetcher;

/// `source` value carried by every extracted link
pub const LINK_SOURCE: &str = "deep-search";

/// Pages shorter than this (in characters) are treated as anti-bot stubs
pub const MIN_PAGE_CHARS: usize = 500;

pub const PAGE_TIMEOUT: Duration = Duration::from_secs(8);

const TITLE_MAX_CHARS: usize = 80;

/// Characters of context inspected around a share link
const SHARE_CONTEXT: (usize, usize) = (500, 300);
/// Characters of context inspected around a magnet link
const MAGNET_CONTEXT: (usize, usize) = (300, 200);

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid link extraction regex")
}

static SHARE_PATTERNS: LazyLock<Vec<(PanKind, Regex)>> = LazyLock::new(|| {
    vec![
        (PanKind::Quark, compile(r"https?://pan\.quark\.cn/s/[a-zA-Z0-9]+")),
        (PanKind::Baidu, compile(r"https?://pan\.baidu\.com/s/[a-zA-Z0-9_-]+")),
        (PanKind::Aliyun, compile(r"https?://(?:www\.)?alipan\.com/s/[a-zA-Z0-9]+")),
        (PanKind::Uc, compile(r"https?://drive\.uc\.cn/s/[a-zA-Z0-9]+")),
    ]
});

static MAGNET: LazyLock<Regex> = LazyLock::new(|| compile(r"magnet:\?xt=urn:btih:[a-zA-Z0-9]+"));

static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?:提取码|密码|提取密码)[：:\s]*([a-zA-Z0-9]{4,8})"),
        compile(r"(?i)(?:pwd|code)[=：:\s]*([a-zA-Z0-9]{4,8})"),
    ]
});

// First match wins
static QUALITY_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"4[kK]|2160[pP]|[uU][hH][dD]"), "4K"),
        (compile(r"1080[pP]|[fF][hH][dD]|[fF]ull\s*[hH][dD]"), "1080P"),
        (compile(r"720[pP]"), "720P"),
        (compile(r"480[pP]"), "SD"),
    ]
});

static FORMAT_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\bDSD\d*\b|DSD(?:64|128|256|512)"), "DSD"),
        (compile(r"(?i)Hi-?Res|高解析"), "Hi-Res"),
        (compile(r"(?i)\bFLAC\b"), "FLAC"),
        (compile(r"(?i)\bAPE\b"), "APE"),
        (compile(r"(?i)\bWAV\b"), "WAV"),
        (compile(r"(?i)\bAIFF?\b"), "AIFF"),
        (compile(r"(?i)\bMP3\b|320\s*[kK]"), "MP3"),
        (compile(r"(?i)\bAAC\b"), "AAC"),
        (compile(r"(?i)\bOGG\b"), "OGG"),
        (compile(r"无损"), "FLAC"),
    ]
});

static TITLE_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<title[^>]*>([^<]+)</title>"));
static H1_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<h1[^>]*>([^<]+)</h1>"));
static TITLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\s*[-_|–—]\s*(首页|网站|资源|下载).*$"));

/// Deep-fetches pages and pulls share links out of them
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    fetcher: HttpFetcher,
    media: MediaKind,
    page_timeout: Duration,
}

impl LinkExtractor {
    pub fn new(fetcher: HttpFetcher, media: MediaKind) -> Self {
        Self {
            fetcher,
            media,
            page_timeout: PAGE_TIMEOUT,
        }
    }

    /// Fetch one page and extract its links. A page without a URL yields
    /// nothing; HTTP failures are returned as errors.
    pub async fn fetch_and_extract(&self, page: &PageRef) -> Result<Vec<LinkRecord>, SourceError> {
        if page.url.is_empty() {
            return Ok(Vec::new());
        }

        let html = self.fetcher.fetch_once(&page.url, self.page_timeout).await?;
        let links = extract_links(&html, &page.url, &page.title, self.media);
        debug!(
            "{} -> {} bytes, {} links",
            page.url,
            html.len(),
            links.len()
        );
        Ok(links)
    }
}

/// Extract share and magnet links from page HTML.
///
/// Each distinct link URL is reported once. Share links come first, in host
/// order (quark, baidu, aliyun, uc), then magnets. Pages shorter than
/// [`MIN_PAGE_CHARS`] yield nothing.
pub fn extract_links(html: &str, page_url: &str, page_title: &str, media: MediaKind) -> Vec<LinkRecord> {
    let length = html.chars().count();
    if length < MIN_PAGE_CHARS {
        warn!("{} -> page too short ({} chars)", page_url, length);
        return Vec::new();
    }

    let title = extract_title(html).unwrap_or_else(|| page_title.to_string());
    let mut seen: HashSet<&str> = HashSet::new();
    let mut links = Vec::new();

    for (pan, pattern) in SHARE_PATTERNS.iter() {
        for m in pattern.find_iter(html) {
            if !seen.insert(m.as_str()) {
                continue;
            }
            let context = context_window(html, m.start(), m.end(), SHARE_CONTEXT);
            links.push(link_record(&title, *pan, m.as_str(), context, page_url, media, true));
        }
    }

    for m in MAGNET.find_iter(html) {
        if !seen.insert(m.as_str()) {
            continue;
        }
        let context = context_window(html, m.start(), m.end(), MAGNET_CONTEXT);
        links.push(link_record(&title, PanKind::Magnet, m.as_str(), context, page_url, media, false));
    }

    links
}

fn link_record(
    title: &str,
    pan: PanKind,
    url: &str,
    context: &str,
    page_url: &str,
    media: MediaKind,
    with_code: bool,
) -> LinkRecord {
    let (quality, format) = match media {
        MediaKind::Film => (detect_quality(context).map(str::to_string), None),
        MediaKind::Music => (None, detect_format(context).map(str::to_string)),
    };

    LinkRecord {
        title: title.to_string(),
        pan,
        url: url.to_string(),
        quality,
        format,
        extract_code: if with_code { find_extract_code(context) } else { None },
        source: LINK_SOURCE.to_string(),
        page_url: page_url.to_string(),
    }
}

/// Slice of `html` spanning `before` characters ahead of `start` and
/// `after` characters past `end`
fn context_window(html: &str, start: usize, end: usize, (before, after): (usize, usize)) -> &str {
    let from = html[..start]
        .char_indices()
        .rev()
        .nth(before.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = html[end..]
        .char_indices()
        .nth(after)
        .map(|(i, _)| end + i)
        .unwrap_or(html.len());
    &html[from..to]
}

/// Page title from `<title>` (site suffixes stripped) or the first `<h1>`.
///
/// A `<title>` that strips down to nothing yields `None`; `<h1>` is only
/// consulted when the page has no `<title>` at all.
pub fn extract_title(html: &str) -> Option<String> {
    if let Some(caps) = TITLE_TAG.captures(html) {
        let title = caps[1].trim();
        let title = TITLE_SUFFIX.replace(title, "");
        let title = truncate_chars(title.trim(), TITLE_MAX_CHARS).to_string();
        return Some(title).filter(|t| !t.is_empty());
    }

    H1_TAG
        .captures(html)
        .map(|caps| truncate_chars(caps[1].trim(), TITLE_MAX_CHARS).to_string())
        .filter(|title| !title.is_empty())
}

/// Video quality tag found in `context`
pub fn detect_quality(context: &str) -> Option<&'static str> {
    first_label(&QUALITY_PATTERNS, context)
}

/// Audio format tag found in `context`
pub fn detect_format(context: &str) -> Option<&'static str> {
    first_label(&FORMAT_PATTERNS, context)
}

fn first_label(patterns: &[(Regex, &'static str)], context: &str) -> Option<&'static str> {
    patterns
        .iter()
        .find(|(pattern, _)| pattern.is_match(context))
        .map(|(_, label)| *label)
}

/// Extraction code or password printed near a link
pub fn find_extract_code(context: &str) -> Option<String> {
    CODE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(context))
        .map(|caps| caps[1].to_string())
}
