//! Source catalog: built-in curated list and on-disk `sources.json`

use std::path::Path;

use newsheat_core::{Region, SourceConfig, SourceKind, SourceList};
use tracing::{debug, info};

use crate::error::SourceError;

/// Curated list of technology news sources
pub fn default_sources() -> Vec<SourceConfig> {
    use SourceKind::{Api, NewsletterRss, Rss};

    vec![
        // Community
        SourceConfig::new(
            "hackernews",
            "Hacker News",
            "https://hn.algolia.com/api/v1/search?tags=front_page",
            Api,
            &["general", "frontend", "backend", "ai", "devops", "security", "os"],
        )
        .with_category("community"),
        SourceConfig::new(
            "reddit-programming",
            "r/programming",
            "https://www.reddit.com/r/programming/.rss",
            Rss,
            &["general", "backend", "frontend"],
        )
        .with_category("community"),
        SourceConfig::new(
            "reddit-machinelearning",
            "r/MachineLearning",
            "https://www.reddit.com/r/MachineLearning/.rss",
            Rss,
            &["ai"],
        )
        .with_category("community"),
        // General tech press
        SourceConfig::new(
            "techcrunch",
            "TechCrunch",
            "https://techcrunch.com/feed/",
            Rss,
            &["general", "ai", "mobile"],
        )
        .with_category("startup"),
        SourceConfig::new(
            "theverge",
            "The Verge",
            "https://www.theverge.com/rss/index.xml",
            Rss,
            &["general", "mobile", "hardware"],
        )
        .with_category("tech"),
        SourceConfig::new(
            "wired",
            "Wired",
            "https://www.wired.com/feed/rss",
            Rss,
            &["general", "security"],
        )
        .with_category("tech"),
        SourceConfig::new(
            "arstechnica",
            "Ars Technica",
            "https://feeds.arstechnica.com/arstechnica/index",
            Rss,
            &["general", "security", "os", "hardware"],
        )
        .with_category("tech"),
        SourceConfig::new(
            "mit-tech-review",
            "MIT Technology Review",
            "https://www.technologyreview.com/feed/",
            Rss,
            &["general", "ai"],
        )
        .with_category("research"),
        // Official blogs
        SourceConfig::new(
            "openai-news",
            "OpenAI News",
            "https://openai.com/news/rss.xml",
            Rss,
            &["ai"],
        )
        .with_category("official_blog"),
        SourceConfig::new(
            "rust-blog",
            "Rust Blog",
            "https://blog.rust-lang.org/feed.xml",
            Rss,
            &["backend"],
        )
        .with_category("official_blog"),
        SourceConfig::new(
            "kubernetes-blog",
            "Kubernetes Blog",
            "https://kubernetes.io/feed.xml",
            Rss,
            &["devops"],
        )
        .with_category("official_blog"),
        SourceConfig::new(
            "android-developers",
            "Android Developers Blog",
            "https://android-developers.googleblog.com/feeds/posts/default",
            Rss,
            &["mobile"],
        )
        .with_category("official_blog"),
        // Domain specialists
        SourceConfig::new(
            "css-tricks",
            "CSS-Tricks",
            "https://css-tricks.com/feed/",
            Rss,
            &["frontend"],
        )
        .with_category("tutorial"),
        SourceConfig::new(
            "krebs",
            "Krebs on Security",
            "https://krebsonsecurity.com/feed/",
            Rss,
            &["security"],
        )
        .with_category("security"),
        SourceConfig::new("lwn", "LWN.net", "https://lwn.net/headlines/rss", Rss, &["os"])
            .with_category("os"),
        SourceConfig::new(
            "coindesk",
            "CoinDesk",
            "https://www.coindesk.com/arc/outboundfeeds/rss/",
            Rss,
            &["blockchain"],
        )
        .with_category("crypto"),
        SourceConfig::new(
            "hackaday",
            "Hackaday",
            "https://hackaday.com/blog/feed/",
            Rss,
            &["hardware"],
        )
        .with_category("hardware"),
        SourceConfig::new(
            "tldr-tech",
            "TLDR Newsletter",
            "https://tldr.tech/api/rss/tech",
            NewsletterRss,
            &["general", "ai", "devops"],
        )
        .with_category("newsletter"),
        // Mainland China
        SourceConfig::new("36kr", "36Kr", "https://36kr.com/feed", Rss, &["general", "ai"])
            .with_region(Region::Cn)
            .with_language("zh")
            .with_category("startup"),
        SourceConfig::new(
            "infoq-cn",
            "InfoQ 中文",
            "https://www.infoq.cn/feed",
            Rss,
            &["general", "backend", "devops", "ai"],
        )
        .with_region(Region::Cn)
        .with_language("zh")
        .with_category("tech"),
        SourceConfig::new(
            "oschina",
            "开源中国",
            "https://www.oschina.net/news/rss",
            Rss,
            &["general", "backend", "os"],
        )
        .with_region(Region::Cn)
        .with_language("zh")
        .with_category("tech"),
        SourceConfig::new("sspai", "少数派", "https://sspai.com/feed", Rss, &["general", "mobile"])
            .with_region(Region::Cn)
            .with_language("zh")
            .with_category("tech"),
    ]
}

/// Load a `{"sources": [...]}` file
pub fn load_sources(path: impl AsRef<Path>) -> Result<Vec<SourceConfig>, SourceError> {
    let path = path.as_ref();
    debug!("Loading sources from {}", path.display());

    let list = SourceList::load(path)
        .map_err(|e| SourceError::InvalidConfig(format!("{}: {}", path.display(), e)))?;

    info!("Loaded {} sources from {}", list.sources.len(), path.display());
    Ok(list.sources)
}
