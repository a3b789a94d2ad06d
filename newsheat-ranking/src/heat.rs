//! Heat score calculation
//!
//! The score is additive: every term is computed independently, summed, and
//! the sum is clamped to `0..=100` at the end. Individual terms are not
//! capped, so a story carried by many sources saturates through the clamp.

use chrono::{DateTime, FixedOffset, Utc};
use newsheat_core::Article;

use crate::duplicates::find_duplicate_sources;

const BASE_SCORE: i64 = 20;

const RECENCY_DAY: i64 = 40;
const RECENCY_TWO_DAYS: i64 = 28;
const RECENCY_THREE_DAYS: i64 = 16;
const RECENCY_OLDER: i64 = 8;
const RECENCY_UNPARSABLE: i64 = 10;

const KEYWORD_EXACT_TITLE: i64 = 30;
const KEYWORD_IN_TITLE: i64 = 15;
const KEYWORD_IN_SUMMARY: i64 = 5;

/// Max bonus from one engagement signal
const ENGAGEMENT_CAP: i64 = 20;
const OFFICIAL_BONUS: i64 = 10;
const CORROBORATION_BONUS: i64 = 20;

pub const MAX_HEAT: u8 = 100;

/// Recency bucket of an article's publication time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recency {
    /// No timestamp at all
    Unknown,
    /// Timestamp present but not a valid offset-qualified ISO 8601 date
    Unparsable,
    /// Published at most 24h ago (future timestamps included)
    Day,
    TwoDays,
    ThreeDays,
    Older,
}

impl Recency {
    pub fn classify(published_at: Option<&str>, now: DateTime<Utc>) -> Self {
        let Some(raw) = published_at else {
            return Recency::Unknown;
        };
        let Some(published) = parse_timestamp(raw) else {
            return Recency::Unparsable;
        };

        let hours_ago = (now - published).num_milliseconds() as f64 / 3_600_000.0;
        if hours_ago <= 24.0 {
            Recency::Day
        } else if hours_ago <= 48.0 {
            Recency::TwoDays
        } else if hours_ago <= 72.0 {
            Recency::ThreeDays
        } else {
            Recency::Older
        }
    }

    pub fn points(&self) -> i64 {
        match self {
            Recency::Unknown => 0,
            Recency::Unparsable => RECENCY_UNPARSABLE,
            Recency::Day => RECENCY_DAY,
            Recency::TwoDays => RECENCY_TWO_DAYS,
            Recency::ThreeDays => RECENCY_THREE_DAYS,
            Recency::Older => RECENCY_OLDER,
        }
    }
}

/// Parse an ISO 8601 timestamp that carries a UTC offset.
/// Naive timestamps are rejected: their age cannot be computed.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::<FixedOffset>::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .or_else(|_| DateTime::<FixedOffset>::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Per-term contributions, before the clamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatBreakdown {
    pub base: i64,
    pub recency: i64,
    pub keyword: i64,
    pub hn_engagement: i64,
    pub reddit_engagement: i64,
    pub official: i64,
    pub corroboration: i64,
}

impl HeatBreakdown {
    /// Compute every term for `article` given how many other sources carry it
    pub fn compute(
        article: &Article,
        keyword: &str,
        duplicate_count: usize,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            base: BASE_SCORE,
            recency: Recency::classify(article.published_at.as_deref(), now).points(),
            keyword: keyword_points(article, keyword),
            hn_engagement: article.hn_points.map(engagement_points).unwrap_or(0),
            reddit_engagement: article.reddit_upvotes.map(engagement_points).unwrap_or(0),
            official: if article.is_official() { OFFICIAL_BONUS } else { 0 },
            corroboration: duplicate_count as i64 * CORROBORATION_BONUS,
        }
    }

    /// Sum of all terms, unclamped
    pub fn raw_total(&self) -> i64 {
        self.base
            + self.recency
            + self.keyword
            + self.hn_engagement
            + self.reddit_engagement
            + self.official
            + self.corroboration
    }

    pub fn score(&self) -> u8 {
        self.raw_total().clamp(0, MAX_HEAT as i64) as u8
    }
}

/// Exact title match beats title substring beats summary substring.
/// Comparison is case-insensitive only; whitespace and punctuation count.
fn keyword_points(article: &Article, keyword: &str) -> i64 {
    if keyword.is_empty() {
        return 0;
    }

    let keyword = keyword.to_lowercase();
    let title = article.title.to_lowercase();
    let summary = article.summary.as_deref().unwrap_or_default().to_lowercase();

    if keyword == title {
        KEYWORD_EXACT_TITLE
    } else if title.contains(&keyword) {
        KEYWORD_IN_TITLE
    } else if summary.contains(&keyword) {
        KEYWORD_IN_SUMMARY
    } else {
        0
    }
}

fn engagement_points(count: u64) -> i64 {
    ((count / 10) as i64).min(ENGAGEMENT_CAP)
}

/// Heat score of `article` within the candidate set `all_articles`.
///
/// `all_articles` must be the complete, unscored snapshot: the corroboration
/// term depends on every other record in it.
pub fn heat_score(
    article: &Article,
    all_articles: &[Article],
    keyword: &str,
    now: DateTime<Utc>,
) -> u8 {
    let duplicates = find_duplicate_sources(article, all_articles).len();
    HeatBreakdown::compute(article, keyword, duplicates, now).score()
}

/// [`heat_score`] against the current wall clock
pub fn heat_score_now(article: &Article, all_articles: &[Article], keyword: &str) -> u8 {
    heat_score(article, all_articles, keyword, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn hours_ago(hours: i64) -> String {
        (fixed_now() - Duration::hours(hours)).to_rfc3339()
    }

    #[test]
    fn test_recency_buckets() {
        let now = fixed_now();
        assert_eq!(Recency::classify(Some(&hours_ago(0)), now), Recency::Day);
        assert_eq!(Recency::classify(Some(&hours_ago(24)), now), Recency::Day);
        assert_eq!(Recency::classify(Some(&hours_ago(25)), now), Recency::TwoDays);
        assert_eq!(Recency::classify(Some(&hours_ago(48)), now), Recency::TwoDays);
        assert_eq!(Recency::classify(Some(&hours_ago(50)), now), Recency::ThreeDays);
        assert_eq!(Recency::classify(Some(&hours_ago(73)), now), Recency::Older);
        assert_eq!(Recency::classify(Some(&hours_ago(-5)), now), Recency::Day);
    }

    #[test]
    fn test_recency_unparsable_and_missing() {
        let now = fixed_now();
        assert_eq!(Recency::classify(None, now), Recency::Unknown);
        assert_eq!(Recency::classify(Some("yesterday"), now), Recency::Unparsable);
        assert_eq!(Recency::classify(Some("2025-03-14T10:00:00"), now), Recency::Unparsable);
        assert_eq!(Recency::Unknown.points(), 0);
        assert_eq!(Recency::Unparsable.points(), 10);
    }

    #[test]
    fn test_timestamp_formats() {
        let now = fixed_now();
        assert_eq!(Recency::classify(Some("2025-03-14T10:00:00Z"), now), Recency::Day);
        assert_eq!(Recency::classify(Some("2025-03-14 10:00:00+00:00"), now), Recency::Day);
        assert_eq!(Recency::classify(Some("2025-03-12T10:00:00.123+0000"), now), Recency::ThreeDays);
    }

    #[test]
    fn test_keyword_tiers() {
        let article = Article::new("Rust Async Book", "Blog").with_summary("all about tokio");
        assert_eq!(keyword_points(&article, "rust async book"), 30);
        assert_eq!(keyword_points(&article, "ASYNC"), 15);
        assert_eq!(keyword_points(&article, "Tokio"), 5);
        assert_eq!(keyword_points(&article, "python"), 0);
        assert_eq!(keyword_points(&article, ""), 0);
    }

    #[test]
    fn test_keyword_exact_match_is_not_normalized() {
        let article = Article::new("Rust Async Book!", "Blog");
        assert_eq!(keyword_points(&article, "rust async book"), 15);
        assert_eq!(keyword_points(&article, " rust async book! "), 0);
    }

    #[test]
    fn test_engagement_is_capped() {
        assert_eq!(engagement_points(0), 0);
        assert_eq!(engagement_points(9), 0);
        assert_eq!(engagement_points(57), 5);
        assert_eq!(engagement_points(250), 20);
        assert_eq!(engagement_points(u64::MAX), 20);
    }

    #[test]
    fn test_fresh_exact_match_scores_ninety() {
        let now = fixed_now();
        let article = Article::new("GPT", "TechCrunch").with_published_at(now.to_rfc3339());
        let all = vec![article.clone()];
        assert_eq!(heat_score(&article, &all, "gpt", now), 90);
    }

    #[test]
    fn test_official_blog_without_timestamp_scores_thirty() {
        let article = Article::new("Introducing our new model", "OpenAI Blog")
            .with_category("official_blog");
        let all = vec![article.clone()];
        assert_eq!(heat_score(&article, &all, "", fixed_now()), 30);
    }

    #[test]
    fn test_score_is_clamped() {
        let now = fixed_now();
        let sources = ["A", "B", "C", "D", "E", "F", "G"];
        let all: Vec<Article> = sources
            .iter()
            .map(|s| Article::new("Same headline", *s).with_published_at(now.to_rfc3339()))
            .collect();

        let breakdown = HeatBreakdown::compute(&all[0], "same headline", 6, now);
        assert_eq!(breakdown.corroboration, 120);
        assert!(breakdown.raw_total() > 100);
        assert_eq!(heat_score(&all[0], &all, "same headline", now), 100);
    }

    #[test]
    fn test_engagement_terms_stack() {
        let now = fixed_now();
        let mut article = Article::new("Show HN: a tiny database", "Hacker News");
        article.hn_points = Some(120);
        article.reddit_upvotes = Some(35);
        let all = vec![article.clone()];
        // base 20 + hn 12 + reddit 3
        assert_eq!(heat_score(&article, &all, "", now), 35);
    }
}
