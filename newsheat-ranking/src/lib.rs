//! Ranking engine for aggregated news
//!
//! Given a flat list of extracted articles from heterogeneous sources this
//! crate assigns each one a bounded heat score, detects the same story
//! reported by several sources, and selects a per-source capped result set.
//!
//! ## Pipeline
//! - [`normalize_title`] reduces a title to its duplicate-comparison key
//! - [`find_duplicate_sources`] / [`DuplicateIndex`] find corroborating sources
//! - [`heat_score`] combines recency, keyword match, engagement and corroboration
//! - [`balance_sources`] caps how many results one source may contribute
//! - [`rank_articles`] runs all of the above over one snapshot

pub mod balance;
pub mod duplicates;
pub mod heat;
pub mod normalize;
pub mod rank;

pub use balance::{balance_sources, DEFAULT_MAX_PER_SOURCE};
pub use duplicates::{find_duplicate_sources, DuplicateIndex};
pub use heat::{heat_score, heat_score_now, HeatBreakdown, Recency};
pub use normalize::normalize_title;
pub use rank::{rank_articles, rank_articles_now, RankingOptions};
