//! Ranking orchestration: score, sort, balance

use chrono::{DateTime, Utc};
use newsheat_core::{Article, RankedArticle};
use tracing::{debug, info};

use crate::balance::{balance_sources, DEFAULT_MAX_PER_SOURCE};
use crate::duplicates::DuplicateIndex;
use crate::heat::HeatBreakdown;

/// Options for a ranking pass
#[derive(Debug, Clone)]
pub struct RankingOptions {
    /// Search keyword; empty disables the keyword term
    pub keyword: String,
    /// Cap per source when balancing
    pub max_per_source: usize,
    /// Apply per-source balancing after sorting
    pub balance: bool,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            max_per_source: DEFAULT_MAX_PER_SOURCE,
            balance: true,
        }
    }
}

impl RankingOptions {
    pub fn for_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }
}

/// Score every article against the full snapshot, sort hottest first and
/// optionally balance sources.
///
/// All scores are computed from `articles` as given, before any reordering,
/// so the result does not depend on input order beyond tie-breaking: equal
/// scores keep their input order.
pub fn rank_articles(
    articles: Vec<Article>,
    options: &RankingOptions,
    now: DateTime<Utc>,
) -> Vec<RankedArticle> {
    if articles.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedArticle> = {
        let index = DuplicateIndex::build(&articles);
        debug!(
            "Scoring {} articles ({} stories carried by several sources)",
            articles.len(),
            index.corroborated_stories()
        );

        let scored: Vec<(u8, Vec<String>)> = articles
            .iter()
            .map(|article| {
                let duplicate_sources = index.duplicate_sources(article);
                let score =
                    HeatBreakdown::compute(article, &options.keyword, duplicate_sources.len(), now)
                        .score();
                (score, duplicate_sources)
            })
            .collect();
        drop(index);

        articles
            .into_iter()
            .zip(scored)
            .map(|(article, (heat_score, duplicate_sources))| RankedArticle {
                article,
                heat_score,
                duplicate_sources,
            })
            .collect()
    };

    // Stable: ties keep input order
    ranked.sort_by(|a, b| b.heat_score.cmp(&a.heat_score));

    if options.balance {
        ranked = balance_sources(ranked, options.max_per_source);
    }

    info!(
        "Ranked {} articles for keyword {:?} (balance: {})",
        ranked.len(),
        options.keyword,
        options.balance
    );

    ranked
}

/// [`rank_articles`] against the current wall clock
pub fn rank_articles_now(articles: Vec<Article>, options: &RankingOptions) -> Vec<RankedArticle> {
    rank_articles(articles, options, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_rank_empty_input() {
        assert!(rank_articles(Vec::new(), &RankingOptions::default(), now()).is_empty());
    }

    #[test]
    fn test_rank_sorts_descending_and_keeps_ties_in_order() {
        let articles = vec![
            Article::new("first tie", "A"),
            Article::new("hot", "B").with_published_at(now().to_rfc3339()),
            Article::new("second tie", "C"),
        ];
        let options = RankingOptions {
            balance: false,
            ..RankingOptions::default()
        };

        let ranked = rank_articles(articles, &options, now());
        let titles: Vec<&str> = ranked.iter().map(|r| r.article.title.as_str()).collect();
        assert_eq!(titles, vec!["hot", "first tie", "second tie"]);
        assert_eq!(ranked[0].heat_score, 60);
        assert_eq!(ranked[1].heat_score, 20);
    }

    #[test]
    fn test_rank_scores_match_single_article_scorer() {
        let articles = vec![
            Article::new("OpenAI Announces GPT-5", "TechCrunch").with_published_at(now().to_rfc3339()),
            Article::new("OpenAI announces GPT-5!", "The Verge"),
            Article::new("Unrelated", "Wired").with_published_at("not a date"),
        ];
        let options = RankingOptions {
            keyword: "GPT".to_string(),
            balance: false,
            ..RankingOptions::default()
        };

        let ranked = rank_articles(articles.clone(), &options, now());
        for entry in &ranked {
            let expected = crate::heat::heat_score(&entry.article, &articles, "GPT", now());
            assert_eq!(entry.heat_score, expected, "{}", entry.article.title);
        }
    }
}
