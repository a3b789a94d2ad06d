//! Cross-source duplicate detection
//!
//! Two articles are the same story when their normalized titles are equal.
//! An article is corroborated by every *other source* carrying that story;
//! records without a source identifier neither give nor receive
//! corroboration.

use indexmap::IndexMap;
use newsheat_core::Article;

use crate::normalize::normalize_title;

/// Find the other sources reporting the same story as `article`.
///
/// Returns one entry per matching record in `all_articles`, in input order.
/// A source appears twice if it published the story twice. The article's
/// own source is never returned. Articles without a title have no duplicates.
pub fn find_duplicate_sources(article: &Article, all_articles: &[Article]) -> Vec<String> {
    let Some(own_source) = article.source.as_deref() else {
        return Vec::new();
    };
    if article.title.is_empty() {
        return Vec::new();
    }

    let key = normalize_title(&article.title);

    all_articles
        .iter()
        .filter(|other| !other.title.is_empty())
        .filter_map(|other| {
            let source = other.source.as_deref()?;
            (source != own_source && normalize_title(&other.title) == key).then(|| source.to_string())
        })
        .collect()
}

/// Sources grouped by normalized title, built once per candidate list.
///
/// Gives the same answers as [`find_duplicate_sources`] without rescanning
/// the list for every article.
#[derive(Debug, Default)]
pub struct DuplicateIndex<'a> {
    by_title: IndexMap<String, Vec<&'a str>>,
}

impl<'a> DuplicateIndex<'a> {
    pub fn build(all_articles: &'a [Article]) -> Self {
        let mut by_title: IndexMap<String, Vec<&'a str>> = IndexMap::new();

        for article in all_articles {
            if article.title.is_empty() {
                continue;
            }
            let Some(source) = article.source.as_deref() else {
                continue;
            };
            by_title
                .entry(normalize_title(&article.title))
                .or_default()
                .push(source);
        }

        Self { by_title }
    }

    /// Other sources carrying the same story as `article`
    pub fn duplicate_sources(&self, article: &Article) -> Vec<String> {
        let Some(own_source) = article.source.as_deref() else {
            return Vec::new();
        };
        if article.title.is_empty() {
            return Vec::new();
        }

        self.by_title
            .get(&normalize_title(&article.title))
            .map(|sources| {
                sources
                    .iter()
                    .filter(|source| **source != own_source)
                    .map(|source| source.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of stories reported by more than one distinct source
    pub fn corroborated_stories(&self) -> usize {
        self.by_title
            .values()
            .filter(|sources| sources.iter().any(|s| *s != sources[0]))
            .count()
    }
}
