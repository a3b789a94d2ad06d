//! Per-source balancing of a ranked list

use std::collections::HashMap;

use newsheat_core::Sourced;
use tracing::debug;

/// Default cap on results from a single source
pub const DEFAULT_MAX_PER_SOURCE: usize = 5;

/// Keep at most `max_per_source` items from each source, preserving order.
///
/// `items` is expected to be sorted hottest first, so each source keeps its
/// best entries. Items without a source are dropped.
pub fn balance_sources<T: Sourced>(items: Vec<T>, max_per_source: usize) -> Vec<T> {
    let total = items.len();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut balanced = Vec::with_capacity(total.min(64));

    for item in items {
        let source = match item.source() {
            Some(source) if !source.is_empty() => source,
            _ => continue,
        };

        let count = counts.entry(source.to_string()).or_insert(0);
        if *count < max_per_source {
            *count += 1;
            balanced.push(item);
        }
    }

    debug!(
        "Balanced {} items down to {} across {} sources (max {} per source)",
        total,
        balanced.len(),
        counts.len(),
        max_per_source
    );

    balanced
}
