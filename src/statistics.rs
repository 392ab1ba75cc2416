//! Aggregate views over a catalog: category and theorist tallies, the
//! related-theory network, and pooled veteran-teacher insights.
//!
//! Tallies are `BTreeMap`s so output is deterministic; presentation order is
//! applied separately by `sorted_by_count`.

use crate::catalog::{TheoryCatalog, TheoryId, UNKNOWN_CATEGORY};
use serde::Serialize;
use std::collections::BTreeMap;

const UNKNOWN_THEORIST: &str = "Unknown";

/// Count theories per category; uncategorized records land in `"unknown"`.
pub fn category_statistics(catalog: &TheoryCatalog) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for theory in catalog.theories() {
        let category = theory.category.as_deref().unwrap_or(UNKNOWN_CATEGORY);
        *counts.entry(category.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Count theories per theorist. Co-authored theories count once for each name.
pub fn theorist_statistics(catalog: &TheoryCatalog) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for theory in catalog.theories() {
        match &theory.theorist {
            Some(theorists) => {
                for name in theorists.names() {
                    *counts.entry(name.to_string()).or_insert(0) += 1;
                }
            }
            None => *counts.entry(UNKNOWN_THEORIST.to_string()).or_insert(0) += 1,
        }
    }
    counts
}

/// Tally entries ordered by count descending, then name ascending.
pub fn sorted_by_count(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    // BTreeMap iteration is already name-ordered and sort_by is stable.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Adjacency list of declared relationships, keyed by theory id.
///
/// Dangling ids are kept; this reflects what the document says, not what
/// resolves.
pub fn theory_network(catalog: &TheoryCatalog) -> BTreeMap<TheoryId, Vec<TheoryId>> {
    let mut network = BTreeMap::new();
    for theory in catalog.theories() {
        network.insert(theory.id, theory.related_theories().to_vec());
    }
    network
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Veteran-teacher insights pooled across the whole catalog.
pub struct PracticalInsights {
    pub practical_tips: Vec<String>,
    pub success_patterns: Vec<String>,
    pub common_challenges: Vec<String>,
}

/// Concatenate every record's insights in catalog order.
pub fn practical_insights(catalog: &TheoryCatalog) -> PracticalInsights {
    let mut insights = PracticalInsights::default();
    for theory in catalog.theories() {
        insights
            .practical_tips
            .extend(theory.practical_tips().iter().cloned());
        insights
            .success_patterns
            .extend(theory.success_patterns().iter().cloned());
        insights
            .common_challenges
            .extend(theory.common_challenges().iter().cloned());
    }
    insights
}
