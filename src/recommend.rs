//! Criteria-driven theory recommendations.
//!
//! Filters are conjunctive and only apply when the matching criterion is
//! set. There is no scoring: the first `max_results` survivors in catalog
//! order are returned.

use crate::catalog::{Theory, TheoryCatalog};
use serde::Deserialize;

/// Subject entry that makes a theory match every subject query.
pub const ALL_SUBJECTS: &str = "all_subjects";
pub const DEFAULT_MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, Default, Deserialize)]
/// Optional filters accepted by `recommend`.
pub struct Criteria {
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub learning_objective: Option<String>,
    /// Defaults to `DEFAULT_MAX_RESULTS` when unset.
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl Criteria {
    pub fn grade_level(mut self, grade_level: impl Into<String>) -> Self {
        self.grade_level = Some(grade_level.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn learning_objective(mut self, objective: impl Into<String>) -> Self {
        self.learning_objective = Some(objective.into());
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    fn accepts(&self, theory: &Theory) -> bool {
        if let Some(grade) = &self.grade_level {
            if !theory.grade_levels().contains(grade) {
                return false;
            }
        }
        if let Some(subject) = &self.subject {
            let subjects = theory.subjects();
            if !subjects.iter().any(|s| s == subject || s == ALL_SUBJECTS) {
                return false;
            }
        }
        if let Some(objective) = &self.learning_objective {
            let needle = objective.to_lowercase();
            if !theory
                .learning_objectives()
                .iter()
                .any(|o| o.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}

/// Theories passing every supplied filter, truncated in catalog order.
pub fn recommend<'a>(catalog: &'a TheoryCatalog, criteria: &Criteria) -> Vec<&'a Theory> {
    let limit = criteria.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    let results: Vec<&Theory> = catalog
        .theories()
        .iter()
        .filter(|theory| criteria.accepts(theory))
        .take(limit)
        .collect();
    tracing::debug!(?criteria, matches = results.len(), "recommendation");
    results
}
