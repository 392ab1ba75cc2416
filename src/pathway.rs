//! Learning pathways: an ordered walk through selected theories.

use crate::catalog::{TheoryCatalog, TheoryId};
use serde::Serialize;

const DEFAULT_FOCUS: &str = "Core learning principle";
const DEFAULT_TIP: &str = "No specific tip available";

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One step of a pathway. `step` is 1-based over resolved theories only.
pub struct PathwayStep {
    pub step: usize,
    pub theory: String,
    pub focus: String,
    pub applications: Vec<String>,
    pub tip: String,
}

/// Resolve `ids` in order and summarize each theory as a pathway step.
///
/// Unknown ids are skipped without leaving a gap in the numbering.
pub fn create_pathway(catalog: &TheoryCatalog, ids: &[TheoryId]) -> Vec<PathwayStep> {
    ids.iter()
        .filter_map(|id| catalog.find_by_id(*id))
        .enumerate()
        .map(|(index, theory)| PathwayStep {
            step: index + 1,
            theory: theory.display_name(),
            focus: theory
                .key_principles()
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_FOCUS.to_string()),
            applications: theory.educational_applications().to_vec(),
            tip: theory
                .practical_tips()
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_TIP.to_string()),
        })
        .collect()
}
