//! Ordered, read-only view over a loaded theory library.
//!
//! Records keep their document order; every query is a linear scan over that
//! order, so results are deterministic and mirror how the library reads.

use crate::catalog::error::LoadError;
use crate::catalog::identity::TheoryId;
use crate::catalog::model::{Theory, load_theories_from_path, parse_theories};
use std::path::Path;

/// Category bucket used for records that do not declare one.
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Clone, Debug, Default)]
/// Theory records in document order.
pub struct TheoryCatalog {
    theories: Vec<Theory>,
}

impl TheoryCatalog {
    /// Load the catalog from disk.
    ///
    /// An empty `Ok` catalog means the document really held no records; read
    /// and parse failures come back as `LoadError`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let theories = load_theories_from_path(path)?;
        tracing::debug!(
            path = %path.display(),
            count = theories.len(),
            "loaded theory catalog"
        );
        Ok(Self { theories })
    }

    /// Load the catalog, logging and swallowing any failure.
    ///
    /// Matches the forgiving behaviour of the library's usage examples; prefer
    /// `load` when the caller needs to tell "no data" from "load failed".
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(
                    error = %err,
                    "error loading theories; continuing with empty catalog"
                );
                Self::default()
            }
        }
    }

    /// Parse an in-memory document. `origin` only labels errors.
    pub fn from_json_str(origin: &Path, data: &str) -> Result<Self, LoadError> {
        Ok(Self {
            theories: parse_theories(origin, data)?,
        })
    }

    pub fn from_theories(theories: Vec<Theory>) -> Self {
        Self { theories }
    }

    pub fn theories(&self) -> &[Theory] {
        &self.theories
    }

    pub fn len(&self) -> usize {
        self.theories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theories.is_empty()
    }

    /// Resolve a theory by id; the first match wins when ids repeat.
    pub fn find_by_id(&self, id: TheoryId) -> Option<&Theory> {
        self.theories.iter().find(|theory| theory.id == id)
    }

    /// Case-insensitive substring search over name, key concepts, and
    /// educational applications.
    pub fn search_by_keyword(&self, keyword: &str) -> Vec<&Theory> {
        let needle = keyword.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&needle);
        let results: Vec<&Theory> = self
            .theories
            .iter()
            .filter(|theory| {
                theory
                    .theory_name
                    .as_deref()
                    .is_some_and(|name| contains(name))
                    || theory.key_concepts().iter().any(|c| contains(c.as_str()))
                    || theory
                        .educational_applications()
                        .iter()
                        .any(|a| contains(a.as_str()))
            })
            .collect();
        tracing::debug!(keyword, matches = results.len(), "keyword search");
        results
    }

    /// Exact, case-sensitive category match. Uncategorized records never match.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Theory> {
        self.theories
            .iter()
            .filter(|theory| theory.category.as_deref() == Some(category))
            .collect()
    }

    /// Like `filter_by_category`, but `"unknown"` also selects records with
    /// no category, matching the buckets of `category_statistics`.
    pub fn filter_by_category_or_unknown(&self, category: &str) -> Vec<&Theory> {
        self.theories
            .iter()
            .filter(|theory| {
                theory.category.as_deref().unwrap_or(UNKNOWN_CATEGORY) == category
            })
            .collect()
    }

    /// Resolve a theory's `related_theories` in listed order, skipping ids
    /// that do not exist in this catalog.
    pub fn related_theories(&self, id: TheoryId) -> Vec<&Theory> {
        let Some(theory) = self.find_by_id(id) else {
            return Vec::new();
        };
        theory
            .related_theories()
            .iter()
            .filter_map(|related| self.find_by_id(*related))
            .collect()
    }
}
