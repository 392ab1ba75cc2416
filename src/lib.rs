//! Shared library for the Educational Theory Library catalog.
//!
//! The crate loads the theory document once into an immutable
//! `TheoryCatalog` and exposes the read-only queries built on it: lookup,
//! keyword search, category filtering and statistics, recommendations, AI
//! prompt generation, learning pathways, and JSON or CSV export. The
//! `etl-catalog` binary is a thin command-line front end over these calls.

use anyhow::{Context, Result, bail};
use std::env;
use std::path::{Path, PathBuf};

pub mod catalog;
pub mod export;
pub mod pathway;
pub mod prompt;
pub mod recommend;
pub mod statistics;

pub use catalog::{
    ExportError, LoadError, TeacherInsights, Theorists, Theory, TheoryCatalog, TheoryId,
    UNKNOWN_CATEGORY, load_theories_from_path,
};
pub use export::{ExportReport, export_csv, export_theories, project, project_all};
pub use pathway::{PathwayStep, create_pathway};
pub use prompt::{GeneratedPrompt, PromptContext, fill_placeholders, generate_ai_prompt};
pub use recommend::{ALL_SUBJECTS, Criteria, DEFAULT_MAX_RESULTS, recommend};
pub use statistics::{
    PracticalInsights, category_statistics, practical_insights, sorted_by_count,
    theorist_statistics, theory_network,
};

/// Document loaded when neither a flag nor the environment names one.
pub const DEFAULT_CATALOG_PATH: &str = "ETL_EN_Complete.json";
/// Environment variable consulted for the catalog path.
pub const CATALOG_PATH_ENV: &str = "ETL_CATALOG_PATH";

/// Pick the catalog document to load.
///
/// An explicit path wins, then a non-empty `ETL_CATALOG_PATH`, then the
/// library's default file name relative to the working directory.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    catalog_path_from_env(env::var(CATALOG_PATH_ENV).ok().as_deref())
}

fn catalog_path_from_env(value: Option<&str>) -> PathBuf {
    match value.map(str::trim) {
        Some(raw) if !raw.is_empty() => PathBuf::from(raw),
        _ => PathBuf::from(DEFAULT_CATALOG_PATH),
    }
}

/// Split comma- or whitespace-delimited lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a delimited list of theory ids, rejecting anything non-numeric.
pub fn parse_id_list(value: &str) -> Result<Vec<TheoryId>> {
    let tokens = split_list(value);
    if tokens.is_empty() {
        bail!("No theory ids provided");
    }
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<i64>()
                .map(TheoryId)
                .with_context(|| format!("invalid theory id '{token}'"))
        })
        .collect()
}

/// Parse `key=value` pairs into a prompt context.
pub fn parse_context_pairs(pairs: &[String]) -> Result<PromptContext> {
    let mut context = PromptContext::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("context entry '{pair}' must look like key=value");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("context entry '{pair}' has an empty key");
        }
        context.insert(key.to_string(), value.to_string());
    }
    Ok(context)
}
