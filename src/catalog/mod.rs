//! Theory catalog wiring.
//!
//! This module wraps the Educational Theory Library JSON document so callers
//! can load an ordered snapshot and query it by id, keyword, or category.
//! Types here mirror the document fields; `TheoryCatalog` owns the records and
//! answers the lookups the rest of the crate builds on.

pub mod error;
pub mod identity;
pub mod index;
pub mod model;

pub use error::{ExportError, LoadError};
pub use identity::{TheoryId, Theorists};
pub use index::{TheoryCatalog, UNKNOWN_CATEGORY};
pub use model::{TeacherInsights, Theory, THEORIES_FIELD};

pub use model::load_theories_from_path;
