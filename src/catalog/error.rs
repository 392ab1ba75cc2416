use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a catalog document could not be turned into records.
///
/// Kept distinct from an empty catalog so callers never confuse "the file
/// had no theories" with "the file could not be read".
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse catalog {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {} has no '{field}' array", path.display())]
    MissingTheories { path: PathBuf, field: &'static str },
}

/// Failure while writing a projected or tabular export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unable to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unable to encode csv row: {0}")]
    Csv(#[from] csv::Error),

    #[error("unable to write export {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
