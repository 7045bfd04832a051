use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or persisting the name-mapping cache.
///
/// Persistence failures are surfaced to the caller instead of swallowed:
/// losing the cache costs every future run a full similarity search.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Reading or writing the mapping file failed
    #[error("mapping file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping file contents could not be parsed or encoded
    #[error("mapping file {path:?}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
