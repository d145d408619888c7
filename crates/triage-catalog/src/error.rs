use std::path::PathBuf;

use thiserror::Error;

/// The catalog could not be loaded. Fatal at start-up.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("catalog contains no models")]
    Empty,

    #[error("catalog entry has an empty model name")]
    EmptyName,

    #[error("duplicate model name: {0}")]
    DuplicateModel(String),

    #[error("model '{0}' has no backend tool")]
    EmptyTool(String),

    #[error("model '{0}' declares no required parameters")]
    EmptyParameters(String),

    #[error("model '{0}' declares a blank parameter name")]
    BlankParameter(String),

    #[error("model '{model}' lists parameter '{parameter}' more than once")]
    DuplicateParameter { model: String, parameter: String },
}
