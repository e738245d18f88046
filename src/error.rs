use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort extraction of a single component document.
///
/// Everything else (missing inputs block, missing description, unusable
/// config) resolves to an empty or default value instead of an error.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document could not be read at all.
    #[error("error reading YAML file {}: {error}", path.display())]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },

    /// The document is not well-formed YAML.
    #[error("error parsing YAML file {source_id}: {error}")]
    Parse {
        source_id: String,
        error: serde_yaml::Error,
    },
}

impl ExtractError {
    /// Identifier of the offending source, for reporting.
    pub fn source_id(&self) -> String {
        match self {
            ExtractError::Read { path, .. } => path.display().to_string(),
            ExtractError::Parse { source_id, .. } => source_id.clone(),
        }
    }
}
