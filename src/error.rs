use thiserror::Error;

use crate::models::Ecosystem;

/// Failures raised while extracting a dependency tree.
///
/// Every variant aborts the `extract` call that produced it; no partial
/// result is returned for the remaining manifests.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A dependency identity does not match the ecosystem's grammar.
    #[error("invalid {ecosystem} coordinate `{coordinate}`")]
    MalformedCoordinate {
        ecosystem: Ecosystem,
        coordinate: String,
    },

    /// An edge line that does not split into a single source/target pair.
    #[error("malformed dependency edge `{line}`")]
    MalformedEdge { line: String },

    #[error("dependency list cannot be empty: {filepath}")]
    EmptyManifest { filepath: String },

    #[error("failed to decode {filepath}: {source}")]
    InvalidContent {
        filepath: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{filepath} is not valid UTF-8")]
    InvalidEncoding {
        filepath: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ExtractError {
    pub(crate) fn coordinate(ecosystem: Ecosystem, coordinate: &str) -> Self {
        ExtractError::MalformedCoordinate {
            ecosystem,
            coordinate: coordinate.to_string(),
        }
    }

    pub(crate) fn edge(line: &str) -> Self {
        ExtractError::MalformedEdge {
            line: line.to_string(),
        }
    }
}
