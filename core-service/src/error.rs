//! Error types for artifact loading and inference

use std::path::PathBuf;

use thiserror::Error;

/// Failure to bring the artifacts up. The predictor is never built when
/// any of these occur; callers report "inference unavailable" instead.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact files not found: {}", display_paths(.0))]
    NotFound(Vec<PathBuf>),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed artifact {name}: {reason}")]
    Malformed { name: String, reason: String },

    #[error("checksum mismatch for {name}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("classifier expects {expected} features but the training schema has {actual} columns")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("classifier backend error: {0}")]
    Backend(String),
}

impl ArtifactError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runtime failure while scoring a record
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference failed: {0}")]
    Backend(String),

    #[error("classifier returned {0} predictions for a single record")]
    RowCount(usize),

    #[error("class code {0} is not known to the label encoder")]
    UnknownClassCode(i64),

    #[error("label '{0}' is not a known severity class")]
    UnknownLabel(String),
}

pub type ArtifactResult<T> = Result<T, ArtifactError>;
pub type InferenceResult<T> = Result<T, InferenceError>;
