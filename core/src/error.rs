use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the search core.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A term-oriented operation was given a string that normalized to
    /// zero or more than one token.
    #[error("term {0:?} must resolve to a single token")]
    InvalidTerm(String),

    /// One of the persisted index artifacts is absent.
    #[error("missing index artifact: {}", .0.display())]
    MissingArtifact(PathBuf),

    /// A persisted artifact was written with an incompatible format version.
    #[error("index artifact {} has format version {found}, expected {expected}", .path.display())]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to encode or decode index artifact: {0}")]
    Codec(#[from] bincode::Error),

    #[error("failed to encode or decode document map: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
