//! Error type shared by the storage layer, the board model and the controllers.

use thiserror::Error;

/// Failures that can occur while loading, mutating or persisting the board.
///
/// Form validation problems are not errors; they are reported through
/// [`crate::lifecycle::SubmitOutcome::Invalid`].
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown project: {0}")]
    UnknownProject(String),

    #[error("corrupt board data: {0}")]
    Corrupt(String),

    #[error("the board has no projects")]
    NoProjects,
}
