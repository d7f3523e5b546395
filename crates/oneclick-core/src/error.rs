//! Error taxonomy for the workflow core.
//!
//! Three families, per the orchestration design:
//! - `ValidationError`: local, pre-network; never reaches the backend.
//! - `ApiError` (in `crate::api`): network/backend failures.
//! - Declined confirmations are not errors at all; they surface as silent
//!   `Aborted` outcomes on the controllers.

use thiserror::Error;

use crate::api::ApiError;

/// Local validation failure raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("expected a {expected} file, got '{file_name}'")]
    WrongExtension { expected: String, file_name: String },

    #[error("file is {actual} bytes, the limit is {limit} bytes")]
    TooLarge { actual: usize, limit: usize },

    #[error("target column name is required")]
    MissingTarget,
}

/// Failure of a stage-controller operation.
///
/// None of these are fatal to the session: every failure returns control to
/// an interactive, previously-valid state, and nothing is retried
/// automatically.
#[derive(Debug, Clone, Error)]
pub enum StageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] ApiError),

    /// The operation needs workflow state that is not there yet, e.g.
    /// promoting before any training run finished.
    #[error("{0}")]
    NotReady(String),
}

impl StageError {
    /// Human-readable message for display.
    pub fn user_message(&self) -> String {
        match self {
            StageError::Validation(err) => err.to_string(),
            StageError::Request(err) => err.user_message(),
            StageError::NotReady(msg) => msg.clone(),
        }
    }
}
