//! Backend API seam.
//!
//! The remote training backend is an external collaborator; the core only
//! depends on this trait. The HTTP implementation lives in the
//! `oneclick-client` crate, tests use in-memory fakes.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    DatasetFile, EdaReport, ModelSuggestion, ProjectId, ProjectRecord, ProjectSummary, TaskKind,
    TrainingReport,
};

/// Error returned by a backend operation.
///
/// No retry or caching happens at this boundary: each call is a single
/// request that resolves or fails.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The backend answered with a failure status and (usually) a detail
    /// message describing what went wrong.
    #[error("backend error ({status}): {detail}")]
    Backend { status: u16, detail: String },

    /// The request never produced a backend answer.
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend answered but the body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message for display.
    ///
    /// Prefers backend-supplied detail text, falls back to a generic
    /// connectivity message when there is nothing better to show.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            _ => "Could not reach the training backend. Please check the connection.".to_string(),
        }
    }
}

/// Receipt returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    pub project_id: ProjectId,
}

/// Operations the remote training backend exposes.
///
/// Project-scoped reads take the project id explicitly; the seam carries no
/// ambient request context.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Submit a dataset with its task settings. Multipart on the wire.
    async fn upload(
        &self,
        dataset: &DatasetFile,
        task: TaskKind,
        target: &str,
    ) -> Result<UploadReceipt, ApiError>;

    /// Candidate models for the uploaded dataset.
    async fn model_suggestions(
        &self,
        project_id: &str,
    ) -> Result<Vec<ModelSuggestion>, ApiError>;

    /// Exploratory-analysis payload for the uploaded dataset.
    async fn eda(&self, project_id: &str) -> Result<EdaReport, ApiError>;

    /// Train the given candidate model and return its metrics.
    async fn train(&self, project_id: &str, model_id: &str) -> Result<TrainingReport, ApiError>;

    /// Promote a trained model version to production.
    async fn promote(&self, model_id: &str, version: u32) -> Result<(), ApiError>;

    /// All persisted workspaces, newest first.
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError>;

    /// Full persisted record of one workspace.
    async fn project(&self, project_id: &str) -> Result<ProjectRecord, ApiError>;

    /// Delete a persisted workspace. Idempotent from the caller's view.
    async fn delete_project(&self, project_id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_detail() {
        let err = ApiError::Backend {
            status: 422,
            detail: "Target column 'species' not found".to_string(),
        };
        assert_eq!(err.user_message(), "Target column 'species' not found");
    }

    #[test]
    fn test_user_message_falls_back_on_blank_detail() {
        let blank = ApiError::Backend {
            status: 500,
            detail: "  ".to_string(),
        };
        let conn = ApiError::Connection("dns failure".to_string());
        assert_eq!(blank.user_message(), conn.user_message());
        assert!(conn.user_message().contains("connection"));
    }
}
