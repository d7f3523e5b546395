//! Upload stage controller.
//!
//! Validates the staged dataset locally, then drives the ordered chain
//! upload → model suggestions → project list. The chain commits as a single
//! merge: a failure at any step leaves the store exactly as it was before
//! the attempt.

use std::sync::Arc;

use crate::api::BackendApi;
use crate::error::{StageError, ValidationError};
use crate::store::{PipelineStore, StateUpdate};
use crate::types::{DatasetFile, ProjectId, TaskKind};

use super::InFlight;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_DATASET_EXTENSION: &str = ".csv";

/// Client-side validation limits for dataset uploads.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Hard size limit in bytes.
    pub max_bytes: usize,
    /// Required file-name extension, including the dot.
    pub extension: String,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            extension: DEFAULT_DATASET_EXTENSION.to_string(),
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The chain completed and the new workspace is committed.
    Completed { project_id: ProjectId },
    /// A chain for this stage is already in flight; the attempt was ignored.
    AlreadyRunning,
}

pub struct UploadController {
    store: Arc<PipelineStore>,
    api: Arc<dyn BackendApi>,
    policy: UploadPolicy,
    in_flight: InFlight,
}

impl UploadController {
    pub fn new(store: Arc<PipelineStore>, api: Arc<dyn BackendApi>) -> Self {
        Self::with_policy(store, api, UploadPolicy::default())
    }

    pub fn with_policy(
        store: Arc<PipelineStore>,
        api: Arc<dyn BackendApi>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            store,
            api,
            policy,
            in_flight: InFlight::default(),
        }
    }

    /// Validate a chosen dataset and stage it in the store.
    ///
    /// Runs entirely locally; a rejected file issues no request and leaves
    /// the store untouched.
    pub fn stage_dataset(&self, dataset: DatasetFile) -> Result<(), ValidationError> {
        self.validate_file(&dataset)?;
        self.store
            .merge(StateUpdate::default().dataset_file(dataset));
        Ok(())
    }

    /// Submit the staged dataset with its task settings.
    ///
    /// On success one merge commits `project_id`, `task`, `target`,
    /// `suggestions` and the refreshed `projects`, clearing any stale
    /// analysis state from a prior workspace.
    pub async fn submit(
        &self,
        task: TaskKind,
        target: &str,
    ) -> Result<UploadOutcome, StageError> {
        if target.trim().is_empty() {
            return Err(ValidationError::MissingTarget.into());
        }
        let Some(dataset) = self.store.read().dataset_file else {
            return Err(StageError::NotReady(
                "no dataset staged for upload".to_string(),
            ));
        };
        self.validate_file(&dataset)?;

        let Some(_token) = self.in_flight.try_begin() else {
            tracing::debug!("upload chain already in flight, ignoring submit");
            return Ok(UploadOutcome::AlreadyRunning);
        };

        tracing::info!(file = %dataset.name, task = %task, target, "starting upload chain");
        let receipt = self.api.upload(&dataset, task, target).await?;
        let suggestions = self.api.model_suggestions(&receipt.project_id).await?;
        let projects = self.api.list_projects().await?;

        self.store.merge(
            StateUpdate::default()
                .project_id(receipt.project_id.clone())
                .task(task)
                .target(target)
                .suggestions(suggestions)
                .projects(projects)
                .clear_dataset_file()
                .clear_selected_model()
                .clear_eda_data()
                .clear_training_results(),
        );
        tracing::info!(project_id = %receipt.project_id, "workspace started");

        Ok(UploadOutcome::Completed {
            project_id: receipt.project_id,
        })
    }

    fn validate_file(&self, dataset: &DatasetFile) -> Result<(), ValidationError> {
        if !dataset.has_extension(&self.policy.extension) {
            return Err(ValidationError::WrongExtension {
                expected: self.policy.extension.clone(),
                file_name: dataset.name.clone(),
            });
        }
        if dataset.size() > self.policy.max_bytes {
            return Err(ValidationError::TooLarge {
                actual: dataset.size(),
                limit: self.policy.max_bytes,
            });
        }
        Ok(())
    }
}
