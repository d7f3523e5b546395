//! Persisted workspace projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EdaReport, TaskKind, TrainingReport};

/// Type alias for project identifiers issued by the backend.
pub type ProjectId = String;

/// A row in the workspace history list.
///
/// Read-only projection of a persisted workspace: never mutated client-side,
/// only replaced wholesale when the list is refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: ProjectId,
    pub dataset_name: String,
    pub task_type: TaskKind,
    pub timestamp: DateTime<Utc>,
    /// Best score so far, absent until a training run finishes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Identity and settings of a persisted workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project_id: ProjectId,
    pub dataset_name: String,
    pub task_type: TaskKind,
    pub target: String,
    pub timestamp: DateTime<Utc>,
}

/// The full persisted record of a workspace, used for hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub metadata: ProjectMetadata,
    #[serde(default)]
    pub eda_data: Option<EdaReport>,
    #[serde(default)]
    pub training_results: Option<TrainingReport>,
}
