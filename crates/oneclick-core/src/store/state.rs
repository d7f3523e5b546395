//! Pipeline state shape and the typed merge payload.

use crate::types::{
    DatasetFile, EdaReport, ModelSuggestion, ProjectId, ProjectSummary, TaskKind, TrainingReport,
};

/// Shared state of one workflow session.
///
/// Created empty at session start, populated incrementally by the stage
/// controllers, replaced wholesale by hydration, and cleared by reset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineState {
    /// Identity of the current workspace, absent before the first upload.
    pub project_id: Option<ProjectId>,
    /// Staged dataset, present only during the upload stage.
    pub dataset_file: Option<DatasetFile>,
    pub task: Option<TaskKind>,
    pub target: Option<String>,
    /// Candidate models; non-empty only after a completed upload.
    pub suggestions: Vec<ModelSuggestion>,
    pub selected_model: Option<String>,
    pub eda_data: Option<EdaReport>,
    pub training_results: Option<TrainingReport>,
    /// Persisted workspace summaries, refreshed on demand.
    pub projects: Vec<ProjectSummary>,
}

impl PipelineState {
    /// Whether the current workspace's upload has completed.
    pub fn dataset_accepted(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

/// A typed, field-wise state merge.
///
/// `Default` touches nothing; each setter marks exactly one field for
/// overwrite. Unknown fields are unrepresentable, which keeps a bad merge a
/// compile error instead of a runtime fault. The double bookkeeping
/// (touched vs. value) stays private behind the setters.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    project_id: Option<Option<ProjectId>>,
    dataset_file: Option<Option<DatasetFile>>,
    task: Option<Option<TaskKind>>,
    target: Option<Option<String>>,
    suggestions: Option<Vec<ModelSuggestion>>,
    selected_model: Option<Option<String>>,
    eda_data: Option<Option<EdaReport>>,
    training_results: Option<Option<TrainingReport>>,
    projects: Option<Vec<ProjectSummary>>,
}

impl StateUpdate {
    pub fn project_id(mut self, id: impl Into<ProjectId>) -> Self {
        self.project_id = Some(Some(id.into()));
        self
    }

    pub fn dataset_file(mut self, file: DatasetFile) -> Self {
        self.dataset_file = Some(Some(file));
        self
    }

    pub fn clear_dataset_file(mut self) -> Self {
        self.dataset_file = Some(None);
        self
    }

    pub fn task(mut self, task: TaskKind) -> Self {
        self.task = Some(Some(task));
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(Some(target.into()));
        self
    }

    pub fn suggestions(mut self, suggestions: Vec<ModelSuggestion>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    pub fn selected_model(mut self, model_id: impl Into<String>) -> Self {
        self.selected_model = Some(Some(model_id.into()));
        self
    }

    /// Set or clear the selected model in one setter; the training
    /// controller uses this to revert to whatever was there before.
    pub fn selected_model_opt(mut self, model_id: Option<String>) -> Self {
        self.selected_model = Some(model_id);
        self
    }

    pub fn clear_selected_model(mut self) -> Self {
        self.selected_model = Some(None);
        self
    }

    pub fn eda_data(mut self, eda: EdaReport) -> Self {
        self.eda_data = Some(Some(eda));
        self
    }

    pub fn clear_eda_data(mut self) -> Self {
        self.eda_data = Some(None);
        self
    }

    pub fn training_results(mut self, results: TrainingReport) -> Self {
        self.training_results = Some(Some(results));
        self
    }

    pub fn clear_training_results(mut self) -> Self {
        self.training_results = Some(None);
        self
    }

    pub fn projects(mut self, projects: Vec<ProjectSummary>) -> Self {
        self.projects = Some(projects);
        self
    }

    /// Overwrite the named fields of `state`, leaving the rest untouched.
    pub(crate) fn apply(self, state: &mut PipelineState) {
        if let Some(value) = self.project_id {
            state.project_id = value;
        }
        if let Some(value) = self.dataset_file {
            state.dataset_file = value;
        }
        if let Some(value) = self.task {
            state.task = value;
        }
        if let Some(value) = self.target {
            state.target = value;
        }
        if let Some(value) = self.suggestions {
            state.suggestions = value;
        }
        if let Some(value) = self.selected_model {
            state.selected_model = value;
        }
        if let Some(value) = self.eda_data {
            state.eda_data = value;
        }
        if let Some(value) = self.training_results {
            state.training_results = value;
        }
        if let Some(value) = self.projects {
            state.projects = value;
        }
    }
}
