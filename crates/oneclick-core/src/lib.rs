//! # Oneclick Core
//!
//! Workflow orchestration core for the oneclick ML dashboard.
//!
//! This crate contains:
//! - PipelineState / StateUpdate / PipelineStore: shared session state
//! - Navigation guard: pure stage-reachability rules
//! - Stage controllers: upload, EDA, training, report
//! - Workspace history controller: list / hydrate / delete saved projects
//! - BackendApi: the seam to the remote training backend
//!
//! This crate does NOT care about:
//! - How charts are rendered from the plot specs
//! - How stages are routed or drawn
//! - Which transport talks to the backend (see `oneclick-client`)

pub mod api;
pub mod controller;
pub mod error;
pub mod guard;
pub mod store;
pub mod types;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::api::{ApiError, BackendApi, UploadReceipt};
    pub use crate::controller::{
        AlwaysConfirm, ConfirmDelete, DeleteOutcome, EdaController, EdaOutcome,
        HistoryController, LoadOutcome, PromoteOutcome, RefreshOutcome, ReportController,
        SuggestionsOutcome, TrainOutcome, TrainingController, UploadController, UploadOutcome,
        UploadPolicy,
    };
    pub use crate::error::{StageError, ValidationError};
    pub use crate::guard::{can_enter, reachable};
    pub use crate::store::{PipelineState, PipelineStore, StateUpdate};
    pub use crate::types::{
        DatasetFile, EdaReport, ModelSuggestion, PlotSpec, ProjectId, ProjectMetadata,
        ProjectRecord, ProjectSummary, Stage, TaskKind, TrainingReport,
    };
}

// Re-export key types at crate root
pub use api::{ApiError, BackendApi, UploadReceipt};
pub use error::{StageError, ValidationError};
pub use store::{PipelineState, PipelineStore, StateUpdate};
pub use types::{Stage, TaskKind};
