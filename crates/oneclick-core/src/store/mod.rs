//! Pipeline state store
//!
//! One `PipelineStore` per active session. Controllers read snapshots and
//! commit field-wise merges; the history controller replaces the hydration
//! field set atomically. None of the operations can fail.

mod state;

pub use state::{PipelineState, StateUpdate};

use std::sync::RwLock;

use crate::types::ProjectRecord;

/// Shared, session-scoped pipeline state.
///
/// Mutations are serialized through the lock, which makes the single-writer
/// assumption hold even when a host embeds the store in a multi-threaded UI.
/// Lock poisoning is absorbed rather than propagated: state values stay
/// consistent because every mutation is a single critical section.
#[derive(Debug, Default)]
pub struct PipelineStore {
    state: RwLock<PipelineState>,
}

impl PipelineStore {
    /// Create a store with empty workflow state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cloned snapshot of the current state.
    pub fn read(&self) -> PipelineState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Shallow field-wise merge: only the fields the update names are
    /// overwritten, everything else is untouched.
    pub fn merge(&self, update: StateUpdate) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        update.apply(&mut state);
    }

    /// Atomic replace of the hydration field set from a persisted record.
    ///
    /// `project_id`, `task`, `target`, `eda_data`, `training_results` and
    /// `selected_model` change together as one unit; `suggestions`, the
    /// staged dataset file and the history list are left alone.
    pub fn hydrate(&self, record: &ProjectRecord) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.project_id = Some(record.metadata.project_id.clone());
        state.task = Some(record.metadata.task_type);
        state.target = Some(record.metadata.target.clone());
        state.eda_data = record.eda_data.clone();
        state.training_results = record.training_results.clone();
        state.selected_model = record
            .training_results
            .as_ref()
            .map(|r| r.model_id.clone());
    }

    /// Clear every workflow field back to the session-start shape.
    ///
    /// The history list survives: it mirrors the backend, not the session.
    pub fn reset(&self) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let projects = std::mem::take(&mut state.projects);
        *state = PipelineState {
            projects,
            ..PipelineState::default()
        };
    }
}
