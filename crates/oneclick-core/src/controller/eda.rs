//! EDA stage controller.

use std::sync::Arc;

use crate::api::BackendApi;
use crate::error::StageError;
use crate::store::{PipelineStore, StateUpdate};

use super::InFlight;

/// Result of an EDA load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdaOutcome {
    /// Freshly fetched and merged into the store.
    Loaded,
    /// Already populated; re-entering the stage fetches nothing.
    AlreadyLoaded,
    /// No workspace started yet; nothing to fetch against.
    NotStarted,
    /// A fetch is already pending; the attempt was ignored.
    AlreadyRunning,
}

pub struct EdaController {
    store: Arc<PipelineStore>,
    api: Arc<dyn BackendApi>,
    in_flight: InFlight,
}

impl EdaController {
    pub fn new(store: Arc<PipelineStore>, api: Arc<dyn BackendApi>) -> Self {
        Self {
            store,
            api,
            in_flight: InFlight::default(),
        }
    }

    /// Fetch the EDA payload on stage entry unless it is already there.
    ///
    /// A failed fetch leaves `eda_data` absent; the error is returned as a
    /// value for the caller to display, nothing escapes the controller.
    pub async fn ensure_loaded(&self) -> Result<EdaOutcome, StageError> {
        let snapshot = self.store.read();
        if snapshot.eda_data.is_some() {
            return Ok(EdaOutcome::AlreadyLoaded);
        }
        let Some(project_id) = snapshot.project_id else {
            return Ok(EdaOutcome::NotStarted);
        };

        let Some(_token) = self.in_flight.try_begin() else {
            return Ok(EdaOutcome::AlreadyRunning);
        };

        tracing::debug!(project_id = %project_id, "fetching EDA payload");
        let eda = self.api.eda(&project_id).await?;
        self.store.merge(StateUpdate::default().eda_data(eda));
        Ok(EdaOutcome::Loaded)
    }
}
