//! Workspace history controller.
//!
//! Lists, loads and deletes persisted projects, independent of where in the
//! workflow the session currently is.

use std::sync::Arc;

use crate::api::BackendApi;
use crate::error::StageError;
use crate::store::{PipelineStore, StateUpdate};
use crate::types::Stage;

use super::InFlight;

/// Confirmation policy for destructive actions.
///
/// Deleting a workspace requires an explicit yes before the call goes out;
/// the host decides how to ask (the CLI prompts, tests use the constant
/// policies below).
pub trait ConfirmDelete: Send + Sync {
    fn confirm(&self, project_id: &str) -> bool;
}

/// Confirms every delete. For non-interactive hosts and `--yes` flows.
pub struct AlwaysConfirm;

impl ConfirmDelete for AlwaysConfirm {
    fn confirm(&self, _project_id: &str) -> bool {
        true
    }
}

/// Declines every delete.
pub struct NeverConfirm;

impl ConfirmDelete for NeverConfirm {
    fn confirm(&self, _project_id: &str) -> bool {
        false
    }
}

/// Result of a history list refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The list was replaced from the backend.
    Refreshed,
    /// Another history request is already pending; the attempt was ignored.
    AlreadyRunning,
}

/// Result of a load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The workspace is hydrated; the caller should navigate to this stage.
    Opened { next: Stage },
    /// Another history request is already pending; the attempt was ignored.
    AlreadyRunning,
}

/// Result of a delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The workspace is gone and the history list was refreshed.
    Deleted,
    /// The user declined; nothing happened.
    Aborted,
    /// Another history request is already pending; the attempt was ignored.
    AlreadyRunning,
}

pub struct HistoryController {
    store: Arc<PipelineStore>,
    api: Arc<dyn BackendApi>,
    in_flight: InFlight,
}

impl HistoryController {
    pub fn new(store: Arc<PipelineStore>, api: Arc<dyn BackendApi>) -> Self {
        Self {
            store,
            api,
            in_flight: InFlight::default(),
        }
    }

    /// Replace the history list wholesale from the backend.
    ///
    /// Stale local entries are never reconciled one by one, only replaced.
    pub async fn refresh(&self) -> Result<RefreshOutcome, StageError> {
        let Some(_token) = self.in_flight.try_begin() else {
            tracing::debug!("history request already pending, ignoring refresh");
            return Ok(RefreshOutcome::AlreadyRunning);
        };
        self.refresh_projects().await?;
        Ok(RefreshOutcome::Refreshed)
    }

    /// Load a persisted workspace into the session.
    ///
    /// Hydrates the store atomically and opens the workflow "at the end":
    /// the caller should navigate to the returned stage.
    pub async fn load(&self, project_id: &str) -> Result<LoadOutcome, StageError> {
        let Some(_token) = self.in_flight.try_begin() else {
            tracing::debug!(project_id, "history request already pending, ignoring load");
            return Ok(LoadOutcome::AlreadyRunning);
        };
        let record = self.api.project(project_id).await?;
        tracing::info!(project_id, "workspace hydrated from history");
        self.store.hydrate(&record);
        Ok(LoadOutcome::Opened {
            next: Stage::Report,
        })
    }

    /// Delete a persisted workspace after explicit confirmation.
    ///
    /// A declined confirmation silently does nothing. Deleting the project
    /// backing the current in-memory workflow leaves the active session
    /// untouched; store and history stay independent until the next
    /// hydration or reset.
    pub async fn delete(
        &self,
        project_id: &str,
        confirm: &dyn ConfirmDelete,
    ) -> Result<DeleteOutcome, StageError> {
        let Some(_token) = self.in_flight.try_begin() else {
            tracing::debug!(project_id, "history request already pending, ignoring delete");
            return Ok(DeleteOutcome::AlreadyRunning);
        };
        if !confirm.confirm(project_id) {
            return Ok(DeleteOutcome::Aborted);
        }

        self.api.delete_project(project_id).await?;
        tracing::info!(project_id, "workspace deleted");

        // The delete itself succeeded; a failed list refresh only leaves the
        // sidebar stale until the next one.
        if let Err(err) = self.refresh_projects().await {
            tracing::warn!(error = %err, "history refresh after delete failed");
        }
        Ok(DeleteOutcome::Deleted)
    }

    async fn refresh_projects(&self) -> Result<(), StageError> {
        let projects = self.api.list_projects().await?;
        tracing::debug!(count = projects.len(), "workspace list refreshed");
        self.store.merge(StateUpdate::default().projects(projects));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{
        sample_summary, sample_training, MockBackend,
    };
    use std::sync::atomic::Ordering;

    fn controller(
        backend: MockBackend,
    ) -> (Arc<PipelineStore>, Arc<MockBackend>, HistoryController) {
        let store = Arc::new(PipelineStore::new());
        let api = Arc::new(backend);
        let controller = HistoryController::new(store.clone(), api.clone());
        (store, api, controller)
    }

    #[test]
    fn test_refresh_replaces_list_wholesale() {
        tokio_test::block_on(async {
            let backend = MockBackend {
                projects_response: Ok(vec![sample_summary("p-new")]),
                ..MockBackend::new()
            };
            let (store, _api, controller) = controller(backend);
            store.merge(
                StateUpdate::default()
                    .projects(vec![sample_summary("p-old-1"), sample_summary("p-old-2")]),
            );

            let outcome = controller.refresh().await.unwrap();

            assert_eq!(outcome, RefreshOutcome::Refreshed);
            let projects = store.read().projects;
            assert_eq!(projects.len(), 1);
            assert_eq!(projects[0].project_id, "p-new");
        });
    }

    #[tokio::test]
    async fn test_load_hydrates_and_opens_report() {
        let (store, _api, controller) = controller(MockBackend::new());

        let outcome = controller.load("p-iris").await.unwrap();

        assert_eq!(
            outcome,
            LoadOutcome::Opened {
                next: Stage::Report
            }
        );
        let state = store.read();
        assert_eq!(state.project_id.as_deref(), Some("p-iris"));
        assert_eq!(state.selected_model.as_deref(), Some("random_forest"));
        assert!(state.training_results.is_some());
    }

    #[tokio::test]
    async fn test_declined_confirmation_silently_does_nothing() {
        let (store, api, controller) = controller(MockBackend::new());
        store.merge(StateUpdate::default().projects(vec![sample_summary("p-iris")]));

        let outcome = controller.delete("p-iris", &NeverConfirm).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Aborted);
        assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.read().projects.len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refreshes_list() {
        let (store, api, controller) = controller(MockBackend::new());

        let outcome = controller.delete("p-stale", &AlwaysConfirm).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(
            api.deleted_ids.lock().unwrap().as_slice(),
            &["p-stale".to_string()]
        );
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.read().projects.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_untouched() {
        let (store, api, controller) = controller(MockBackend::failing_delete());
        store.merge(StateUpdate::default().projects(vec![sample_summary("p-iris")]));

        let err = controller.delete("p-iris", &AlwaysConfirm).await.unwrap_err();

        assert!(matches!(err, StageError::Request(_)));
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.read().projects.len(), 1);
    }

    #[tokio::test]
    async fn test_history_requests_ignored_while_load_pending() {
        let (backend, gate) = MockBackend::gated();
        let (_store, api, controller) = controller(backend);
        let controller = Arc::new(controller);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.load("p-iris").await })
        };
        tokio::task::yield_now().await;
        assert_eq!(api.project_calls.load(Ordering::SeqCst), 1);

        assert_eq!(
            controller.load("p-other").await.unwrap(),
            LoadOutcome::AlreadyRunning
        );
        assert_eq!(
            controller.refresh().await.unwrap(),
            RefreshOutcome::AlreadyRunning
        );
        assert_eq!(api.project_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);

        gate.add_permits(1);
        assert_eq!(
            first.await.unwrap().unwrap(),
            LoadOutcome::Opened {
                next: Stage::Report
            }
        );
    }

    #[tokio::test]
    async fn test_second_delete_ignored_while_one_pending() {
        let (backend, gate) = MockBackend::gated();
        let (_store, api, controller) = controller(backend);
        let controller = Arc::new(controller);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.delete("p-iris", &AlwaysConfirm).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(api.delete_calls.load(Ordering::SeqCst), 1);

        let second = controller.delete("p-iris", &AlwaysConfirm).await.unwrap();
        assert_eq!(second, DeleteOutcome::AlreadyRunning);
        assert_eq!(api.delete_calls.load(Ordering::SeqCst), 1);

        gate.add_permits(1);
        assert_eq!(first.await.unwrap().unwrap(), DeleteOutcome::Deleted);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deleting_current_project_keeps_active_session() {
        let (store, _api, controller) = controller(MockBackend::new());
        store.merge(
            StateUpdate::default()
                .project_id("p-iris")
                .training_results(sample_training("random_forest")),
        );

        controller.delete("p-iris", &AlwaysConfirm).await.unwrap();

        let state = store.read();
        assert_eq!(state.project_id.as_deref(), Some("p-iris"));
        assert!(state.training_results.is_some());
    }
}
