//! Training stage controller.

use std::sync::Arc;

use crate::api::BackendApi;
use crate::error::StageError;
use crate::store::{PipelineStore, StateUpdate};
use crate::types::Stage;

use super::InFlight;

/// Result of a suggestion backfill on stage entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionsOutcome {
    /// Suggestions fetched and merged.
    Fetched,
    /// Suggestions were already present.
    AlreadyAvailable,
    /// No task or workspace to fetch suggestions for.
    NotStarted,
    /// A training-stage request is already pending; the backfill was skipped.
    AlreadyRunning,
}

/// Result of a training attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainOutcome {
    /// Training finished; the caller should move on to the given stage.
    Completed { next: Stage },
    /// A training call for this workspace is already pending; the selection
    /// was ignored.
    AlreadyRunning,
}

pub struct TrainingController {
    store: Arc<PipelineStore>,
    api: Arc<dyn BackendApi>,
    in_flight: InFlight,
}

impl TrainingController {
    pub fn new(store: Arc<PipelineStore>, api: Arc<dyn BackendApi>) -> Self {
        Self {
            store,
            api,
            in_flight: InFlight::default(),
        }
    }

    /// Backfill suggestions on stage entry.
    ///
    /// Covers direct navigation or reload without a fresh upload: if the
    /// list is empty but a task is set, fetch it from the backend.
    pub async fn ensure_suggestions(&self) -> Result<SuggestionsOutcome, StageError> {
        let snapshot = self.store.read();
        if !snapshot.suggestions.is_empty() {
            return Ok(SuggestionsOutcome::AlreadyAvailable);
        }
        let (Some(project_id), Some(_task)) = (snapshot.project_id, snapshot.task) else {
            return Ok(SuggestionsOutcome::NotStarted);
        };
        let Some(_token) = self.in_flight.try_begin() else {
            tracing::debug!("training-stage request already pending, skipping backfill");
            return Ok(SuggestionsOutcome::AlreadyRunning);
        };

        tracing::debug!(project_id = %project_id, "backfilling model suggestions");
        let suggestions = self.api.model_suggestions(&project_id).await?;
        self.store
            .merge(StateUpdate::default().suggestions(suggestions));
        Ok(SuggestionsOutcome::Fetched)
    }

    /// Train the selected candidate model.
    ///
    /// Marks it selected up front so the stage can render the choice while
    /// the call is pending; a failure reverts the selection to its prior
    /// value and leaves `training_results` absent.
    pub async fn train(&self, model_id: &str) -> Result<TrainOutcome, StageError> {
        let Some(_token) = self.in_flight.try_begin() else {
            tracing::debug!(model_id, "training already pending, ignoring selection");
            return Ok(TrainOutcome::AlreadyRunning);
        };

        let snapshot = self.store.read();
        let Some(project_id) = snapshot.project_id else {
            return Err(StageError::NotReady(
                "no workspace started; upload a dataset first".to_string(),
            ));
        };
        let prior_selection = snapshot.selected_model;

        self.store
            .merge(StateUpdate::default().selected_model(model_id));
        tracing::info!(project_id = %project_id, model_id, "training started");

        match self.api.train(&project_id, model_id).await {
            Ok(results) => {
                tracing::info!(model_id, score = results.score, "training finished");
                self.store
                    .merge(StateUpdate::default().training_results(results));
                Ok(TrainOutcome::Completed {
                    next: Stage::Report,
                })
            }
            Err(err) => {
                tracing::warn!(model_id, error = %err, "training failed");
                self.store
                    .merge(StateUpdate::default().selected_model_opt(prior_selection));
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{classification_suggestions, MockBackend};
    use crate::types::TaskKind;
    use std::sync::atomic::Ordering;

    fn controller(
        backend: MockBackend,
    ) -> (Arc<PipelineStore>, Arc<MockBackend>, TrainingController) {
        let store = Arc::new(PipelineStore::new());
        let api = Arc::new(backend);
        let controller = TrainingController::new(store.clone(), api.clone());
        (store, api, controller)
    }

    fn started_workspace(store: &PipelineStore) {
        store.merge(
            StateUpdate::default()
                .project_id("p-iris")
                .task(TaskKind::Classification)
                .target("species")
                .suggestions(classification_suggestions()),
        );
    }

    #[tokio::test]
    async fn test_train_calls_backend_with_selected_model() {
        let (store, api, controller) = controller(MockBackend::new());
        started_workspace(&store);

        let outcome = controller.train("random_forest").await.unwrap();

        assert_eq!(
            outcome,
            TrainOutcome::Completed {
                next: Stage::Report
            }
        );
        let requests = api.train_requests.lock().unwrap();
        assert_eq!(
            requests.as_slice(),
            &[("p-iris".to_string(), "random_forest".to_string())]
        );
        let state = store.read();
        assert_eq!(state.selected_model.as_deref(), Some("random_forest"));
        let results = state.training_results.unwrap();
        assert_eq!(results.score, 0.97);
        assert_eq!(results.model_id, "random_forest");
    }

    #[tokio::test]
    async fn test_train_failure_reverts_selection() {
        let (store, _api, controller) = controller(MockBackend::failing_train("out of memory"));
        started_workspace(&store);
        store.merge(StateUpdate::default().selected_model("logistic_regression"));

        let err = controller.train("random_forest").await.unwrap_err();

        assert_eq!(err.user_message(), "out of memory");
        let state = store.read();
        assert_eq!(
            state.selected_model.as_deref(),
            Some("logistic_regression")
        );
        assert!(state.training_results.is_none());
    }

    #[tokio::test]
    async fn test_train_failure_reverts_to_absent_when_nothing_was_selected() {
        let (store, _api, controller) = controller(MockBackend::failing_train("boom"));
        started_workspace(&store);

        controller.train("random_forest").await.unwrap_err();

        assert!(store.read().selected_model.is_none());
    }

    #[tokio::test]
    async fn test_second_selection_ignored_while_training_pending() {
        let (backend, gate) = MockBackend::gated();
        let (store, api, controller) = controller(backend);
        started_workspace(&store);
        let controller = Arc::new(controller);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.train("random_forest").await })
        };
        tokio::task::yield_now().await;
        assert_eq!(api.train_calls.load(Ordering::SeqCst), 1);

        let second = controller.train("logistic_regression").await.unwrap();
        assert_eq!(second, TrainOutcome::AlreadyRunning);
        assert_eq!(api.train_calls.load(Ordering::SeqCst), 1);

        gate.add_permits(1);
        first.await.unwrap().unwrap();
        assert_eq!(
            store.read().selected_model.as_deref(),
            Some("random_forest")
        );
    }

    #[tokio::test]
    async fn test_suggestions_backfilled_after_hydration() {
        let (store, api, controller) = controller(MockBackend::new());
        store.merge(
            StateUpdate::default()
                .project_id("p-iris")
                .task(TaskKind::Classification),
        );

        assert_eq!(
            controller.ensure_suggestions().await.unwrap(),
            SuggestionsOutcome::Fetched
        );
        assert_eq!(api.suggestions_calls.load(Ordering::SeqCst), 1);
        assert!(!store.read().suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_suggestions_not_refetched_when_present() {
        let (store, api, controller) = controller(MockBackend::new());
        started_workspace(&store);

        assert_eq!(
            controller.ensure_suggestions().await.unwrap(),
            SuggestionsOutcome::AlreadyAvailable
        );
        assert_eq!(api.suggestions_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_suggestions_backfill_skipped_while_training_pending() {
        let (backend, gate) = MockBackend::gated();
        let (store, api, controller) = controller(backend);
        store.merge(
            StateUpdate::default()
                .project_id("p-iris")
                .task(TaskKind::Classification),
        );
        let controller = Arc::new(controller);

        let training = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.train("random_forest").await })
        };
        tokio::task::yield_now().await;
        assert_eq!(api.train_calls.load(Ordering::SeqCst), 1);

        assert_eq!(
            controller.ensure_suggestions().await.unwrap(),
            SuggestionsOutcome::AlreadyRunning
        );
        assert_eq!(api.suggestions_calls.load(Ordering::SeqCst), 0);

        gate.add_permits(1);
        training.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_suggestions_skipped_without_task() {
        let (_store, api, controller) = controller(MockBackend::new());
        assert_eq!(
            controller.ensure_suggestions().await.unwrap(),
            SuggestionsOutcome::NotStarted
        );
        assert_eq!(api.suggestions_calls.load(Ordering::SeqCst), 0);
    }
}
