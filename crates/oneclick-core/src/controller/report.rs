//! Report stage controller.
//!
//! Read-only view over the finished training run, plus promotion of the
//! trained model to production.

use std::sync::Arc;

use crate::api::BackendApi;
use crate::error::StageError;
use crate::store::PipelineStore;
use crate::types::TrainingReport;

use super::InFlight;

/// Result of a promotion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoteOutcome {
    /// The trained model version is now in production.
    Promoted,
    /// A promotion is already pending; the attempt was ignored.
    AlreadyRunning,
}

pub struct ReportController {
    store: Arc<PipelineStore>,
    api: Arc<dyn BackendApi>,
    in_flight: InFlight,
}

impl ReportController {
    pub fn new(store: Arc<PipelineStore>, api: Arc<dyn BackendApi>) -> Self {
        Self {
            store,
            api,
            in_flight: InFlight::default(),
        }
    }

    /// The training results to render, if any run has finished.
    pub fn results(&self) -> Option<TrainingReport> {
        self.store.read().training_results
    }

    /// Promote the trained model version to production.
    ///
    /// Refuses locally when no training run has finished; no request is
    /// issued in that case.
    pub async fn promote(&self, version: u32) -> Result<PromoteOutcome, StageError> {
        let Some(_token) = self.in_flight.try_begin() else {
            tracing::debug!(version, "promotion already pending, ignoring attempt");
            return Ok(PromoteOutcome::AlreadyRunning);
        };
        let Some(results) = self.store.read().training_results else {
            return Err(StageError::NotReady(
                "no trained model to promote".to_string(),
            ));
        };
        tracing::info!(model_id = %results.model_id, version, "promoting model to production");
        self.api.promote(&results.model_id, version).await?;
        Ok(PromoteOutcome::Promoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{sample_training, MockBackend};
    use crate::store::StateUpdate;
    use std::sync::atomic::Ordering;

    fn controller(backend: MockBackend) -> (Arc<PipelineStore>, Arc<MockBackend>, ReportController)
    {
        let store = Arc::new(PipelineStore::new());
        let api = Arc::new(backend);
        let controller = ReportController::new(store.clone(), api.clone());
        (store, api, controller)
    }

    #[tokio::test]
    async fn test_promote_targets_the_trained_model() {
        let (store, api, controller) = controller(MockBackend::new());
        store.merge(StateUpdate::default().training_results(sample_training("random_forest")));

        let outcome = controller.promote(3).await.unwrap();

        assert_eq!(outcome, PromoteOutcome::Promoted);
        let requests = api.promote_requests.lock().unwrap();
        assert_eq!(requests.as_slice(), &[("random_forest".to_string(), 3)]);
    }

    #[tokio::test]
    async fn test_second_promote_ignored_while_one_pending() {
        let (backend, gate) = MockBackend::gated();
        let (store, api, controller) = controller(backend);
        store.merge(StateUpdate::default().training_results(sample_training("random_forest")));
        let controller = Arc::new(controller);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.promote(3).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(api.promote_calls.load(Ordering::SeqCst), 1);

        let second = controller.promote(3).await.unwrap();
        assert_eq!(second, PromoteOutcome::AlreadyRunning);
        assert_eq!(api.promote_calls.load(Ordering::SeqCst), 1);

        gate.add_permits(1);
        assert_eq!(first.await.unwrap().unwrap(), PromoteOutcome::Promoted);
    }

    #[tokio::test]
    async fn test_promote_without_results_issues_no_request() {
        let (_store, api, controller) = controller(MockBackend::new());

        let err = controller.promote(1).await.unwrap_err();

        assert!(matches!(err, StageError::NotReady(_)));
        assert_eq!(api.promote_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_results_reads_current_state() {
        let (store, _api, controller) = controller(MockBackend::new());
        assert!(controller.results().is_none());

        store.merge(StateUpdate::default().training_results(sample_training("random_forest")));
        assert_eq!(
            controller.results().map(|r| r.model_id),
            Some("random_forest".to_string())
        );
    }
}
