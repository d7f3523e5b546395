//! Stage controllers
//!
//! One controller per workflow stage plus the workspace history controller.
//! Each reads/writes the shared [`PipelineStore`](crate::store::PipelineStore)
//! and talks to the backend through the [`BackendApi`](crate::api::BackendApi)
//! seam, translating results into state merges or user-visible errors.

mod eda;
mod history;
mod report;
mod training;
mod upload;

pub use eda::{EdaController, EdaOutcome};
pub use history::{
    AlwaysConfirm, ConfirmDelete, DeleteOutcome, HistoryController, LoadOutcome, NeverConfirm,
    RefreshOutcome,
};
pub use report::{PromoteOutcome, ReportController};
pub use training::{SuggestionsOutcome, TrainOutcome, TrainingController};
pub use upload::{UploadController, UploadOutcome, UploadPolicy};

use std::sync::atomic::{AtomicBool, Ordering};

/// Re-entrancy guard for a controller's own kind of request.
///
/// Distinct controllers may have independent in-flight requests, but a single
/// controller never issues a second one while its first is pending. The flag
/// is released on every exit path through the RAII token.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    busy: AtomicBool,
}

impl InFlight {
    /// Claim the flag. `None` means a request of this kind is already
    /// pending and the new attempt should be ignored.
    pub(crate) fn try_begin(&self) -> Option<InFlightToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightToken { flag: &self.busy })
    }
}

pub(crate) struct InFlightToken<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightToken<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod in_flight_tests {
    use super::InFlight;

    #[test]
    fn test_in_flight_rejects_second_claim_until_released() {
        let flag = InFlight::default();
        let token = flag.try_begin().unwrap();
        assert!(flag.try_begin().is_none());
        drop(token);
        assert!(flag.try_begin().is_some());
    }
}
