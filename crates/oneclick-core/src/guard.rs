//! Navigation guard
//!
//! Pure reachability rules from pipeline state to workflow stages. This is a
//! UX guard, not a security boundary: callers treat an attempted transition
//! to an unreachable stage as a no-op, never as an error.

use std::collections::BTreeSet;

use crate::store::PipelineState;
use crate::types::Stage;

/// The set of stages the session may navigate to right now.
///
/// - `Upload` is always reachable.
/// - `Eda` and `Training` open up once the dataset is accepted (the backend
///   returned suggestions for the current workspace).
/// - `Report` opens up once a training run has finished.
pub fn reachable(state: &PipelineState) -> BTreeSet<Stage> {
    Stage::ALL
        .into_iter()
        .filter(|stage| can_enter(state, *stage))
        .collect()
}

/// Whether a single stage is reachable from the given state.
pub fn can_enter(state: &PipelineState, stage: Stage) -> bool {
    match stage {
        Stage::Upload => true,
        Stage::Eda | Stage::Training => state.dataset_accepted(),
        Stage::Report => state.training_results.is_some(),
    }
}
