//! Task kind and workflow stage definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of supervised learning task a workspace targets.
///
/// Closed enum rather than an open string so an invalid kind is caught at
/// the boundary, not deep inside a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Classification,
    Regression,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Classification => "classification",
            TaskKind::Regression => "regression",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a task kind from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task kind '{0}', expected 'classification' or 'regression'")]
pub struct TaskKindParseError(pub String);

impl FromStr for TaskKind {
    type Err = TaskKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classification" => Ok(TaskKind::Classification),
            "regression" => Ok(TaskKind::Regression),
            other => Err(TaskKindParseError(other.to_string())),
        }
    }
}

/// A stage of the four-step workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Upload,
    Eda,
    Training,
    Report,
}

impl Stage {
    /// All stages in workflow order.
    pub const ALL: [Stage; 4] = [Stage::Upload, Stage::Eda, Stage::Training, Stage::Report];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Upload => "upload",
            Stage::Eda => "eda",
            Stage::Training => "training",
            Stage::Report => "report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_kind_round_trips_through_str() {
        for kind in [TaskKind::Classification, TaskKind::Regression] {
            assert_eq!(kind.as_str().parse::<TaskKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_task_kind_rejects_unknown_input() {
        let err = "clustering".parse::<TaskKind>().unwrap_err();
        assert!(err.to_string().contains("clustering"));
    }

    #[test]
    fn test_task_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&TaskKind::Classification).unwrap();
        assert_eq!(json, "\"classification\"");
    }

    #[test]
    fn test_stage_order_matches_workflow() {
        assert_eq!(
            Stage::ALL,
            [Stage::Upload, Stage::Eda, Stage::Training, Stage::Report]
        );
    }
}
