//! Backend analysis payloads: suggestions, EDA charts, training results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TaskKind;

/// A candidate model proposed by the backend for the current dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSuggestion {
    /// Stable identifier passed back to the train operation.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Why the backend proposes this model.
    pub reason: String,
}

/// A plot-ready chart specification.
///
/// Opaque to the core: `data` and `layout` are handed to whatever renderer
/// the host embeds, chart drawing is out of scope here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlotSpec {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub layout: Value,
}

/// Exploratory-analysis payload for a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaReport {
    pub missing_values: PlotSpec,
    pub correlation_matrix: PlotSpec,
    pub target_distribution: PlotSpec,
}

/// Result of a completed training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub task: TaskKind,
    /// Primary score the backend ranks this run by.
    pub score: f64,
    /// Named metrics, e.g. accuracy or r2.
    pub metrics: HashMap<String, f64>,
    /// Wall-clock training duration in seconds.
    pub duration: f64,
    /// Identifier of the model that produced this result.
    pub model_id: String,
}
