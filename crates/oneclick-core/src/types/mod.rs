//! Core type definitions for the oneclick workflow
//!
//! This module contains the fundamental types used throughout the system:
//! - TaskKind / Stage: closed enums for the ML task and workflow position
//! - DatasetFile: the raw uploaded dataset handle
//! - ModelSuggestion / EdaReport / TrainingReport: backend analysis payloads
//! - ProjectSummary / ProjectRecord: persisted workspace projections

mod dataset;
mod project;
mod report;
mod task;

pub use dataset::DatasetFile;
pub use project::{ProjectId, ProjectMetadata, ProjectRecord, ProjectSummary};
pub use report::{EdaReport, ModelSuggestion, PlotSpec, TrainingReport};
pub use task::{Stage, TaskKind, TaskKindParseError};
