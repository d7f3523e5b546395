//! One workflow session per CLI invocation.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};

use oneclick_client::{BackendClientConfig, HttpBackendClient};
use oneclick_config::OneclickConfig;
use oneclick_core::api::BackendApi;
use oneclick_core::controller::{
    AlwaysConfirm, ConfirmDelete, DeleteOutcome, EdaController, EdaOutcome, HistoryController,
    LoadOutcome, RefreshOutcome, ReportController, TrainOutcome, TrainingController,
    UploadController, UploadOutcome, UploadPolicy,
};
use oneclick_core::guard;
use oneclick_core::store::PipelineStore;
use oneclick_core::types::{DatasetFile, Stage, TaskKind, TrainingReport};

fn backend(config: &OneclickConfig) -> anyhow::Result<Arc<dyn BackendApi>> {
    let client = HttpBackendClient::new(BackendClientConfig {
        base_url: config.backend.base_url.clone(),
        timeout_secs: config.backend.timeout_secs,
    })?;
    Ok(Arc::new(client))
}

/// Upload a dataset and drive the session through EDA, training and report.
pub async fn run_workflow(
    config: &OneclickConfig,
    file: &Path,
    task: TaskKind,
    target: &str,
    model: Option<String>,
) -> anyhow::Result<()> {
    let store = Arc::new(PipelineStore::new());
    let api = backend(config)?;

    let upload = UploadController::with_policy(
        store.clone(),
        api.clone(),
        UploadPolicy {
            max_bytes: config.upload.max_bytes,
            extension: config.upload.extension.clone(),
        },
    );
    let dataset =
        DatasetFile::from_path(file).with_context(|| format!("reading {}", file.display()))?;
    upload.stage_dataset(dataset)?;

    let outcome = upload
        .submit(task, target)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let UploadOutcome::Completed { project_id } = outcome else {
        bail!("upload already in flight");
    };
    println!("Workspace started: {project_id}");

    let state = store.read();
    if !guard::can_enter(&state, Stage::Eda) {
        bail!("dataset was not accepted; EDA is unreachable");
    }

    let eda = EdaController::new(store.clone(), api.clone());
    match eda.ensure_loaded().await {
        Ok(EdaOutcome::Loaded) | Ok(EdaOutcome::AlreadyLoaded) => {
            println!("EDA ready: missing values, correlations, target distribution fetched");
        }
        Ok(other) => tracing::debug!(?other, "skipping EDA"),
        // Not fatal to the session: the report does not depend on the charts.
        Err(err) => eprintln!("EDA unavailable: {}", err.user_message()),
    }

    let suggestions = store.read().suggestions;
    println!("Model suggestions:");
    for suggestion in &suggestions {
        println!(
            "  {}  {} ({})",
            suggestion.id, suggestion.name, suggestion.reason
        );
    }

    let model_id = match model {
        Some(model_id) => model_id,
        None => {
            suggestions
                .first()
                .map(|s| s.id.clone())
                .context("backend returned no model suggestions")?
        }
    };

    let training = TrainingController::new(store.clone(), api.clone());
    let outcome = training
        .train(&model_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let TrainOutcome::Completed { next } = outcome else {
        bail!("training already in flight");
    };

    let state = store.read();
    if !guard::can_enter(&state, next) {
        bail!("training finished but the report stage is unreachable");
    }
    let report = ReportController::new(store.clone(), api.clone());
    match report.results() {
        Some(results) => print_report(&results),
        None => bail!("training finished without results"),
    }
    Ok(())
}

pub async fn list_projects(config: &OneclickConfig) -> anyhow::Result<()> {
    let store = Arc::new(PipelineStore::new());
    let api = backend(config)?;
    let history = HistoryController::new(store.clone(), api);

    let outcome = history
        .refresh()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let RefreshOutcome::Refreshed = outcome else {
        bail!("history refresh already in flight");
    };

    let projects = store.read().projects;
    if projects.is_empty() {
        println!("No saved workspaces.");
        return Ok(());
    }
    for project in projects {
        let score = project
            .score
            .map(|s| format!("{s:.4}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  {}  {}  score: {}",
            project.project_id,
            project.dataset_name,
            project.task_type,
            project.timestamp.format("%Y-%m-%d %H:%M"),
            score
        );
    }
    Ok(())
}

pub async fn open_project(config: &OneclickConfig, project_id: &str) -> anyhow::Result<()> {
    let store = Arc::new(PipelineStore::new());
    let api = backend(config)?;
    let history = HistoryController::new(store.clone(), api.clone());

    let outcome = history
        .load(project_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let LoadOutcome::Opened { next } = outcome else {
        bail!("history load already in flight");
    };
    debug_assert_eq!(next, Stage::Report);

    let report = ReportController::new(store.clone(), api);
    match report.results() {
        Some(results) => print_report(&results),
        None => println!("Workspace {project_id} has no training results yet."),
    }
    Ok(())
}

pub async fn delete_project(
    config: &OneclickConfig,
    project_id: &str,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let store = Arc::new(PipelineStore::new());
    let api = backend(config)?;
    let history = HistoryController::new(store, api);

    let always = AlwaysConfirm;
    let prompt = PromptConfirm;
    let confirm: &dyn ConfirmDelete = if assume_yes { &always } else { &prompt };
    match history
        .delete(project_id, confirm)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?
    {
        DeleteOutcome::Deleted => println!("Deleted workspace {project_id}."),
        DeleteOutcome::Aborted => {}
        DeleteOutcome::AlreadyRunning => bail!("delete already in flight"),
    }
    Ok(())
}

pub async fn promote_model(
    config: &OneclickConfig,
    model_id: &str,
    version: u32,
) -> anyhow::Result<()> {
    let api = backend(config)?;
    api.promote(model_id, version)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("Promoted {model_id} v{version} to production.");
    Ok(())
}

fn print_report(results: &TrainingReport) {
    println!("Training report");
    println!("  model:    {}", results.model_id);
    println!("  task:     {}", results.task);
    println!("  score:    {:.4}", results.score);
    println!("  duration: {:.2}s", results.duration);
    let mut metrics: Vec<_> = results.metrics.iter().collect();
    metrics.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in metrics {
        println!("  {name}: {value:.4}");
    }
}

/// Interactive y/N prompt on stderr.
struct PromptConfirm;

impl ConfirmDelete for PromptConfirm {
    fn confirm(&self, project_id: &str) -> bool {
        eprint!("Delete workspace {project_id} forever? [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}
