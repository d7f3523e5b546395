use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use oneclick_config::OneclickConfig;
use oneclick_core::types::TaskKind;

use crate::session;

const DEFAULT_CONFIG_PATH: &str = "oneclick.yaml";

#[derive(Debug, Parser)]
#[command(name = "oneclick", about = "One-click ML workflow driver")]
pub struct Cli {
    /// Path to oneclick.yaml; defaults are used when the file is absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a dataset and drive the full workflow to a report
    Run(RunArgs),
    /// List saved workspaces
    Projects,
    /// Re-open a saved workspace and print its report
    Open {
        #[arg(value_name = "PROJECT_ID")]
        project_id: String,
    },
    /// Delete a saved workspace
    Delete {
        #[arg(value_name = "PROJECT_ID")]
        project_id: String,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Promote a trained model version to production
    Promote {
        #[arg(value_name = "MODEL_ID")]
        model_id: String,
        #[arg(long)]
        version: u32,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Path to the CSV dataset
    #[arg(long)]
    file: PathBuf,
    /// classification or regression
    #[arg(long)]
    task: TaskKind,
    /// Name of the target column
    #[arg(long)]
    target: String,
    /// Candidate model to train; defaults to the first suggestion
    #[arg(long)]
    model: Option<String>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = load_config_or_default(self.config.as_deref())?;
        init_tracing(&config);

        match self.command {
            Command::Run(args) => {
                session::run_workflow(&config, &args.file, args.task, &args.target, args.model)
                    .await
            }
            Command::Projects => session::list_projects(&config).await,
            Command::Open { project_id } => session::open_project(&config, &project_id).await,
            Command::Delete { project_id, yes } => {
                session::delete_project(&config, &project_id, yes).await
            }
            Command::Promote { model_id, version } => {
                session::promote_model(&config, &model_id, version).await
            }
        }
    }
}

/// Load the config file when given or present; otherwise fall back to
/// built-in defaults. An explicit `--config` that fails to load is an error.
fn load_config_or_default(path: Option<&Path>) -> anyhow::Result<OneclickConfig> {
    match path {
        Some(path) => Ok(oneclick_config::load_config(path)?),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Ok(oneclick_config::load_config(default)?)
            } else {
                Ok(OneclickConfig::default())
            }
        }
    }
}

fn init_tracing(config: &OneclickConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
