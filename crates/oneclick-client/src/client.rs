//! HTTP backend client.

use async_trait::async_trait;
use reqwest::multipart;
use serde::{Deserialize, Serialize};

use oneclick_core::api::{ApiError, BackendApi, UploadReceipt};
use oneclick_core::types::{
    DatasetFile, EdaReport, ModelSuggestion, ProjectRecord, ProjectSummary, TaskKind,
    TrainingReport,
};

/// Backend client configuration.
#[derive(Debug, Clone)]
pub struct BackendClientConfig {
    /// Base endpoint URL of the training backend.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP implementation of the backend API.
pub struct HttpBackendClient {
    client: reqwest::Client,
    config: BackendClientConfig,
}

impl HttpBackendClient {
    /// Create a new client.
    pub fn new(config: BackendClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Backend {
            status: status.as_u16(),
            detail: error_detail(&body),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        decode(Self::check(response).await?).await
    }
}

/// Pull the human-readable detail out of a backend error body.
///
/// The backend reports failures as `{"detail": "..."}`; anything else is
/// passed through verbatim so the raw body is still visible to the user.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: String,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.detail,
        Err(_) => body.to_string(),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

// Wire envelopes the operation table wraps around the core types.

#[derive(Debug, Deserialize)]
struct SuggestionsResponse {
    suggestions: Vec<ModelSuggestion>,
}

#[derive(Debug, Serialize)]
struct TrainRequest<'a> {
    model_id: &'a str,
}

#[derive(Debug, Serialize)]
struct PromoteRequest<'a> {
    model_id: &'a str,
    version: u32,
}

#[async_trait]
impl BackendApi for HttpBackendClient {
    async fn upload(
        &self,
        dataset: &DatasetFile,
        task: TaskKind,
        target: &str,
    ) -> Result<UploadReceipt, ApiError> {
        let file_part = multipart::Part::bytes(dataset.bytes.clone())
            .file_name(dataset.name.clone());
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("task", task.as_str())
            .text("target", target.to_string());

        let response = self
            .client
            .post(self.url("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        decode(Self::check(response).await?).await
    }

    async fn model_suggestions(
        &self,
        project_id: &str,
    ) -> Result<Vec<ModelSuggestion>, ApiError> {
        let response: SuggestionsResponse = self
            .get_json(&format!("projects/{project_id}/suggestions"))
            .await?;
        Ok(response.suggestions)
    }

    async fn eda(&self, project_id: &str) -> Result<EdaReport, ApiError> {
        self.get_json(&format!("projects/{project_id}/eda")).await
    }

    async fn train(&self, project_id: &str, model_id: &str) -> Result<TrainingReport, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("projects/{project_id}/train")))
            .json(&TrainRequest { model_id })
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        decode(Self::check(response).await?).await
    }

    async fn promote(&self, model_id: &str, version: u32) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("promote"))
            .json(&PromoteRequest { model_id, version })
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        self.get_json("projects").await
    }

    async fn project(&self, project_id: &str) -> Result<ProjectRecord, ApiError> {
        self.get_json(&format!("projects/{project_id}")).await
    }

    async fn delete_project(&self, project_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("projects/{project_id}")))
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}
