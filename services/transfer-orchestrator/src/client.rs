//! Remote collaborator seam
//!
//! `PixApi` is what the orchestrator and reporter talk to. `HttpPixApi` is
//! the reqwest implementation against the demo backend; tests swap in
//! scripted fakes.

use crate::error::ApiError;
use crate::models::{
    ANALYSIS_PATH, AnalysisRequest, AnalysisResponse, MANUAL_REPORT_PATH, ManualReportRequest,
    ManualReportResponse, PROCESSING_PATH, ProcessRequest, ProcessResponse, SCAM_CATALOG_PATH,
    ScamCatalogResponse,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// The four remote endpoints the client depends on
#[async_trait]
pub trait PixApi: Send + Sync {
    async fn analyze_pre_transaction(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, ApiError>;

    async fn process_transfer(&self, request: &ProcessRequest) -> Result<ProcessResponse, ApiError>;

    async fn submit_manual_report(
        &self,
        request: &ManualReportRequest,
    ) -> Result<ManualReportResponse, ApiError>;

    async fn fetch_scam_catalog(&self) -> Result<ScamCatalogResponse, ApiError>;
}

/// JSON-over-HTTP implementation
#[derive(Debug, Clone)]
pub struct HttpPixApi {
    client: Client,
    base_url: String,
}

impl HttpPixApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response).await
    }

    async fn get_json<R>(&self, path: &str) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response).await
    }
}

/// Run a collaborator call under a deadline
pub async fn with_deadline<T, F>(
    endpoint: &'static str,
    deadline: Duration,
    call: F,
) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout {
            endpoint,
            after_ms: deadline.as_millis() as u64,
        }),
    }
}

/// Parse the body whatever the status: the backend reports business failures
/// as JSON on 4xx/5xx. Only an unparseable body is judged by its status.
async fn decode_response<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    match serde_json::from_str::<R>(&text) {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Err(ApiError::Status {
            status_code: status.as_u16(),
            body: text,
        }),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

#[async_trait]
impl PixApi for HttpPixApi {
    async fn analyze_pre_transaction(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, ApiError> {
        self.post_json(ANALYSIS_PATH, request).await
    }

    async fn process_transfer(&self, request: &ProcessRequest) -> Result<ProcessResponse, ApiError> {
        self.post_json(PROCESSING_PATH, request).await
    }

    async fn submit_manual_report(
        &self,
        request: &ManualReportRequest,
    ) -> Result<ManualReportResponse, ApiError> {
        self.post_json(MANUAL_REPORT_PATH, request).await
    }

    async fn fetch_scam_catalog(&self) -> Result<ScamCatalogResponse, ApiError> {
        self.get_json(SCAM_CATALOG_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpPixApi::new("http://localhost:8080/");
        assert_eq!(api.base_url(), "http://localhost:8080");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_expiry_is_timeout() {
        let stalled = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<(), ApiError>(())
        };
        let err = with_deadline("/api/pix/processar", Duration::from_secs(15), stalled)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Timeout {
                endpoint: "/api/pix/processar",
                after_ms: 15_000
            }
        );
    }
}
