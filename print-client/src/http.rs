//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

use shared::{ApiResponse, BarcodeRecord, PrintJobRequest, PrintStatusUpdate, PrinterDescriptor};

use crate::api::PrintApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP client for the barcode/print backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request with query parameters
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<ApiResponse<T>> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.client.get(&url).query(query);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Decode the envelope and normalize failures
    ///
    /// HTTP 401 maps to `Unauthorized` regardless of body; any other
    /// non-success status or a `code != 0` envelope becomes a typed error
    /// with the backend's human-readable message.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                return Err(ClientError::Unauthorized);
            }
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Business {
                code: status.as_u16() as i64,
                message: text,
            });
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if !envelope.is_success() {
            return Err(ClientError::Business {
                code: envelope.code,
                message: envelope.message().to_string(),
            });
        }

        Ok(envelope)
    }
}

#[async_trait]
impl PrintApi for HttpClient {
    #[instrument(skip(self))]
    async fn fetch_record(&self, code: &str) -> ClientResult<BarcodeRecord> {
        self.get::<BarcodeRecord>("barcode/queryByCode", &[("code", code)])
            .await?
            .data
            .ok_or_else(|| ClientError::NotFound(code.to_string()))
    }

    #[instrument(skip(self))]
    async fn list_printers(
        &self,
        department: Option<&str>,
    ) -> ClientResult<Vec<PrinterDescriptor>> {
        let query: Vec<(&str, &str)> = match department {
            Some(d) => vec![("department", d)],
            None => vec![],
        };
        Ok(self
            .get::<Vec<PrinterDescriptor>>("printer/list", &query)
            .await?
            .data
            .unwrap_or_default())
    }

    #[instrument(skip(self, jobs), fields(jobs = jobs.len()))]
    async fn submit_print_jobs(&self, jobs: &[PrintJobRequest]) -> ClientResult<()> {
        self.post::<serde_json::Value, _>("printer/batchPrint", &jobs)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, update), fields(id = %update.id))]
    async fn update_print_status(&self, update: &PrintStatusUpdate) -> ClientResult<()> {
        self.post::<serde_json::Value, _>("barcode/updatePrintStatus", update)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpClient::new(&ClientConfig::new("http://10.0.0.1/api/"));
        assert_eq!(client.base_url, "http://10.0.0.1/api");
    }

    #[test]
    fn test_auth_header() {
        let client = HttpClient::new(&ClientConfig::new("http://x")).with_token("tok");
        assert_eq!(client.auth_header().as_deref(), Some("Bearer tok"));

        let bare = HttpClient::new(&ClientConfig::new("http://x"));
        assert_eq!(bare.auth_header(), None);
    }
}
