use crate::config::DEFAULT_API_BASE_URL;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AzureError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Azure DevOps API error (HTTP {status}): {body}")]
    ApiError { status: u16, body: String },
}

/// Thin HTTP client for the Azure DevOps REST API.
///
/// The client holds no credentials: every call receives the bearer token of the
/// MCP request it serves.
pub struct AzureDevOpsClient {
    client: Client,
    base_url: String,
}

impl Default for AzureDevOpsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AzureDevOpsClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    /// Create a client against an explicit base URL (on-prem servers, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}/{segment}/.../_apis/{path}`, percent-encoding each scope segment.
    pub fn api_url(&self, scope: &[&str], path: &str) -> String {
        let mut url = self.base_url.clone();
        for segment in scope {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url.push_str("/_apis/");
        url.push_str(path);
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        token: &str,
        method: Method,
        url: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<(T, HeaderMap), AzureError> {
        log::debug!("Request: {} {}", method, url);
        if let Some(b) = &body
            && let Ok(json) = serde_json::to_string_pretty(b)
        {
            log::debug!("Request body: {}", json);
        }

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header("Content-Type", "application/json");

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        log::debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::debug!("Error response: {}", error_text);
            return Err(AzureError::ApiError {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let response_text = response.text().await?;
        log::debug!("Response body: {}", response_text);

        let data = serde_json::from_str(&response_text)?;
        Ok((data, headers))
    }

    pub async fn get<T: DeserializeOwned>(&self, token: &str, url: &str) -> Result<T, AzureError> {
        let (data, _) = self.get_with_headers(token, url).await?;
        Ok(data)
    }

    /// GET request that returns both the response body and headers
    pub async fn get_with_headers<T: DeserializeOwned>(
        &self,
        token: &str,
        url: &str,
    ) -> Result<(T, HeaderMap), AzureError> {
        self.send(token, Method::GET, url, None::<&String>).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        token: &str,
        url: &str,
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, AzureError> {
        let (data, _) = self.send(token, Method::POST, url, Some(body)).await?;
        Ok(data)
    }
}
