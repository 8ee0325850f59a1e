use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Lightweight Gemini REST client shared by the text and image modules.
///
/// Authenticates with the `key` query-string parameter. The key is checked
/// before any request is built, so a missing credential never reaches the
/// network.
pub struct GeminiHttpClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// Gemini's error envelope: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GeminiHttpClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::new_with_client(api_key, Client::new())
    }

    pub fn new_with_client(api_key: Option<String>, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn require_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingCredential)
    }

    async fn post_to_url<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        url: String,
        request: &Req,
        timeout: Duration,
    ) -> Result<Resp> {
        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                map_transport_error(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(map_transport_error)?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            // Surface the API-reported message when the body is the usual
            // error envelope, the raw body otherwise.
            let message = serde_json::from_str::<ApiErrorEnvelope>(&error_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(error_text);
            return Err(Error::Upstream(format!("status {}: {}", status, message)));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::Upstream(format!("Failed to parse Gemini response: {}", e))
        })
    }

    /// Calls a model's `generateContent` endpoint (text and vision requests).
    pub async fn generate_content<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        model: &str,
        request: &Req,
        timeout: Duration,
    ) -> Result<Resp> {
        let key = self.require_key()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, key
        );
        self.post_to_url(url, request, timeout).await
    }

    /// Calls a model's `predict` endpoint (Imagen image generation).
    pub async fn predict<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        model: &str,
        request: &Req,
        timeout: Duration,
    ) -> Result<Resp> {
        let key = self.require_key()?;
        let url = format!(
            "{}/v1beta/models/{}:predict?key={}",
            self.base_url, model, key
        );
        self.post_to_url(url, request, timeout).await
    }
}

fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::UpstreamTimeout(e.to_string())
    } else {
        Error::Upstream(e.to_string())
    }
}
