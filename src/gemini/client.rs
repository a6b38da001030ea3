use super::types::GenerateContentRequest;
use super::{ByteStream, GenerationBackend};
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Reqwest transport for Gemini's `streamGenerateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Construct a transport from process configuration.
    ///
    /// The configured model should be the bare model ID (for example
    /// `gemini-3-pro-image-preview`), not a `models/...`-prefixed path
    /// segment.
    pub fn new(config: &Config) -> Self {
        Self::new_with_client(config, Client::new())
    }

    pub fn new_with_client(config: &Config, client: Client) -> Self {
        let model = config
            .gemini_model
            .strip_prefix("models/")
            .unwrap_or(&config.gemini_model)
            .to_string();

        Self {
            client,
            api_key: config.gemini_api_key.clone(),
            model,
            base_url: config.gemini_base_url.clone(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn stream_generate(&self, request: &GenerateContentRequest) -> Result<ByteStream> {
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            // Body read is best-effort; an unreadable error body stays empty.
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error (status {}): {}", status, body);
            return Err(Error::VendorTransport { status, body });
        }

        Ok(response.bytes_stream().map_err(Error::from).boxed())
    }
}
