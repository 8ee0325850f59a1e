use super::client::GeminiHttpClient;
use super::types::{PredictInstance, PredictParameters, PredictRequest, PredictResponse};
use crate::ai::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const IMAGE_MODEL: &str = "imagen-4.0-generate-001";
const PREDICT_TIMEOUT: Duration = Duration::from_secs(60);

/// Imagen client issuing `predict` requests for image samples.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::new_with_client(api_key, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: Option<String>, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, client),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_images(
        &self,
        prompt: &str,
        sample_count: u8,
        aspect_ratio: &str,
    ) -> Result<Vec<Vec<u8>>> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count,
                aspect_ratio: aspect_ratio.to_string(),
            },
        };

        let response: PredictResponse = self
            .http
            .predict(IMAGE_MODEL, &request, PREDICT_TIMEOUT)
            .await?;

        if response.predictions.is_empty() {
            return Err(Error::Upstream(
                "No predictions in Imagen response".to_string(),
            ));
        }

        use base64::Engine as _;
        response
            .predictions
            .iter()
            .map(|prediction| {
                let encoded = prediction.bytes_base64_encoded.as_deref().ok_or_else(|| {
                    Error::Upstream("Prediction is missing image bytes".to_string())
                })?;
                tracing::debug!(
                    "Imagen returned prediction with mime_type: {}",
                    prediction.mime_type.as_deref().unwrap_or("unknown")
                );
                base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| {
                        Error::Upstream(format!("Failed to decode Imagen base64 image: {}", e))
                    })
            })
            .collect()
    }
}
