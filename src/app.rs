//! Application orchestration for the generation endpoints.
//!
//! Glues the AI clients, the image processor, and the media ingestor into the
//! two operations the HTTP API exposes: content summarization and batched
//! image generation.

use crate::ai::{GeminiImageClient, GeminiTextClient, ImageGenerationService, TextService};
use crate::config::Config;
use crate::image::{select_stripper, ImageProcessor};
use crate::media::{ImageSource, IngestMetadata, MediaIngestor, MediaLibrary};
use crate::models::{GenerateRequest, GenerationFailure, MediaAsset};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{info, warn};

const MAX_SAMPLES: u8 = 4;

/// Outcome of a generation batch: the assets that made it into the media
/// library, plus per-image failures for the ones that did not.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub images: Vec<MediaAsset>,
    pub failures: Vec<GenerationFailure>,
}

/// Coordinates summarization, image generation, and media ingestion.
pub struct App {
    text: Box<dyn TextService>,
    image_gen: Box<dyn ImageGenerationService>,
    ingestor: MediaIngestor,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub text: Box<dyn TextService>,
    pub image_gen: Box<dyn ImageGenerationService>,
    pub ingestor: MediaIngestor,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            text: services.text,
            image_gen: services.image_gen,
            ingestor: services.ingestor,
        }
    }

    /// Construct an app from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across the Gemini clients.
        let http_client = reqwest::Client::new();

        let text = Box::new(GeminiTextClient::new_with_client(
            config.gemini_api_key.clone(),
            http_client.clone(),
        ));
        let image_gen = Box::new(GeminiImageClient::new_with_client(
            config.gemini_api_key.clone(),
            http_client,
        ));

        let processor = Box::new(ImageProcessor::new(select_stripper(config.strip_metadata)));
        let store = Arc::new(MediaLibrary::new(
            &config.media_dir,
            config.media_base_url.clone(),
        )?);

        std::fs::create_dir_all(&config.work_dir)?;
        let ingestor = MediaIngestor::new(
            processor,
            store,
            config.default_quality,
            config.preferred_format,
            config.work_dir.clone(),
        );

        Ok(Self::with_services(AppServices {
            text,
            image_gen,
            ingestor,
        }))
    }

    /// Distills article content into a one-sentence visual essence suitable
    /// as an image prompt.
    pub async fn summarize(&self, content: &str) -> Result<String> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::InvalidRequest("No content provided".to_string()));
        }

        let essence = self.text.summarize(content).await?;
        info!("Summarized {} chars into: {}", content.len(), essence);
        Ok(essence)
    }

    /// Generates a batch of images and ingests each into the media library.
    ///
    /// The batch keeps going when a single image fails to ingest; failures
    /// are reported per index alongside the successful assets.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerationOutcome> {
        let prompt = request.prompt.trim();
        if prompt.is_empty() {
            return Err(Error::InvalidRequest("No prompt provided".to_string()));
        }
        let samples = request.samples.clamp(1, MAX_SAMPLES);
        if samples != request.samples {
            warn!(
                "Requested {} samples, clamped to {}",
                request.samples, samples
            );
        }

        let aspect_ratio = request.orientation.aspect_ratio();
        info!(
            "Generating {} image(s) at {} for prompt: {}",
            samples, aspect_ratio, prompt
        );

        let batch = self
            .image_gen
            .generate_images(prompt, samples, aspect_ratio)
            .await?;

        let keyword = request
            .filename_keyword
            .as_deref()
            .filter(|keyword| !keyword.trim().is_empty());

        let mut images = Vec::new();
        let mut failures = Vec::new();
        for (index, bytes) in batch.into_iter().enumerate() {
            // One alt-text call per sample so the wording can vary across
            // the batch.
            let alt = match self.text.alt_text(prompt, keyword).await {
                Ok(alt) => alt,
                // Alt text is SEO garnish; the image proceeds without it.
                Err(e) => {
                    warn!("Failed to generate alt text for image {}: {}", index, e);
                    String::new()
                }
            };
            let metadata = IngestMetadata {
                caption: alt.clone(),
                alt,
                filename_hint: keyword.map(str::to_string),
            };

            match self
                .ingestor
                .ingest(ImageSource::Bytes(bytes), &metadata)
                .await
            {
                Ok(asset) => {
                    info!("Ingested image {} as asset {}", index, asset.id);
                    images.push(asset);
                }
                Err(e) => {
                    warn!("Failed to ingest image {}: {}", index, e);
                    failures.push(GenerationFailure {
                        index,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(GenerationOutcome { images, failures })
    }
}
