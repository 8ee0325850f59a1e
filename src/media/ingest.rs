use super::{ImageSource, MediaStore};
use crate::image::ImageService;
use crate::models::{MediaAsset, OutputFormat};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_FILENAME_HINT: &str = "generated-image";

/// SEO metadata attached to an ingested asset.
#[derive(Debug, Clone, Default)]
pub struct IngestMetadata {
    pub alt: String,
    pub caption: String,
    pub filename_hint: Option<String>,
}

/// Drives one image from source to media library: resolve to a scratch
/// file, post-process, store, attach metadata. Scratch files never outlive
/// the call.
pub struct MediaIngestor {
    http: reqwest::Client,
    processor: Box<dyn ImageService>,
    store: Arc<dyn MediaStore>,
    quality: u8,
    format: OutputFormat,
    work_dir: PathBuf,
}

impl MediaIngestor {
    pub fn new(
        processor: Box<dyn ImageService>,
        store: Arc<dyn MediaStore>,
        quality: u8,
        format: OutputFormat,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            processor,
            store,
            quality,
            format,
            work_dir,
        }
    }

    pub async fn ingest(&self, source: ImageSource, metadata: &IngestMetadata) -> Result<MediaAsset> {
        // Every intermediate file lands in this directory; dropping the
        // guard removes them on success and on every error path.
        let scratch = tempfile::Builder::new()
            .prefix("imagen-flow-")
            .tempdir_in(&self.work_dir)?;

        let source_path = self.resolve_source(source, scratch.path()).await?;

        let hint = metadata
            .filename_hint
            .as_deref()
            .filter(|hint| !hint.trim().is_empty())
            .unwrap_or(DEFAULT_FILENAME_HINT);

        let processed = self
            .processor
            .process(&source_path, self.quality, self.format, hint)
            .await?;

        let mut asset = self.store.create_asset(&processed).await?;

        if !metadata.alt.is_empty() || !metadata.caption.is_empty() {
            match self
                .store
                .attach_metadata(&asset.id, &metadata.alt, &metadata.caption)
                .await
            {
                Ok(()) => {
                    asset.alt = metadata.alt.clone();
                    asset.caption = metadata.caption.clone();
                }
                // The asset stays; it just lacks metadata.
                Err(e) => {
                    tracing::warn!("Failed to attach metadata to asset {}: {}", asset.id, e);
                }
            }
        }

        Ok(asset)
    }

    async fn resolve_source(&self, source: ImageSource, scratch: &Path) -> Result<PathBuf> {
        match source {
            ImageSource::Bytes(bytes) => {
                let path = scratch.join("download");
                std::fs::write(&path, &bytes)?;
                Ok(path)
            }
            ImageSource::Local(original) => {
                let name = original
                    .file_name()
                    .map(|name| name.to_os_string())
                    .unwrap_or_else(|| "source".into());
                let path = scratch.join(name);
                std::fs::copy(&original, &path)?;
                Ok(path)
            }
            ImageSource::Remote(url) => self.download(&url, scratch).await,
        }
    }

    async fn download(&self, url: &str, scratch: &Path) -> Result<PathBuf> {
        tracing::debug!("Downloading image from {}", url);

        let response = self
            .http
            .get(url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "Unexpected status {} fetching {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to read body from {}: {}", url, e)))?;

        let path = scratch.join("download");
        std::fs::write(&path, &bytes)?;
        Ok(path)
    }
}
