//! Media library integration
//!
//! The store trait is the single write path into persistent storage: it
//! accepts a processed file, returns an addressable asset, and attaches SEO
//! metadata. The ingestor drives download, post-processing, storage, and
//! guaranteed scratch-file cleanup.

pub mod ingest;
pub mod library;
pub mod mock;

pub use ingest::{IngestMetadata, MediaIngestor};
pub use library::MediaLibrary;
pub use mock::MockMediaStore;

use crate::models::MediaAsset;
use crate::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Input to an ingestion: a file already on disk, a fetchable URL, or raw
/// bytes from an inline API payload.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Local(PathBuf),
    Remote(String),
    Bytes(Vec<u8>),
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persists `file` into the library and returns the new asset with its
    /// identifier and public URL. The source file is left in place.
    async fn create_asset(&self, file: &Path) -> Result<MediaAsset>;

    /// Attaches alt text and caption to an existing asset.
    async fn attach_metadata(&self, id: &str, alt: &str, caption: &str) -> Result<()>;

    /// Reads an asset record back, `None` when the id is unknown.
    async fn get_asset(&self, id: &str) -> Result<Option<MediaAsset>>;
}
