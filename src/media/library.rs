use super::MediaStore;
use crate::models::MediaAsset;
use crate::{Error, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Local-directory media library.
///
/// Each asset keeps the processed file's stem in its public name, stored as
/// `<stem>-<id>.<ext>` with a `<id>.json` sidecar holding the asset record,
/// and is addressable as `{base_url}/{stem}-{id}.{ext}`.
pub struct MediaLibrary {
    media_dir: PathBuf,
    base_url: String,
}

impl MediaLibrary {
    pub fn new(media_dir: &Path, base_url: String) -> Result<Self> {
        fs::create_dir_all(media_dir)?;
        Ok(Self {
            media_dir: media_dir.to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn sidecar_path(&self, id: &str) -> PathBuf {
        self.media_dir.join(format!("{}.json", id))
    }

    fn write_sidecar(&self, asset: &MediaAsset) -> Result<()> {
        let json = serde_json::to_string_pretty(asset)?;
        fs::write(self.sidecar_path(&asset.id), json)?;
        Ok(())
    }

    fn store_asset(&self, file: &Path, id: String) -> Result<MediaAsset> {
        let extension = file
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        let stem = file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("image");

        let filename = format!("{}-{}.{}", stem, id, extension);
        let destination = self.media_dir.join(&filename);

        fs::copy(file, &destination)
            .map_err(|e| Error::Ingestion(format!("Failed to store media file: {}", e)))?;

        let asset = MediaAsset {
            id: id.clone(),
            url: format!("{}/{}", self.base_url, filename),
            alt: String::new(),
            caption: String::new(),
        };
        if let Err(e) = self.write_sidecar(&asset) {
            // A stored file without its record is not an asset; undo the copy
            // so a failed create leaves nothing behind.
            if let Err(remove_err) = fs::remove_file(&destination) {
                tracing::warn!(
                    "Failed to remove orphaned media file {}: {}",
                    destination.display(),
                    remove_err
                );
            }
            return Err(e);
        }

        tracing::info!("Stored media asset {} at {}", id, destination.display());
        Ok(asset)
    }
}

#[async_trait]
impl MediaStore for MediaLibrary {
    async fn create_asset(&self, file: &Path) -> Result<MediaAsset> {
        self.store_asset(file, Uuid::new_v4().to_string())
    }

    async fn attach_metadata(&self, id: &str, alt: &str, caption: &str) -> Result<()> {
        let mut asset = self
            .get_asset(id)
            .await?
            .ok_or_else(|| Error::Ingestion(format!("Unknown asset id: {}", id)))?;

        asset.alt = alt.to_string();
        asset.caption = caption.to_string();
        self.write_sidecar(&asset)
    }

    async fn get_asset(&self, id: &str) -> Result<Option<MediaAsset>> {
        let path = self.sidecar_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_library(dir: &TempDir) -> MediaLibrary {
        MediaLibrary::new(dir.path(), "https://example.test/media/".to_string()).unwrap()
    }

    fn write_source(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("processed.webp");
        fs::write(&path, b"webp bytes").unwrap();
        path
    }

    #[tokio::test]
    async fn test_create_asset_copies_file_and_builds_url() {
        let media_dir = TempDir::new().unwrap();
        let work_dir = TempDir::new().unwrap();
        let library = make_library(&media_dir);
        let source = write_source(&work_dir);

        let asset = library.create_asset(&source).await.unwrap();

        assert!(asset.url.starts_with("https://example.test/media/processed-"));
        assert!(asset.url.ends_with(".webp"));
        assert!(source.exists(), "source must be left in place");

        let stored = media_dir
            .path()
            .join(format!("processed-{}.webp", asset.id));
        assert_eq!(fs::read(stored).unwrap(), b"webp bytes");
    }

    #[tokio::test]
    async fn test_metadata_round_trip() {
        let media_dir = TempDir::new().unwrap();
        let work_dir = TempDir::new().unwrap();
        let library = make_library(&media_dir);
        let source = write_source(&work_dir);

        let asset = library.create_asset(&source).await.unwrap();
        library.attach_metadata(&asset.id, "X", "Y").await.unwrap();

        let fetched = library.get_asset(&asset.id).await.unwrap().unwrap();
        assert_eq!(fetched.alt, "X");
        assert_eq!(fetched.caption, "Y");
        assert_eq!(fetched.url, asset.url);
    }

    #[tokio::test]
    async fn test_failed_sidecar_write_removes_stored_file() {
        let media_dir = TempDir::new().unwrap();
        let work_dir = TempDir::new().unwrap();
        let library = make_library(&media_dir);
        let source = write_source(&work_dir);

        // A directory at the sidecar path makes the record write fail after
        // the file copy has already succeeded.
        fs::create_dir(media_dir.path().join("blocked.json")).unwrap();

        let err = library
            .store_asset(&source, "blocked".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        // No half-created asset: the copied file must be gone, only the
        // blocking directory remains.
        let leftovers: Vec<_> = fs::read_dir(media_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec!["blocked.json"]);
    }

    #[tokio::test]
    async fn test_attach_metadata_to_unknown_id_fails() {
        let media_dir = TempDir::new().unwrap();
        let library = make_library(&media_dir);

        let err = library.attach_metadata("missing", "a", "b").await.unwrap_err();
        assert!(matches!(err, Error::Ingestion(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_asset_returns_none() {
        let media_dir = TempDir::new().unwrap();
        let library = make_library(&media_dir);

        assert!(library.get_asset("missing").await.unwrap().is_none());
    }
}
