use super::MediaStore;
use crate::models::MediaAsset;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockMediaStore {
    assets: Arc<Mutex<HashMap<String, MediaAsset>>>,
    base_url: String,
    create_count: Arc<Mutex<usize>>,
    fail_on: Arc<Mutex<HashSet<usize>>>,
    attach_should_fail: Arc<Mutex<bool>>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self {
            assets: Arc::new(Mutex::new(HashMap::new())),
            base_url: "https://mock-media.example.com".to_string(),
            create_count: Arc::new(Mutex::new(0)),
            fail_on: Arc::new(Mutex::new(HashSet::new())),
            attach_should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Makes the `index`-th `create_asset` call (0-based) fail.
    pub fn with_create_failure_on(self, index: usize) -> Self {
        self.fail_on.lock().unwrap().insert(index);
        self
    }

    pub fn with_attach_failure(self, should_fail: bool) -> Self {
        *self.attach_should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_create_count(&self) -> usize {
        *self.create_count.lock().unwrap()
    }

    pub fn get_assets(&self) -> Vec<MediaAsset> {
        self.assets.lock().unwrap().values().cloned().collect()
    }
}

impl Default for MockMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn create_asset(&self, file: &Path) -> Result<MediaAsset> {
        let mut count = self.create_count.lock().unwrap();
        let index = *count;
        *count += 1;
        drop(count);

        if self.fail_on.lock().unwrap().contains(&index) {
            return Err(Error::Ingestion(format!(
                "Injected create failure on call {}",
                index
            )));
        }

        let extension = file
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        let id = format!("asset-{}", index + 1);
        let asset = MediaAsset {
            id: id.clone(),
            url: format!("{}/{}.{}", self.base_url, id, extension),
            alt: String::new(),
            caption: String::new(),
        };

        self.assets.lock().unwrap().insert(id, asset.clone());
        Ok(asset)
    }

    async fn attach_metadata(&self, id: &str, alt: &str, caption: &str) -> Result<()> {
        if *self.attach_should_fail.lock().unwrap() {
            return Err(Error::Ingestion("Injected attach failure".to_string()));
        }

        let mut assets = self.assets.lock().unwrap();
        let asset = assets
            .get_mut(id)
            .ok_or_else(|| Error::Ingestion(format!("Unknown asset id: {}", id)))?;
        asset.alt = alt.to_string();
        asset.caption = caption.to_string();
        Ok(())
    }

    async fn get_asset(&self, id: &str) -> Result<Option<MediaAsset>> {
        Ok(self.assets.lock().unwrap().get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_create_and_get() {
        let store = MockMediaStore::new();

        let asset = store.create_asset(Path::new("out.webp")).await.unwrap();
        assert_eq!(asset.id, "asset-1");
        assert_eq!(asset.url, "https://mock-media.example.com/asset-1.webp");

        let fetched = store.get_asset("asset-1").await.unwrap().unwrap();
        assert_eq!(fetched, asset);
        assert_eq!(store.get_create_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_store_injected_failure() {
        let store = MockMediaStore::new().with_create_failure_on(1);

        assert!(store.create_asset(Path::new("a.webp")).await.is_ok());
        assert!(store.create_asset(Path::new("b.webp")).await.is_err());
        assert!(store.create_asset(Path::new("c.webp")).await.is_ok());
        assert_eq!(store.get_assets().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_store_metadata_round_trip() {
        let store = MockMediaStore::new();
        let asset = store.create_asset(Path::new("a.jpg")).await.unwrap();

        store.attach_metadata(&asset.id, "X", "Y").await.unwrap();
        let fetched = store.get_asset(&asset.id).await.unwrap().unwrap();
        assert_eq!(fetched.alt, "X");
        assert_eq!(fetched.caption, "Y");
    }

    #[tokio::test]
    async fn test_mock_store_attach_failure() {
        let store = MockMediaStore::new().with_attach_failure(true);
        let asset = store.create_asset(Path::new("a.jpg")).await.unwrap();

        let err = store.attach_metadata(&asset.id, "X", "Y").await.unwrap_err();
        assert!(matches!(err, Error::Ingestion(_)));
    }
}
