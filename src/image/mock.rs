use super::{sanitize_filename_hint, ImageService};
use crate::models::OutputFormat;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Copies the source file to the expected output path without re-encoding.
pub struct MockImageProcessor {
    process_count: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageProcessor {
    pub fn new() -> Self {
        Self {
            process_count: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_process_count(&self) -> usize {
        *self.process_count.lock().unwrap()
    }
}

impl Default for MockImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageProcessor {
    async fn process(
        &self,
        source: &Path,
        _quality: u8,
        format: OutputFormat,
        filename_hint: &str,
    ) -> Result<PathBuf> {
        if *self.should_fail.lock().unwrap() {
            return Err(Error::Image(image::ImageError::IoError(
                std::io::Error::other("Mock failure"),
            )));
        }

        let mut count = self.process_count.lock().unwrap();
        *count += 1;

        let output = source
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!(
                "{}.{}",
                sanitize_filename_hint(filename_hint),
                format.extension()
            ));
        std::fs::copy(source, &output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_mock_copies_source_to_output() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("input.bin");
        std::fs::write(&source, b"bytes").unwrap();

        let processor = MockImageProcessor::new();
        let output = processor
            .process(&source, 80, OutputFormat::Webp, "hero image")
            .await
            .unwrap();

        assert_eq!(output.file_name().unwrap(), "hero-image.webp");
        assert_eq!(std::fs::read(&output).unwrap(), b"bytes");
        assert_eq!(processor.get_process_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_with_failure() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("input.bin");
        std::fs::write(&source, b"bytes").unwrap();

        let processor = MockImageProcessor::new().with_failure(true);
        let result = processor
            .process(&source, 80, OutputFormat::Jpeg, "x")
            .await;
        assert!(result.is_err());
        assert_eq!(processor.get_process_count(), 0);
    }
}
