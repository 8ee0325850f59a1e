use super::{ImageGenerationService, TextService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Tiny valid PNG used as the default generated payload.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
    0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
    0x44, 0x41, // IDAT chunk
    0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2, 0x25,
    0x00, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
    0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Clone)]
pub struct MockTextClient {
    summarize_responses: Arc<Mutex<Vec<String>>>,
    alt_responses: Arc<Mutex<Vec<String>>>,
    summarize_count: Arc<Mutex<usize>>,
    alt_count: Arc<Mutex<usize>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            summarize_responses: Arc::new(Mutex::new(Vec::new())),
            alt_responses: Arc::new(Mutex::new(Vec::new())),
            summarize_count: Arc::new(Mutex::new(0)),
            alt_count: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_summarize_response(self, response: String) -> Self {
        self.summarize_responses.lock().unwrap().push(response);
        self
    }

    pub fn with_alt_response(self, response: String) -> Self {
        self.alt_responses.lock().unwrap().push(response);
        self
    }

    /// Makes every call fail with an upstream error carrying `message`.
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_summarize_count(&self) -> usize {
        *self.summarize_count.lock().unwrap()
    }

    pub fn get_alt_count(&self) -> usize {
        *self.alt_count.lock().unwrap()
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(Error::Upstream(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextService for MockTextClient {
    async fn summarize(&self, content: &str) -> Result<String> {
        self.check_failure()?;
        let mut count = self.summarize_count.lock().unwrap();
        *count += 1;

        let responses = self.summarize_responses.lock().unwrap();
        if responses.is_empty() {
            let snippet: String = content.chars().take(40).collect();
            Ok(format!("Visual essence of: {}", snippet))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }

    async fn alt_text(&self, prompt: &str, keyword: Option<&str>) -> Result<String> {
        self.check_failure()?;
        let mut count = self.alt_count.lock().unwrap();
        *count += 1;

        let responses = self.alt_responses.lock().unwrap();
        if responses.is_empty() {
            match keyword {
                Some(keyword) => Ok(format!("Image of {} featuring {}", prompt, keyword)),
                None => Ok(format!("Image of {}", prompt)),
            }
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }

    async fn describe_image(&self, _image_bytes: &[u8], _prompt: &str) -> Result<String> {
        self.check_failure()?;
        Ok("A generated image".to_string())
    }
}

/// Recorded arguments of a `generate_images` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedGeneration {
    pub prompt: String,
    pub sample_count: u8,
    pub aspect_ratio: String,
}

#[derive(Clone)]
pub struct MockImageGenerationClient {
    batches: Arc<Mutex<Vec<Vec<Vec<u8>>>>>,
    calls: Arc<Mutex<Vec<RecordedGeneration>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            batches: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Queues a full batch returned by one `generate_images` call.
    pub fn with_batch(self, batch: Vec<Vec<u8>>) -> Self {
        self.batches.lock().unwrap().push(batch);
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<RecordedGeneration> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_images(
        &self,
        prompt: &str,
        sample_count: u8,
        aspect_ratio: &str,
    ) -> Result<Vec<Vec<u8>>> {
        if let Some(message) = self.failure.lock().unwrap().as_ref() {
            return Err(Error::Upstream(message.clone()));
        }

        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedGeneration {
            prompt: prompt.to_string(),
            sample_count,
            aspect_ratio: aspect_ratio.to_string(),
        });
        let call_index = calls.len() - 1;
        drop(calls);

        let batches = self.batches.lock().unwrap();
        if batches.is_empty() {
            Ok(vec![TINY_PNG.to_vec(); sample_count as usize])
        } else {
            let index = call_index % batches.len();
            Ok(batches[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_mock_text_client_default_responses() {
        let client = MockTextClient::new();

        let essence = client.summarize("A long article about sailing").await.unwrap();
        assert!(essence.contains("sailing"));

        let alt = client.alt_text("a boat", Some("yachts")).await.unwrap();
        assert!(alt.contains("a boat"));
        assert!(alt.contains("yachts"));
        assert_eq!(client.get_summarize_count(), 1);
        assert_eq!(client.get_alt_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_text_client_scripted_responses_cycle() {
        let client = MockTextClient::new()
            .with_summarize_response("First essence".to_string())
            .with_summarize_response("Second essence".to_string());

        assert_eq!(client.summarize("x").await.unwrap(), "First essence");
        assert_eq!(client.summarize("x").await.unwrap(), "Second essence");
        assert_eq!(client.summarize("x").await.unwrap(), "First essence");
    }

    #[tokio::test]
    async fn test_mock_text_client_failure() {
        let client = MockTextClient::new().with_failure("boom".to_string());
        let err = client.summarize("x").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert_eq!(client.get_summarize_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_image_client_default_batch_size() {
        let client = MockImageGenerationClient::new();

        let images = client.generate_images("a cat", 3, "1:1").await.unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0], TINY_PNG.to_vec());
    }

    #[tokio::test]
    async fn test_mock_image_client_records_calls() {
        let client = MockImageGenerationClient::new();

        client.generate_images("a cat", 2, "3:4").await.unwrap();

        let calls = client.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, "a cat");
        assert_eq!(calls[0].sample_count, 2);
        assert_eq!(calls[0].aspect_ratio, "3:4");
    }

    #[tokio::test]
    async fn test_mock_image_client_scripted_batches() {
        let client = MockImageGenerationClient::new()
            .with_batch(vec![vec![1], vec![2]]);

        let images = client.generate_images("x", 2, "1:1").await.unwrap();
        assert_eq!(images, vec![vec![1], vec![2]]);
    }
}
