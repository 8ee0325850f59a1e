//! AI service integration for summarization and image generation
//!
//! Provides the trait seams for Gemini's text endpoints (summarize, alt
//! text, vision description) and the Imagen prediction endpoint, plus mock
//! implementations for tests.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiImageClient, GeminiTextClient};
pub use mock::{MockImageGenerationClient, MockTextClient, TINY_PNG};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TextService: Send + Sync {
    /// Condense raw article content into a short visual-essence prompt.
    async fn summarize(&self, content: &str) -> Result<String>;

    /// Produce a short SEO alt text for an image described by `prompt`,
    /// optionally working `keyword` into the sentence.
    async fn alt_text(&self, prompt: &str, keyword: Option<&str>) -> Result<String>;

    /// Describe existing image bytes. Not wired into the HTTP workflow.
    async fn describe_image(&self, image_bytes: &[u8], prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate `sample_count` images for `prompt` at the given aspect
    /// ratio. Returns one decoded payload per sample.
    async fn generate_images(
        &self,
        prompt: &str,
        sample_count: u8,
        aspect_ratio: &str,
    ) -> Result<Vec<Vec<u8>>>;
}

/// Strip quote and markdown-emphasis characters the model sometimes wraps
/// alt text in.
pub fn sanitize_alt_text(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '"' && *c != '*')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_quotes_and_stars() {
        assert_eq!(
            sanitize_alt_text("\"A **red** cat\""),
            "A red cat"
        );
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize_alt_text("  plain text \n"), "plain text");
    }

    #[test]
    fn test_sanitize_leaves_clean_text_alone() {
        assert_eq!(
            sanitize_alt_text("A dog running on a beach"),
            "A dog running on a beach"
        );
    }
}
