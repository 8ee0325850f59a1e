use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::{mime, sanitize_alt_text, TextService};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

const TEXT_MODEL: &str = "gemini-3-flash-preview";

const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(30);
const ALT_TEXT_TIMEOUT: Duration = Duration::from_secs(20);
const ANALYZE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct TextRequest {
    contents: Vec<Content>,
}

impl TextRequest {
    fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { role: None, parts }],
        }
    }
}

/// Gemini Flash client covering summarization, alt-text, and vision
/// description.
pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::new_with_client(api_key, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: Option<String>, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, client),
        }
    }

    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        response.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::Text { text } => Some(text.clone()),
                Part::InlineData { .. } => None,
            })
        })
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiTextClient);

#[async_trait]
impl TextService for GeminiTextClient {
    async fn summarize(&self, content: &str) -> Result<String> {
        let instruction = prompts::render(prompts::SUMMARIZE, &[("content", content)]);

        let request = TextRequest::from_parts(vec![Part::Text { text: instruction }]);
        let response: GenerateContentResponse = self
            .http
            .generate_content(TEXT_MODEL, &request, SUMMARIZE_TIMEOUT)
            .await?;

        Self::extract_text(&response)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| Error::Upstream("No text in Gemini summarize response".to_string()))
    }

    async fn alt_text(&self, prompt: &str, keyword: Option<&str>) -> Result<String> {
        let mut instruction = prompts::render(prompts::ALT_TEXT, &[("prompt", prompt)])
            .trim()
            .to_string();
        if let Some(keyword) = keyword.filter(|k| !k.trim().is_empty()) {
            instruction.push(' ');
            instruction
                .push_str(prompts::render(prompts::ALT_TEXT_KEYWORD, &[("keyword", keyword)]).trim());
        }
        instruction.push(' ');
        instruction.push_str(prompts::ALT_TEXT_RULES.trim());

        let request = TextRequest::from_parts(vec![Part::Text { text: instruction }]);
        let response: GenerateContentResponse = self
            .http
            .generate_content(TEXT_MODEL, &request, ALT_TEXT_TIMEOUT)
            .await?;

        let text = Self::extract_text(&response)
            .ok_or_else(|| Error::Upstream("No text in Gemini alt-text response".to_string()))?;

        Ok(sanitize_alt_text(&text))
    }

    async fn describe_image(&self, image_bytes: &[u8], prompt: &str) -> Result<String> {
        let instruction = if prompt.trim().is_empty() {
            prompts::ANALYZE_DEFAULT.trim().to_string()
        } else {
            prompt.to_string()
        };

        use base64::Engine as _;
        let data = base64::engine::general_purpose::STANDARD.encode(image_bytes);

        let request = TextRequest::from_parts(vec![
            Part::Text { text: instruction },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime::detect_image_mime(image_bytes).to_string(),
                    data,
                },
            },
        ]);
        let response: GenerateContentResponse = self
            .http
            .generate_content(TEXT_MODEL, &request, ANALYZE_TIMEOUT)
            .await?;

        Self::extract_text(&response)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| Error::Upstream("No text in Gemini vision response".to_string()))
    }
}
