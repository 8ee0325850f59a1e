//! Data models and structures
//!
//! Defines the domain types shared across the API surface, the generation
//! pipeline, and the media library.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Requested image proportions, as chosen in the editor sidebar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Square,
    Portrait,
    Landscape,
}

impl Orientation {
    /// Maps the editor-facing orientation to the Imagen aspect-ratio string.
    pub fn aspect_ratio(self) -> &'static str {
        match self {
            Orientation::Square => "1:1",
            Orientation::Portrait => "3:4",
            Orientation::Landscape => "16:9",
        }
    }
}

/// Output container format for processed images.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Webp,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "webp" => Ok(OutputFormat::Webp),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            other => Err(Error::Config(format!(
                "Unsupported image format '{}', expected webp or jpeg",
                other
            ))),
        }
    }
}

/// A stored media library entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaAsset {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
}

// Editor-facing request/response payloads

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SummarizeResponse {
    pub fn ok(essence: String) -> Self {
        Self {
            success: true,
            essence: Some(essence),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            essence: None,
            message: Some(message),
        }
    }
}

fn default_samples() -> u8 {
    1
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_samples")]
    pub samples: u8,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub filename_keyword: Option<String>,
}

/// Per-image failure detail inside an otherwise successful batch.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<MediaAsset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<GenerationFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerateResponse {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            images: Vec::new(),
            failures: Vec::new(),
            message: Some(message),
        }
    }
}
