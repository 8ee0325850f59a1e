//! Typed runtime configuration
//!
//! All settings are read from the environment once at startup and validated
//! in a single pass. Invalid values abort startup instead of surfacing later
//! mid-request.

use crate::models::OutputFormat;
use crate::{Error, Result};
use std::path::PathBuf;

const DEFAULT_QUALITY: u8 = 80;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8087";

#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key. May be absent; API calls then fail with
    /// [`Error::MissingCredential`] instead of blocking startup.
    pub gemini_api_key: Option<String>,
    pub default_quality: u8,
    pub preferred_format: OutputFormat,
    /// Selects the metadata-strip capability at startup.
    pub strip_metadata: bool,
    pub media_dir: PathBuf,
    pub media_base_url: String,
    pub bind_address: String,
    /// Parent directory for per-ingest scratch directories.
    pub work_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            default_quality: match std::env::var("IMAGE_QUALITY") {
                Ok(value) => value.parse().map_err(|_| {
                    Error::Config(format!("IMAGE_QUALITY is not a number: {}", value))
                })?,
                Err(_) => DEFAULT_QUALITY,
            },
            preferred_format: match std::env::var("IMAGE_FORMAT") {
                Ok(value) => value.parse()?,
                Err(_) => OutputFormat::Webp,
            },
            strip_metadata: std::env::var("STRIP_METADATA")
                .map(|value| value != "0" && !value.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            media_dir: std::env::var("MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("media")),
            media_base_url: std::env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8087/media".to_string()),
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.default_quality) {
            return Err(Error::Config(format!(
                "IMAGE_QUALITY must be between 1 and 100, got {}",
                self.default_quality
            )));
        }
        if self.media_base_url.trim().is_empty() {
            return Err(Error::Config("MEDIA_BASE_URL must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            default_quality: DEFAULT_QUALITY,
            preferred_format: OutputFormat::Webp,
            strip_metadata: true,
            media_dir: PathBuf::from("media"),
            media_base_url: "http://localhost:8087/media".to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            work_dir: std::env::temp_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_quality, 80);
        assert_eq!(config.preferred_format, OutputFormat::Webp);
        assert!(config.strip_metadata);
    }

    #[test]
    fn test_quality_out_of_range_is_rejected() {
        let config = Config {
            default_quality: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = Config {
            default_quality: 101,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let config = Config {
            media_base_url: "  ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
