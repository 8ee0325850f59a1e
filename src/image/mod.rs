//! Image post-processing
//!
//! Normalizes generated or downloaded images before they enter the media
//! library: best-effort metadata stripping, recompression at a target
//! quality, and conversion to the configured container format.

pub mod mock;
pub mod processor;
pub mod strip;

pub use mock::MockImageProcessor;
pub use processor::ImageProcessor;
pub use strip::{select_stripper, ExifStripper, MetadataStripper, NoopStripper};

use crate::models::OutputFormat;
use crate::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait ImageService: Send + Sync {
    /// Re-encodes `source` at `quality` into `format`, writing the output
    /// alongside the source as `<sanitized hint>.<ext>`. Returns the final
    /// path.
    async fn process(
        &self,
        source: &Path,
        quality: u8,
        format: OutputFormat,
        filename_hint: &str,
    ) -> Result<PathBuf>;
}

/// Reduces a filename hint to lowercase ASCII alphanumerics and dashes,
/// falling back to `generated-image` when nothing survives.
pub fn sanitize_filename_hint(hint: &str) -> String {
    let mut sanitized = String::with_capacity(hint.len());
    let mut last_dash = true;
    for c in hint.chars() {
        if c.is_ascii_alphanumeric() {
            sanitized.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let sanitized = sanitized.trim_end_matches('-').to_string();
    if sanitized.is_empty() {
        "generated-image".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_lowercases_and_dashes() {
        assert_eq!(sanitize_filename_hint("Acme Widgets 2026"), "acme-widgets-2026");
    }

    #[test]
    fn test_sanitize_collapses_symbol_runs() {
        assert_eq!(sanitize_filename_hint("hello -- world!!"), "hello-world");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename_hint(""), "generated-image");
        assert_eq!(sanitize_filename_hint("???"), "generated-image");
    }
}
