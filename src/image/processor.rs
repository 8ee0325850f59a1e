use super::{sanitize_filename_hint, ImageService, MetadataStripper};
use crate::models::OutputFormat;
use crate::{Error, Result};
use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};

pub struct ImageProcessor {
    stripper: Box<dyn MetadataStripper>,
}

impl ImageProcessor {
    pub fn new(stripper: Box<dyn MetadataStripper>) -> Self {
        tracing::debug!("Image processor using '{}' metadata stripper", stripper.name());
        Self { stripper }
    }

    fn encode_sync(
        source: PathBuf,
        output: PathBuf,
        quality: u8,
        format: OutputFormat,
    ) -> Result<()> {
        let img = image::open(&source)?;
        match format {
            OutputFormat::Jpeg => {
                let file = std::fs::File::create(&output)?;
                let mut writer = std::io::BufWriter::new(file);
                let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
                // JPEG has no alpha channel
                DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
            }
            OutputFormat::Webp => {
                img.save_with_format(&output, ImageFormat::WebP)?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ImageService for ImageProcessor {
    async fn process(
        &self,
        source: &Path,
        quality: u8,
        format: OutputFormat,
        filename_hint: &str,
    ) -> Result<PathBuf> {
        // Best-effort: a failed strip must not abort processing.
        if let Err(e) = self.stripper.strip(source) {
            tracing::warn!(
                "Failed to strip metadata from {}: {}",
                source.display(),
                e
            );
        }

        let output = source
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!(
                "{}.{}",
                sanitize_filename_hint(filename_hint),
                format.extension()
            ));

        tokio::task::spawn_blocking({
            let source = source.to_path_buf();
            let output = output.clone();
            move || Self::encode_sync(source, output, quality, format)
        })
        .await
        .map_err(|e| Error::Io(std::io::Error::other(format!("encode task join error: {}", e))))??;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::NoopStripper;
    use tempfile::TempDir;

    fn write_test_image(dir: &Path) -> PathBuf {
        let img = image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]));
        let path = dir.join("source.png");
        img.save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    fn processor() -> ImageProcessor {
        ImageProcessor::new(Box::new(NoopStripper))
    }

    #[tokio::test]
    async fn test_webp_output_has_webp_extension() {
        let dir = TempDir::new().unwrap();
        let source = write_test_image(dir.path());

        let output = processor()
            .process(&source, 80, OutputFormat::Webp, "my-post")
            .await
            .unwrap();

        assert!(output.exists());
        assert_eq!(output.extension().unwrap(), "webp");
        assert_eq!(output.file_name().unwrap(), "my-post.webp");
        assert!(image::open(&output).is_ok());
    }

    #[tokio::test]
    async fn test_jpeg_output_has_jpg_extension() {
        let dir = TempDir::new().unwrap();
        let source = write_test_image(dir.path());

        let output = processor()
            .process(&source, 60, OutputFormat::Jpeg, "My Post Title!")
            .await
            .unwrap();

        assert!(output.exists());
        assert_eq!(output.file_name().unwrap(), "my-post-title.jpg");
        assert!(image::open(&output).is_ok());
    }

    #[tokio::test]
    async fn test_extension_matches_format_across_qualities() {
        let dir = TempDir::new().unwrap();
        let source = write_test_image(dir.path());
        let processor = processor();

        for quality in [1u8, 25, 50, 75, 100] {
            for format in [OutputFormat::Webp, OutputFormat::Jpeg] {
                let hint = format!("q{}-{}", quality, format.extension());
                let output = processor
                    .process(&source, quality, format, &hint)
                    .await
                    .unwrap();
                assert_eq!(output.extension().unwrap(), format.extension());
            }
        }
    }

    #[tokio::test]
    async fn test_output_written_alongside_source() {
        let dir = TempDir::new().unwrap();
        let source = write_test_image(dir.path());

        let output = processor()
            .process(&source, 80, OutputFormat::Webp, "beside")
            .await
            .unwrap();

        assert_eq!(output.parent().unwrap(), dir.path());
    }

    #[tokio::test]
    async fn test_corrupt_source_fails_with_image_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("bogus.png");
        std::fs::write(&source, b"not an image").unwrap();

        let err = processor()
            .process(&source, 80, OutputFormat::Jpeg, "x")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[tokio::test]
    async fn test_strip_failure_is_non_fatal() {
        struct FailingStripper;
        impl MetadataStripper for FailingStripper {
            fn strip(&self, _path: &Path) -> Result<()> {
                Err(Error::MetadataStrip("injected".to_string()))
            }
            fn name(&self) -> &'static str {
                "failing"
            }
        }

        let dir = TempDir::new().unwrap();
        let source = write_test_image(dir.path());

        let output = ImageProcessor::new(Box::new(FailingStripper))
            .process(&source, 80, OutputFormat::Webp, "still-works")
            .await
            .unwrap();
        assert!(output.exists());
    }
}
