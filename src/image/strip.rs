//! Metadata-strip capability
//!
//! Stripping is best-effort and optional, so it sits behind its own trait
//! with a no-op fallback. The implementation is chosen once at startup from
//! configuration, never probed per call.

use crate::{Error, Result};
use little_exif::metadata::Metadata;
use std::path::Path;

pub trait MetadataStripper: Send + Sync {
    /// Removes embedded metadata (EXIF and friends) from the file in place.
    fn strip(&self, path: &Path) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Strips EXIF metadata in place via little_exif.
pub struct ExifStripper;

impl MetadataStripper for ExifStripper {
    fn strip(&self, path: &Path) -> Result<()> {
        Metadata::file_clear_metadata(path).map_err(|e| Error::MetadataStrip(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "exif"
    }
}

/// Used when metadata stripping is disabled.
pub struct NoopStripper;

impl MetadataStripper for NoopStripper {
    fn strip(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

pub fn select_stripper(enabled: bool) -> Box<dyn MetadataStripper> {
    if enabled {
        Box::new(ExifStripper)
    } else {
        Box::new(NoopStripper)
    }
}
