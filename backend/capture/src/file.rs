//! File acquisition: read a selected image file and wrap it for transport.

use std::path::Path;

use snaptext_core::{CaptureError, ImagePayload};
use tokio::fs;
use tracing::info;

use crate::mime;

/// Read an image file into a payload. No device resource is held.
pub async fn acquire_from_file(path: &Path) -> Result<ImagePayload, CaptureError> {
    let format = mime::image_format_for(path).ok_or_else(|| {
        CaptureError::Acquisition(format!(
            "not a supported image file ({}): {}",
            mime::detect_mime_type(path),
            path.display()
        ))
    })?;

    let bytes = fs::read(path)
        .await
        .map_err(|err| CaptureError::Acquisition(format!("could not read {}: {err}", path.display())))?;
    if bytes.is_empty() {
        return Err(CaptureError::Acquisition(format!(
            "selected file is empty: {}",
            path.display()
        )));
    }

    info!(path = %path.display(), bytes = bytes.len(), "Read image file");
    Ok(ImagePayload::new(bytes, format))
}
