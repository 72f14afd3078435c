//! Image media-type sniffing by file extension.
//!
//! Used by the file acquisition variant to restrict selection to image
//! media and to pick the transport format.

use std::path::Path;

use snaptext_core::ImageFormat;

/// Detect an image MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Transport format for a file path, if the format is one the vision
/// endpoint accepts as a data URI.
pub fn image_format_for(path: &Path) -> Option<ImageFormat> {
    match detect_mime_type(path) {
        "image/png" => Some(ImageFormat::Png),
        "image/jpeg" => Some(ImageFormat::Jpeg),
        _ => None,
    }
}
