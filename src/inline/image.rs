// src/inline/image.rs
// =============================================================================
// Turns fetched image bytes into something an <img src> can point at.
//
// The rendered page has to stand on its own, so images become data: URIs
// instead of links back to the repository.
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Guesses an image MIME type from the file name
pub fn mime_for(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// A self-contained handle for image bytes
pub fn data_uri(path: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(path), STANDARD.encode(bytes))
}
