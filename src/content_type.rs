//! Content-type lookup by file extension.

use std::path::Path;

/// Fallback for unknown or missing extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type for inline previews.
///
/// Only the document formats the front-end knows how to preview get a
/// specific type; everything else is served as `application/octet-stream`.
pub fn inline_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("csv") => "text/csv",
        Some("tex" | "txt") => "text/plain",
        _ => OCTET_STREAM,
    }
}

/// Content type for downloads, guessed from the full MIME database.
pub fn download_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
