//! Library entry for qrsmith-cli used by integration tests and embedding.

pub mod commands;

use anyhow::{bail, Result};
use std::path::Path;

// Re-export commands for convenience
pub use commands::*;

/// Extensions accepted by the upload filter
pub const ACCEPTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Warning shown when generation is requested without text
pub const EMPTY_INPUT_WARNING: &str = "Please enter some text to generate QR code.";

/// Reject upload paths whose extension is not PNG or JPEG
pub fn check_upload_extension(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => bail!(
            "Unsupported file type: {} (expected one of: {})",
            path.display(),
            ACCEPTED_EXTENSIONS.join(", ")
        ),
    }
}
