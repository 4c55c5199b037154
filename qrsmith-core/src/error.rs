//! Error types for qrsmith operations

use thiserror::Error;

/// Errors that can occur while generating or decoding QR images
///
/// A valid image without a readable symbol is not an error; see
/// [`crate::types::DecodedResult::NotDetected`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// Payload does not fit the largest symbol version at the configured level
    #[error("Payload of {len} bytes exceeds QR capacity ({max} for its character set)")]
    CapacityExceeded {
        /// Payload length in bytes.
        len: usize,
        /// Capacity of the largest symbol for the payload's character set.
        max: usize,
    },

    /// Bytes could not be read as a supported raster image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Render parameters are out of range or PNG serialization failed
    #[error("Render error: {0}")]
    Render(String),
}
