//! # qrsmith Core
//!
//! Turn text into QR code images and recover text from uploaded images.
//!
//! ## Modules
//!
//! - `constants`: Rendering constants, limits and the "not detected" sentinel
//! - `types`: Request and result types (EncodedImage, DecodedResult, ...)
//! - `encoder`: Text to PNG generation
//! - `decoder`: PNG/JPEG to text detection
//! - `error`: Error taxonomy
//!
//! Symbol math is delegated to the `qrcode` crate and detection to `rqrr`.

#![warn(missing_docs)]

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::NOT_DETECTED;
pub use decoder::{decode, decode_image};
pub use encoder::{generate, generate_image, render_preview, QrEncoder};
pub use error::QrError;
pub use types::{DecodeReport, DecodedResult, EncodeRequest, EncodedImage, ImageInfo, Miss};

/// Result type alias for qrsmith operations
pub type Result<T> = core::result::Result<T, QrError>;
