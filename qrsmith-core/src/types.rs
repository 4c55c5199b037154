//! Core request and result types

use crate::constants::NOT_DETECTED;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Text to turn into a QR image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeRequest {
    /// Arbitrary text or URL
    pub payload: String,
}

impl EncodeRequest {
    /// Create a new encode request
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// A generated QR image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// Symbol version chosen by the best-fit search (1..=40)
    pub version: i16,

    /// Modules per side of the symbol, excluding the quiet zone
    pub modules: u32,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// PNG container bytes, readable from offset zero
    #[serde(skip)]
    pub png: Bytes,
}

impl EncodedImage {
    /// Borrow the PNG bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Take ownership of the PNG bytes
    pub fn into_bytes(self) -> Bytes {
        self.png
    }
}

/// Raster bytes to scan for a QR symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    /// PNG or JPEG container bytes
    pub image: Bytes,
}

impl DecodeRequest {
    /// Create a new decode request
    pub fn new(image: impl Into<Bytes>) -> Self {
        Self {
            image: image.into(),
        }
    }
}

/// Container formats accepted for decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageKind {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Png => write!(f, "PNG"),
            ImageKind::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Basic facts about a loaded image, used for upload previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Container format
    pub format: ImageKind,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Why no text came out of a valid image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum Miss {
    /// The detector found no symbol
    NoSymbol,
    /// A symbol was located but could not be decoded
    Unreadable(String),
}

/// Outcome of a detection pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum DecodedResult {
    /// Recovered payload text
    Text(String),
    /// Nothing readable was found
    NotDetected(Miss),
}

impl DecodedResult {
    /// Check if a non-empty payload was recovered
    pub fn is_detected(&self) -> bool {
        matches!(self, DecodedResult::Text(text) if !text.is_empty())
    }

    /// User-visible text: the payload, or the "not detected" sentinel
    ///
    /// An empty payload is reported as not detected.
    pub fn text(&self) -> &str {
        match self {
            DecodedResult::Text(text) if !text.is_empty() => text,
            _ => NOT_DETECTED,
        }
    }

    /// Consume into the user-visible text
    pub fn into_text(self) -> String {
        match self {
            DecodedResult::Text(text) if !text.is_empty() => text,
            _ => NOT_DETECTED.to_string(),
        }
    }
}

/// Decoded result together with the image it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Loaded image facts
    pub image: ImageInfo,
    /// Detection outcome
    pub result: DecodedResult,
}
