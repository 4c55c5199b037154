//! QR image generation
//!
//! Symbol construction is delegated to the `qrcode` crate; this module picks
//! the segmentation, rasterizes the module grid and serializes it as PNG.

use crate::constants::{
    EcLevel, BORDER, BOX_SIZE, DARK, LIGHT, MAX_IMAGE_SIDE, MAX_VERSION, MIN_VERSION,
};
use crate::error::QrError;
use crate::types::{EncodeRequest, EncodedImage};
use bytes::Bytes;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::bits::Bits;
use qrcode::render::unicode;
use qrcode::types::QrError as SymbolError;
use qrcode::{Color, QrCode, Version};
use std::io::Cursor;
#[cfg(feature = "logging")]
use tracing::debug;

/// Generate PNG bytes for a payload with the default configuration
///
/// Uses best-fit version selection, error correction level L, 10 pixels per
/// module and a 4 module quiet zone.
pub fn generate(payload: &str) -> Result<Bytes, QrError> {
    QrEncoder::new().encode(payload).map(EncodedImage::into_bytes)
}

/// Generate an image and its metadata with the default configuration
pub fn generate_image(request: &EncodeRequest) -> Result<EncodedImage, QrError> {
    QrEncoder::new().encode(&request.payload)
}

/// Render a payload as Unicode half blocks for terminal display
pub fn render_preview(payload: &str) -> Result<String, QrError> {
    QrEncoder::new().preview(payload)
}

/// Rendering parameters for generated symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Pixels per module
    pub box_size: u32,
    /// Quiet-zone width in modules
    pub border: u32,
    /// Error correction level
    pub ec_level: EcLevel,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            box_size: BOX_SIZE,
            border: BORDER,
            ec_level: EcLevel::Low,
        }
    }
}

/// Builder for generating QR images with non-default parameters
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    config: EncoderConfig,
}

impl QrEncoder {
    /// Create an encoder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder from an explicit configuration
    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Set pixels per module
    pub fn box_size(mut self, box_size: u32) -> Self {
        self.config.box_size = box_size;
        self
    }

    /// Set quiet-zone width in modules
    pub fn border(mut self, border: u32) -> Self {
        self.config.border = border;
        self
    }

    /// Set the error correction level
    pub fn ec_level(mut self, ec_level: EcLevel) -> Self {
        self.config.ec_level = ec_level;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Build the symbol for a payload and serialize it as PNG
    pub fn encode(&self, payload: &str) -> Result<EncodedImage, QrError> {
        if self.config.box_size == 0 {
            return Err(QrError::Render("box size must be at least 1".into()));
        }

        let code = self.build_symbol(payload)?;
        let version = match code.version() {
            Version::Normal(v) => v,
            Version::Micro(v) => v,
        };
        let modules = code.width() as u32;
        let side = self.image_side(modules)?;

        let raster = self.rasterize(&code, side);
        let (width, height) = raster.dimensions();

        let mut cursor = Cursor::new(Vec::new());
        raster
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| QrError::Render(e.to_string()))?;

        #[cfg(feature = "logging")]
        debug!(
            "Generated version {} symbol ({} modules, {}x{} px) for {} byte payload",
            version,
            modules,
            width,
            height,
            payload.len()
        );

        Ok(EncodedImage {
            version,
            modules,
            width,
            height,
            png: Bytes::from(cursor.into_inner()),
        })
    }

    /// Build the symbol and render it for a terminal
    ///
    /// Dark modules are drawn as light cells so the code scans from a
    /// dark-background terminal.
    pub fn preview(&self, payload: &str) -> Result<String, QrError> {
        let code = self.build_symbol(payload)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build())
    }

    fn build_symbol(&self, payload: &str) -> Result<QrCode, QrError> {
        let level = self.config.ec_level.to_qrcode();

        // UTF-8 sequences can look like Shift JIS pairs to the segment
        // optimizer, so anything non-ASCII goes out as plain byte data.
        let result = if payload.is_ascii() {
            QrCode::with_error_correction_level(payload, level)
        } else {
            byte_mode_symbol(payload.as_bytes(), level)
        };

        result.map_err(|e| match e {
            SymbolError::DataTooLong => QrError::CapacityExceeded {
                len: payload.len(),
                max: self.config.ec_level.capacity_for(payload),
            },
            other => QrError::Render(other.to_string()),
        })
    }

    /// Pixel side of the rendered image, bounded by `MAX_IMAGE_SIDE`
    fn image_side(&self, modules: u32) -> Result<u32, QrError> {
        let EncoderConfig {
            box_size, border, ..
        } = self.config;

        border
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(modules))
            .and_then(|total| total.checked_mul(box_size))
            .filter(|side| *side <= MAX_IMAGE_SIDE)
            .ok_or_else(|| {
                QrError::Render(format!(
                    "image side for {} modules, border {}, box size {} exceeds {} px",
                    modules, border, box_size, MAX_IMAGE_SIDE
                ))
            })
    }

    fn rasterize(&self, code: &QrCode, side: u32) -> GrayImage {
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let EncoderConfig {
            box_size, border, ..
        } = self.config;

        GrayImage::from_fn(side, side, |x, y| {
            let mx = x / box_size;
            let my = y / box_size;
            let inside = (border..border + modules).contains(&mx)
                && (border..border + modules).contains(&my);

            if inside {
                let idx = ((my - border) * modules + (mx - border)) as usize;
                if colors[idx] == Color::Dark {
                    return Luma([DARK]);
                }
            }
            Luma([LIGHT])
        })
    }
}

/// Smallest normal symbol holding `data` as a single byte-mode segment
fn byte_mode_symbol(data: &[u8], level: qrcode::EcLevel) -> Result<QrCode, SymbolError> {
    for v in MIN_VERSION..=MAX_VERSION {
        let mut bits = Bits::new(Version::Normal(v));
        if bits.push_byte_data(data).is_err() || bits.push_terminator(level).is_err() {
            continue;
        }
        return QrCode::with_bits(bits, level);
    }

    Err(SymbolError::DataTooLong)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{image_side, modules_for_version, MAX_BYTE_CAPACITY};

    #[test]
    fn test_generate_png_signature() {
        let png = generate("https://example.com").unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_dimensions_follow_version() {
        let encoded = QrEncoder::new().encode("https://example.com").unwrap();

        assert_eq!(encoded.modules, modules_for_version(encoded.version));
        assert_eq!(encoded.width, image_side(encoded.version, BOX_SIZE, BORDER));
        assert_eq!(encoded.width, encoded.height);
    }

    #[test]
    fn test_short_payload_uses_version_one() {
        let encoded = QrEncoder::new().encode("HELLO-12345").unwrap();
        assert_eq!(encoded.version, 1);
        assert_eq!(encoded.width, 290);
    }

    #[test]
    fn test_empty_payload_is_valid_symbol() {
        let encoded = QrEncoder::new().encode("").unwrap();
        assert_eq!(encoded.version, 1);
        assert!(!encoded.png.is_empty());
    }

    #[test]
    fn test_capacity_exceeded() {
        let payload = "a".repeat(MAX_BYTE_CAPACITY + 1);
        let err = generate(&payload).unwrap_err();

        assert_eq!(
            err,
            QrError::CapacityExceeded {
                len: MAX_BYTE_CAPACITY + 1,
                max: MAX_BYTE_CAPACITY,
            }
        );
    }

    #[test]
    fn test_numeric_capacity_reports_numeric_limit() {
        let payload = "9".repeat(8000);
        let err = QrEncoder::new().ec_level(EcLevel::High).encode(&payload).unwrap_err();

        assert_eq!(err, QrError::CapacityExceeded { len: 8000, max: 3057 });
        assert!(err.to_string().contains("3057 for its character set"));
    }

    #[test]
    fn test_non_ascii_capacity_exceeded() {
        // 3 bytes per character in UTF-8
        let payload = "中".repeat(1000);
        let err = generate(&payload).unwrap_err();
        assert!(matches!(err, QrError::CapacityExceeded { len: 3000, .. }));
    }

    #[test]
    fn test_byte_mode_grows_version() {
        let small = byte_mode_symbol("é".as_bytes(), qrcode::EcLevel::L).unwrap();
        let large = byte_mode_symbol("é".repeat(200).as_bytes(), qrcode::EcLevel::L).unwrap();

        assert_eq!(small.version(), Version::Normal(1));
        assert!(large.width() > small.width());
    }

    #[test]
    fn test_custom_box_size_and_border() {
        let encoded = QrEncoder::new()
            .box_size(3)
            .border(2)
            .encode("HELLO-12345")
            .unwrap();

        assert_eq!(encoded.width, (21 + 4) * 3);
    }

    #[test]
    fn test_zero_box_size_rejected() {
        let err = QrEncoder::new().box_size(0).encode("x").unwrap_err();
        assert!(matches!(err, QrError::Render(_)));
    }

    #[test]
    fn test_oversized_image_rejected() {
        let err = QrEncoder::new().box_size(u32::MAX / 4).encode("x").unwrap_err();
        assert!(matches!(err, QrError::Render(_)));

        let err = QrEncoder::new().border(u32::MAX).encode("x").unwrap_err();
        assert!(matches!(err, QrError::Render(_)));

        // 29 modules * 600 px is past the side limit without overflowing
        let err = QrEncoder::new().box_size(600).encode("x").unwrap_err();
        assert!(matches!(err, QrError::Render(msg) if msg.contains("exceeds")));
    }

    #[test]
    fn test_with_config_matches_builder() {
        let config = EncoderConfig {
            box_size: 4,
            border: 1,
            ec_level: EcLevel::Medium,
        };
        let encoder = QrEncoder::with_config(config);
        assert_eq!(encoder.config(), &config);

        let built = QrEncoder::new().box_size(4).border(1).ec_level(EcLevel::Medium);
        assert_eq!(built.config(), encoder.config());

        let encoded = encoder.encode("HELLO-12345").unwrap();
        assert_eq!(encoded.width, (21 + 2) * 4);
    }

    #[test]
    fn test_higher_ec_level_needs_larger_symbol() {
        let payload = "https://example.com/some/longer/path?with=query";
        let low = QrEncoder::new().encode(payload).unwrap();
        let high = QrEncoder::new()
            .ec_level(EcLevel::High)
            .encode(payload)
            .unwrap();

        assert!(high.version > low.version);
    }

    #[test]
    fn test_preview_has_quiet_zone_rows() {
        let preview = render_preview("HELLO-12345").unwrap();
        // 21 modules + 8 quiet-zone modules, two rows per line
        assert_eq!(preview.lines().count(), 15);
    }
}
