//! QR image decoding
//!
//! Images are loaded with the `image` crate and scanned once by the `rqrr`
//! detector. Finding nothing is a normal outcome, not an error.

use crate::constants::LIGHT;
use crate::error::QrError;
use crate::types::{DecodeReport, DecodeRequest, DecodedResult, ImageInfo, ImageKind, Miss};
use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, Luma};
#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Decode the text held by a PNG or JPEG image
///
/// Returns the "No QR code detected" sentinel when the image is valid but
/// holds no readable symbol. Only unreadable image data is an error.
pub fn decode(image_bytes: &[u8]) -> Result<String, QrError> {
    decode_image(image_bytes).map(|report| report.result.into_text())
}

/// Decode a request into the full report
pub fn decode_request(request: &DecodeRequest) -> Result<DecodeReport, QrError> {
    decode_image(&request.image)
}

/// Load an image and run a single detection pass over it
pub fn decode_image(image_bytes: &[u8]) -> Result<DecodeReport, QrError> {
    let (info, image) = load_image(image_bytes)?;
    let result = detect(&to_luma(&image));

    Ok(DecodeReport {
        image: info,
        result,
    })
}

/// Parse PNG or JPEG bytes into a pixel grid
///
/// The container is identified from its magic bytes; other formats are
/// rejected before any pixel decoding happens.
pub fn load_image(image_bytes: &[u8]) -> Result<(ImageInfo, DynamicImage), QrError> {
    let format = image::guess_format(image_bytes)
        .map_err(|_| QrError::InvalidImage("unrecognized image data".into()))?;

    let kind = match format {
        ImageFormat::Png => ImageKind::Png,
        ImageFormat::Jpeg => ImageKind::Jpeg,
        other => {
            return Err(QrError::InvalidImage(format!(
                "unsupported image format: {:?}",
                other
            )))
        }
    };

    let image = image::load_from_memory_with_format(image_bytes, format)
        .map_err(|e| QrError::InvalidImage(e.to_string()))?;
    let (width, height) = image.dimensions();

    #[cfg(feature = "logging")]
    debug!("Loaded {} image {}x{} ({:?})", kind, width, height, image.color());

    Ok((
        ImageInfo {
            format: kind,
            width,
            height,
        },
        image,
    ))
}

/// Run one detection-and-decode pass over a luma grid
///
/// At most one payload is returned: the first located symbol that decodes.
pub fn detect(luma: &GrayImage) -> DecodedResult {
    let (width, height) = luma.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            luma.get_pixel(x as u32, y as u32)[0]
        });

    let grids = prepared.detect_grids();

    #[cfg(feature = "logging")]
    debug!("Detector located {} candidate symbol(s)", grids.len());

    if grids.is_empty() {
        return DecodedResult::NotDetected(Miss::NoSymbol);
    }

    let mut last_failure = String::new();
    for grid in grids {
        match grid.decode() {
            Ok((_meta, content)) => return DecodedResult::Text(content),
            Err(e) => {
                #[cfg(feature = "logging")]
                warn!("Located symbol could not be decoded: {}", e);
                last_failure = e.to_string();
            }
        }
    }

    DecodedResult::NotDetected(Miss::Unreadable(last_failure))
}

/// Convert to 8-bit luma, flattening any alpha channel onto white
fn to_luma(image: &DynamicImage) -> GrayImage {
    if !image.color().has_alpha() {
        return image.to_luma8();
    }

    let rgba = image.to_rgba8();
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
        let alpha = u32::from(a);
        let blended = (luma * alpha + u32::from(LIGHT) * (255 - alpha)) / 255;
        Luma([blended as u8])
    })
}
