//! QR code encoder

use crate::error::GenerationError;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::path::Path;

/// Pixels per QR module edge
const MODULE_PIXELS: u32 = 10;

/// QR code encoder
pub struct QrEncoder {
    /// Error correction level
    ecc_level: EcLevel,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC)
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::M,
        }
    }

    /// Encode text into a black-on-white grayscale image.
    ///
    /// The smallest QR version that fits the data at the encoder's ECC level is used.
    pub fn encode(&self, text: &str) -> Result<GrayImage, GenerationError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), self.ecc_level)?;

        tracing::debug!(
            version = ?code.version(),
            width = code.width(),
            ecc_level = ?self.ecc_level,
            "Encoded QR symbol"
        );

        Ok(code
            .render::<Luma<u8>>()
            .dark_color(Luma([0]))
            .light_color(Luma([255]))
            .quiet_zone(true)
            .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
            .build())
    }

    /// Encode text and write it as an RGB PNG to `path`.
    pub fn save_png(&self, text: &str, path: &Path) -> Result<(), GenerationError> {
        let image = self.encode(text)?;
        image::DynamicImage::ImageLuma8(image)
            .to_rgb8()
            .save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_string() {
        let encoder = QrEncoder::new();
        let image = encoder.encode("Hello, QR!").unwrap();
        assert_eq!(image.width(), image.height());
        assert_eq!(image.width() % MODULE_PIXELS, 0);
        // Quiet zone corner is white, finder pattern corner is black
        assert_eq!(image.get_pixel(0, 0), &Luma([255]));
        assert_eq!(image.get_pixel(4 * MODULE_PIXELS, 4 * MODULE_PIXELS), &Luma([0]));
    }

    #[test]
    fn test_longer_text_grows_symbol() {
        let encoder = QrEncoder::new();
        let short = encoder.encode("hi").unwrap();
        let long = encoder.encode(&"x".repeat(300)).unwrap();
        assert!(long.width() > short.width());
    }

    #[test]
    fn test_oversized_input_is_encode_error() {
        let encoder = QrEncoder::new();
        let result = encoder.encode(&"z".repeat(5000));
        assert!(matches!(result, Err(GenerationError::Encode(_))));
    }

    #[test]
    fn test_round_trip() {
        use crate::qr::QrDecoder;

        let encoder = QrEncoder::new();
        let decoder = QrDecoder::new();

        let original = "Test payload for round trip";
        let qr_image = encoder.encode(original).unwrap();
        let decoded = decoder.decode_gray(&qr_image).unwrap();

        assert_eq!(decoded.as_str(), Some(original));
    }
}
