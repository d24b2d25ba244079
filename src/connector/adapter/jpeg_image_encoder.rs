use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;

use crate::domain::{CompletionError, ImageBlob};

/// Matches a 0.5 compression quality on a 0..1 scale.
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Re-encodes attached images as JPEG and wraps them in `data:` URIs.
///
/// Input may be any format the `image` crate can decode. Transparency is
/// dropped since JPEG has no alpha channel.
#[derive(Debug, Clone)]
pub struct JpegImageEncoder {
    quality: u8,
}

impl JpegImageEncoder {
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn to_jpeg(&self, image: &ImageBlob) -> Result<Vec<u8>, CompletionError> {
        let decoded = image::load_from_memory(image.bytes()).map_err(|e| {
            CompletionError::RequestEncodingFailed(format!("could not decode image: {e}"))
        })?;
        let rgb = decoded.to_rgb8();

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality)
            .encode_image(&rgb)
            .map_err(|e| {
                CompletionError::RequestEncodingFailed(format!("JPEG encoding failed: {e}"))
            })?;
        Ok(bytes)
    }

    pub fn to_data_uri(&self, image: &ImageBlob) -> Result<String, CompletionError> {
        Ok(jpeg_data_uri(&self.to_jpeg(image)?))
    }
}

impl Default for JpegImageEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// `data:image/jpeg;base64,<payload>` for already-encoded JPEG bytes.
pub fn jpeg_data_uri(jpeg: &[u8]) -> String {
    format!("{JPEG_DATA_URI_PREFIX}{}", BASE64.encode(jpeg))
}

/// Inverse of [`jpeg_data_uri`]; `None` for anything that is not a base64 JPEG data URI.
pub fn decode_jpeg_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri.strip_prefix(JPEG_DATA_URI_PREFIX)?;
    BASE64.decode(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_blob(width: u32, height: u32) -> ImageBlob {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, 128, 200])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        ImageBlob::new(bytes)
    }

    #[test]
    fn test_png_is_reencoded_as_jpeg() {
        let encoder = JpegImageEncoder::new();
        let jpeg = encoder.to_jpeg(&png_blob(12, 9)).unwrap();

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 9));
    }

    #[test]
    fn test_data_uri_round_trip() {
        let encoder = JpegImageEncoder::new();
        let blob = png_blob(8, 8);

        let jpeg = encoder.to_jpeg(&blob).unwrap();
        let uri = encoder.to_data_uri(&blob).unwrap();

        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(decode_jpeg_data_uri(&uri).unwrap(), jpeg);
    }

    #[test]
    fn test_undecodable_blob_is_an_encoding_failure() {
        let err = JpegImageEncoder::new()
            .to_jpeg(&ImageBlob::new(b"definitely not an image".to_vec()))
            .unwrap_err();
        assert!(matches!(err, CompletionError::RequestEncodingFailed(_)));
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(JpegImageEncoder::with_quality(0).quality(), 1);
        assert_eq!(JpegImageEncoder::with_quality(250).quality(), 100);
        assert_eq!(JpegImageEncoder::default().quality(), DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn test_decode_rejects_other_mime_types() {
        assert!(decode_jpeg_data_uri("data:image/png;base64,AAAA").is_none());
    }
}
