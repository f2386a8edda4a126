use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Error, Debug)]
pub enum ImageDataError {
    #[error("content is not a recognised image format")]
    NotAnImage,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A photo held as a `data:<mime>;base64,<payload>` URL. Clones share the
/// underlying string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageData(Arc<str>);

impl ImageData {
    /// Encodes raw image bytes, sniffing the MIME type from the content.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageDataError> {
        let format = image::guess_format(bytes).map_err(|_| ImageDataError::NotAnImage)?;
        Ok(Self(format!(
            "{}{}{}{}",
            DATA_URL_PREFIX,
            format.to_mime_type(),
            BASE64_MARKER,
            STANDARD.encode(bytes)
        )
        .into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when both handles point at the same allocation.
    pub fn same_as(&self, other: &ImageData) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn mime(&self) -> &str {
        self.0[DATA_URL_PREFIX.len()..]
            .split_once(BASE64_MARKER)
            .map(|(mime, _)| mime)
            .unwrap_or_default()
    }

    fn payload(&self) -> &str {
        self.0
            .split_once(BASE64_MARKER)
            .map(|(_, payload)| payload)
            .unwrap_or_default()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ImageDataError> {
        Ok(STANDARD.decode(self.payload())?)
    }

    pub fn decode_rgba(&self) -> Result<image::RgbaImage, ImageDataError> {
        let bytes = self.to_bytes()?;
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageData({}, {} chars)", self.mime(), self.0.len())
    }
}

#[cfg(test)]
pub(crate) fn sample_png() -> Vec<u8> {
    let image = image::RgbImage::from_pixel(4, 3, image::Rgb([200, 120, 40]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_sniffs_mime() {
        let image = ImageData::from_bytes(&sample_png()).unwrap();
        assert_eq!(image.mime(), "image/png");
        assert!(image.as_str().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        let result = ImageData::from_bytes(b"just some text, not a picture");
        assert!(matches!(result, Err(ImageDataError::NotAnImage)));
    }

    #[test]
    fn test_bytes_survive_the_data_url() {
        let bytes = sample_png();
        let image = ImageData::from_bytes(&bytes).unwrap();
        assert_eq!(image.to_bytes().unwrap(), bytes);

        let rgba = image.decode_rgba().unwrap();
        assert_eq!((rgba.width(), rgba.height()), (4, 3));
    }

    #[test]
    fn test_debug_does_not_dump_payload() {
        let image = ImageData::from_bytes(&sample_png()).unwrap();
        let debug = format!("{:?}", image);
        assert!(debug.starts_with("ImageData(image/png, "));
        assert!(!debug.contains("base64"));
    }
}
