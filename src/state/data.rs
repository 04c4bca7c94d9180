/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the intake, the generation pipeline and the scene.
use std::path::Path;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use image::DynamicImage;

use super::style::StyleId;
use crate::error::{GalleryError, Result, TransformError};

/// How the bytes of an `ImageData` are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// An encoded image file (PNG, JPEG, ...)
    Raw,
    /// The UTF-8 text of a `data:image/...;base64,` URI
    DataUri,
}

/// Immutable image content plus its encoding tag
///
/// Cloning is cheap: the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    bytes: Arc<[u8]>,
    encoding: ImageEncoding,
}

/// The image a generation request starts from
pub type SourceImage = ImageData;

const DATA_URI_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

impl ImageData {
    /// Wrap an encoded image file, rejecting anything that is not an image
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        image::guess_format(&bytes).map_err(|_| GalleryError::NotAnImage)?;

        Ok(Self {
            bytes: bytes.into(),
            encoding: ImageEncoding::Raw,
        })
    }

    /// Wrap a `data:image/<type>;base64,<payload>` URI
    ///
    /// The payload must decode to a recognisable image file.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        if !uri.starts_with(DATA_URI_PREFIX) {
            return Err(GalleryError::InvalidDataUri(
                "expected a data:image/ URI".to_string(),
            ));
        }
        if !uri.contains(BASE64_MARKER) {
            return Err(GalleryError::InvalidDataUri(
                "only base64 payloads are supported".to_string(),
            ));
        }

        let data = Self {
            bytes: uri.as_bytes().into(),
            encoding: ImageEncoding::DataUri,
        };
        image::guess_format(&data.payload()?).map_err(|_| GalleryError::NotAnImage)?;

        Ok(data)
    }

    /// Read an image file from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        Self::from_bytes(bytes)
    }

    pub fn encoding(&self) -> ImageEncoding {
        self.encoding
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded image bytes, unpacking the payload of a data URI
    pub fn payload(&self) -> Result<Vec<u8>> {
        match self.encoding {
            ImageEncoding::Raw => Ok(self.bytes.to_vec()),
            ImageEncoding::DataUri => {
                let text = std::str::from_utf8(&self.bytes)
                    .map_err(|e| GalleryError::InvalidDataUri(e.to_string()))?;
                let (_, payload) = text.split_once(BASE64_MARKER).ok_or_else(|| {
                    GalleryError::InvalidDataUri("missing base64 payload".to_string())
                })?;
                STANDARD
                    .decode(payload.trim())
                    .map_err(|e| GalleryError::InvalidDataUri(e.to_string()))
            }
        }
    }

    /// MIME type of the image, e.g. `image/png`
    pub fn mime_type(&self) -> Result<String> {
        match self.encoding {
            ImageEncoding::Raw => image::guess_format(&self.bytes)
                .map(|format| format.to_mime_type().to_string())
                .map_err(|_| GalleryError::NotAnImage),
            ImageEncoding::DataUri => {
                let text = String::from_utf8_lossy(&self.bytes);
                text.strip_prefix("data:")
                    .and_then(|rest| rest.split_once(';'))
                    .map(|(mime, _)| mime.to_string())
                    .ok_or_else(|| GalleryError::InvalidDataUri("missing MIME type".to_string()))
            }
        }
    }

    /// Decode into pixels
    pub fn decode(&self) -> std::result::Result<DynamicImage, TransformError> {
        let payload = self.payload()?;
        image::load_from_memory(&payload).map_err(TransformError::Decode)
    }

    /// Render as a `data:` URI, suitable for a texture source
    pub fn to_data_uri(&self) -> Result<String> {
        match self.encoding {
            ImageEncoding::DataUri => Ok(String::from_utf8_lossy(&self.bytes).into_owned()),
            ImageEncoding::Raw => Ok(format!(
                "data:{}{}{}",
                self.mime_type()?,
                BASE64_MARKER,
                STANDARD.encode(&self.bytes)
            )),
        }
    }
}

/// A generated artwork, created once per completed style transform
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    pub image: ImageData,
    pub title: String,
    pub artist: String,
    pub style: StyleId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// A small PNG with a horizontal gradient
    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            let v = (x * 255 / width.max(1)) as u8;
            Rgba([v, 128, 255 - v, 255])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    pub fn source() -> SourceImage {
        SourceImage::from_bytes(png_bytes(4, 4)).unwrap()
    }

    pub fn artwork(style: StyleId, title: &str) -> Artwork {
        Artwork {
            image: source(),
            title: title.to_string(),
            artist: "AI".to_string(),
            style,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::png_bytes;
    use super::*;

    #[test]
    fn test_rejects_non_image_bytes() {
        let result = ImageData::from_bytes(b"definitely not an image".to_vec());
        assert!(matches!(result, Err(GalleryError::NotAnImage)));
    }

    #[test]
    fn test_data_uri_round_trip() {
        let png = ImageData::from_bytes(png_bytes(3, 2)).unwrap();
        let uri = png.to_data_uri().unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        let from_uri = ImageData::from_data_uri(&uri).unwrap();
        assert_eq!(from_uri.encoding(), ImageEncoding::DataUri);
        assert_eq!(from_uri.mime_type().unwrap(), "image/png");
        assert_eq!(from_uri.payload().unwrap(), png.as_bytes());

        let decoded = from_uri.decode().unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn test_rejects_non_image_data_uri() {
        assert!(matches!(
            ImageData::from_data_uri("data:text/plain;base64,aGVsbG8="),
            Err(GalleryError::InvalidDataUri(_))
        ));
        assert!(matches!(
            ImageData::from_data_uri("data:image/png,rawtext"),
            Err(GalleryError::InvalidDataUri(_))
        ));
    }

    #[test]
    fn test_rejects_data_uri_without_image_payload() {
        // "hello" under an image MIME type
        assert!(matches!(
            ImageData::from_data_uri("data:image/png;base64,aGVsbG8="),
            Err(GalleryError::NotAnImage)
        ));
        assert!(matches!(
            ImageData::from_data_uri("data:image/png;base64,not*base64"),
            Err(GalleryError::InvalidDataUri(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.png");
        std::fs::write(&path, png_bytes(2, 2)).unwrap();

        let image = ImageData::load(&path).await.unwrap();
        assert_eq!(image.encoding(), ImageEncoding::Raw);

        let missing = ImageData::load(dir.path().join("missing.png")).await;
        assert!(matches!(missing, Err(GalleryError::Io(_))));
    }
}
