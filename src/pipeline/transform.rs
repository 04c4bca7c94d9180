/// Style-transform capability
///
/// The pipeline treats a transform as an opaque, possibly slow, possibly
/// failing function from (image, params) to image. `FilterTransform` is the
/// built-in implementation: CSS-like colour filters applied with the
/// `image` crate on a blocking worker.
use std::future::Future;
use std::io::Cursor;
use std::time::Duration;

use image::{DynamicImage, ImageFormat};

use crate::color::ColorFilter;
use crate::error::TransformError;
use crate::state::data::{ImageData, SourceImage};
use crate::state::style::{StyleId, TransformParams};

pub trait StyleTransform: Send + Sync {
    /// Produce a new image from `source` using `params`
    ///
    /// `style` identifies the request; implementations may ignore it.
    fn transform(
        &self,
        source: &SourceImage,
        style: StyleId,
        params: &TransformParams,
    ) -> impl Future<Output = Result<ImageData, TransformError>> + Send;
}

/// Colour-filter stand-in for an AI style transfer
#[derive(Debug, Clone, Default)]
pub struct FilterTransform {
    /// Delay before each transform, to mimic a remote model
    latency: Duration,
}

impl FilterTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl StyleTransform for FilterTransform {
    fn transform(
        &self,
        source: &SourceImage,
        style: StyleId,
        params: &TransformParams,
    ) -> impl Future<Output = Result<ImageData, TransformError>> + Send {
        let source = source.clone();
        let params = *params;
        let latency = self.latency;

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            // Spawn blocking because decoding and filtering are CPU-bound
            tokio::task::spawn_blocking(move || {
                tracing::debug!("Applying {} filter", style);
                apply_filter_blocking(&source, &params)
            })
            .await
            .map_err(|e| TransformError::Worker(e.to_string()))?
        }
    }
}

/// Blocking implementation of the filter transform
fn apply_filter_blocking(
    source: &SourceImage,
    params: &TransformParams,
) -> Result<ImageData, TransformError> {
    let img = source.decode()?;
    let filtered = apply_filter(img, params);

    // Output is always PNG, like a canvas export
    let mut out = Cursor::new(Vec::new());
    filtered
        .write_to(&mut out, ImageFormat::Png)
        .map_err(TransformError::Encode)?;

    Ok(ImageData::from_bytes(out.into_inner())?)
}

/// Blur first, then the per-pixel colour pipeline
pub fn apply_filter(img: DynamicImage, params: &TransformParams) -> DynamicImage {
    let mut rgba = if params.blur > 0.0 {
        image::imageops::blur(&img.to_rgba8(), params.blur)
    } else {
        img.into_rgba8()
    };

    let filter = ColorFilter::new(params);
    if !filter.is_identity() {
        for pixel in rgba.pixels_mut() {
            pixel.0 = filter.apply(pixel.0);
        }
    }

    DynamicImage::ImageRgba8(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::{png_bytes, source};
    use crate::state::data::ImageEncoding;
    use crate::state::style::StyleCatalog;

    #[tokio::test]
    async fn test_filter_transform_produces_png_of_same_size() {
        let catalog = StyleCatalog::builtin();
        let source = SourceImage::from_bytes(png_bytes(5, 3)).unwrap();

        for style in catalog.iter() {
            let output = FilterTransform::new()
                .transform(&source, style.id, &style.params)
                .await
                .unwrap();

            assert_eq!(output.encoding(), ImageEncoding::Raw);
            assert_eq!(output.mime_type().unwrap(), "image/png");
            let decoded = output.decode().unwrap();
            assert_eq!((decoded.width(), decoded.height()), (5, 3));
            assert_ne!(output, source, "{} left the image untouched", style.id);
        }
    }

    #[tokio::test]
    async fn test_filter_transform_accepts_data_uri_source() {
        let uri = source().to_data_uri().unwrap();
        let source = SourceImage::from_data_uri(&uri).unwrap();
        let params = StyleCatalog::builtin().describe(StyleId::Anime).unwrap().params;

        let output = FilterTransform::new()
            .transform(&source, StyleId::Anime, &params)
            .await
            .unwrap();
        assert_eq!(output.decode().unwrap().width(), 4);
    }

    #[tokio::test]
    async fn test_corrupt_source_fails() {
        // PNG signature intact, body cut off
        let truncated = png_bytes(4, 4)[..24].to_vec();
        let source = SourceImage::from_bytes(truncated).unwrap();
        let result = FilterTransform::new()
            .transform(&source, StyleId::Monet, &TransformParams::default())
            .await;
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_identity_filter_keeps_pixels() {
        let img = SourceImage::from_bytes(png_bytes(3, 3)).unwrap().decode().unwrap();
        let expected = img.to_rgba8();
        let output = apply_filter(img, &TransformParams::default());
        assert_eq!(output.to_rgba8(), expected);
    }
}
