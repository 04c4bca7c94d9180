/// Error types for the gallery core
///
/// `GalleryError` covers everything that stops a request before any
/// transform runs. `TransformError` is scoped to a single style and never
/// aborts a generation.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// The style id is not registered in the catalog
    #[error("unknown style: {0}")]
    UnknownStyle(String),

    /// `generate` was called with no styles selected
    #[error("no styles selected")]
    EmptySelection,

    /// The uploaded bytes are not a recognised image format
    #[error("please upload an image file")]
    NotAnImage,

    #[error("invalid image data URI: {0}")]
    InvalidDataUri(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Failure of one style transform
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode artwork: {0}")]
    Encode(#[source] image::ImageError),

    /// The blocking worker panicked or was cancelled by the runtime
    #[error("transform worker failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Source(#[from] GalleryError),

    #[error("{0}")]
    Failed(String),
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
