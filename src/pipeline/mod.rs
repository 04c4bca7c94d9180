/// Style generation pipeline
///
/// Architecture:
/// - `transform.rs` - the style-transform capability and the built-in filter transform
/// - `queue.rs` - sequential, cancellable per-style generation

pub mod queue;
pub mod transform;

pub use queue::{
    cancel, cancellation_token, is_cancelled, CancellationToken, Generation, GenerationEvent,
    GenerationReport, TransformQueue,
};
pub use transform::{FilterTransform, StyleTransform};
