//! Neural Gallery core: turn one uploaded image into a set of styled
//! artworks and place them on the walls of a 3D gallery.
//!
//! Flow: a `SelectionSet` of styles goes through the `TransformQueue`
//! (parameters from the `StyleCatalog`), each finished artwork is appended
//! to the `GalleryState`, and the `SceneComposer` maps the gallery snapshot
//! onto `SlotLayout` positions for the render layer.

pub mod color;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scene;
pub mod state;

pub use config::GalleryConfig;
pub use error::{GalleryError, TransformError};
pub use pipeline::{
    CancellationToken, FilterTransform, Generation, GenerationEvent, GenerationReport,
    StyleTransform, TransformQueue,
};
pub use scene::{EntryContent, PositionedEntry, SceneComposer, Slot, SlotLayout};
pub use state::data::{Artwork, ImageData, ImageEncoding, SourceImage};
pub use state::gallery::GalleryState;
pub use state::style::{SelectionSet, StyleCatalog, StyleId, StyleInfo, TransformParams};
