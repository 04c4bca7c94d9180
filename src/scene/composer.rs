/// Positioned scene entries for the render layer
///
/// The composer is a pure projection of a gallery snapshot onto the slot
/// layout. It keeps no state of its own, so the scene cannot drift from
/// the gallery: recompose whenever the snapshot changes.
use super::layout::{Slot, SlotLayout};
use crate::state::data::Artwork;

pub const DEFAULT_PLACEHOLDER_MESSAGE: &str = "Upload your first artwork";

/// Prompt shown when the gallery has nothing to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPlaceholder {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryContent {
    Artwork(Artwork),
    Placeholder(EmptyPlaceholder),
}

/// One renderable item: what to show and where
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEntry {
    pub content: EntryContent,
    pub slot: Slot,
}

impl PositionedEntry {
    /// Label drawn under the frame
    pub fn label(&self) -> &str {
        match &self.content {
            EntryContent::Artwork(artwork) => &artwork.title,
            EntryContent::Placeholder(placeholder) => &placeholder.message,
        }
    }

    pub fn artwork(&self) -> Option<&Artwork> {
        match &self.content {
            EntryContent::Artwork(artwork) => Some(artwork),
            EntryContent::Placeholder(_) => None,
        }
    }

    /// Encoded image file to draw in the frame; `None` for the placeholder
    pub fn image_bytes(&self) -> Option<Vec<u8>> {
        let artwork = self.artwork()?;
        match artwork.image.payload() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("Cannot display {}: {}", artwork.title, e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneComposer {
    layout: SlotLayout,
    placeholder_message: String,
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new(SlotLayout::default())
    }
}

impl SceneComposer {
    pub fn new(layout: SlotLayout) -> Self {
        Self {
            layout,
            placeholder_message: DEFAULT_PLACEHOLDER_MESSAGE.to_string(),
        }
    }

    pub fn with_placeholder_message(mut self, message: impl Into<String>) -> Self {
        self.placeholder_message = message.into();
        self
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Place each artwork at the slot for its index
    ///
    /// An empty collection yields exactly one placeholder entry.
    pub fn compose(&self, collection: &[Artwork]) -> Vec<PositionedEntry> {
        if collection.is_empty() {
            return vec![PositionedEntry {
                content: EntryContent::Placeholder(EmptyPlaceholder {
                    message: self.placeholder_message.clone(),
                }),
                slot: self.layout.placeholder_slot(),
            }];
        }

        collection
            .iter()
            .enumerate()
            .map(|(i, artwork)| PositionedEntry {
                content: EntryContent::Artwork(artwork.clone()),
                slot: self.layout.slot_for(i),
            })
            .collect()
    }
}
