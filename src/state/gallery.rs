use std::sync::Arc;

use super::data::Artwork;

/// The gallery holds every artwork generated in this session, in the
/// order the pipeline completed them.
///
/// Append-only: artworks are never removed, reordered or deduplicated.
/// The gallery has a single writer; concurrent generations hand their
/// results to that writer instead of sharing the gallery.
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    artworks: Vec<Artwork>,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artwork at the end of the collection
    pub fn append(&mut self, artwork: Artwork) {
        tracing::debug!(
            "Appending '{}' ({}) as artwork #{}",
            artwork.title,
            artwork.style,
            self.artworks.len() + 1
        );
        self.artworks.push(artwork);
    }

    /// Point-in-time view of the collection
    ///
    /// The returned slice is detached from later appends.
    pub fn snapshot(&self) -> Arc<[Artwork]> {
        self.artworks.as_slice().into()
    }

    /// Borrow the current collection
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    /// Most recently appended artwork
    pub fn latest(&self) -> Option<&Artwork> {
        self.artworks.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::artwork;
    use crate::state::style::StyleId;

    #[test]
    fn test_new_gallery_is_empty() {
        let gallery = GalleryState::new();
        assert!(gallery.is_empty());
        assert_eq!(gallery.len(), 0);
        assert!(gallery.snapshot().is_empty());
        assert!(gallery.latest().is_none());
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut gallery = GalleryState::new();
        let first = artwork(StyleId::Monet, "Monet Style");
        gallery.append(first.clone());
        gallery.append(artwork(StyleId::Dali, "Dalí Style"));
        gallery.append(first.clone());

        let titles: Vec<_> = gallery.artworks().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Monet Style", "Dalí Style", "Monet Style"]);
        assert_eq!(gallery.latest(), Some(&first));
    }

    #[test]
    fn test_snapshot_is_detached_from_later_appends() {
        let mut gallery = GalleryState::new();
        gallery.append(artwork(StyleId::VanGogh, "Van Gogh Style"));

        let before = gallery.snapshot();

        gallery.append(artwork(StyleId::Anime, "Anime Style"));
        let after = gallery.snapshot();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(before[0], after[0]);
    }
}
