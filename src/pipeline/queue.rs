/// Sequential per-style generation
///
/// `TransformQueue::generate` validates a request up front and returns a
/// lazy `Generation`. Each call to `next_event` runs exactly one style
/// transform, so styles run strictly in selection order and never
/// overlap. A failed style is recorded and skipped; it never stops the
/// styles queued after it.
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use futures_util::stream::{self, Stream};

use super::transform::StyleTransform;
use crate::error::{GalleryError, Result};
use crate::state::data::{Artwork, SourceImage};
use crate::state::gallery::GalleryState;
use crate::state::style::{SelectionSet, StyleCatalog, StyleId, StyleInfo};

pub const DEFAULT_ARTIST: &str = "AI";

/// Cancellation token type for generation runs.
pub type CancellationToken = Arc<AtomicBool>;

pub fn cancellation_token() -> CancellationToken {
    Arc::new(AtomicBool::new(false))
}

/// Checks if the cancellation token has been triggered.
#[inline]
pub fn is_cancelled(token: &CancellationToken) -> bool {
    token.load(Ordering::SeqCst)
}

pub fn cancel(token: &CancellationToken) {
    token.store(true, Ordering::SeqCst);
}

/// Outcome of one queue step
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// The style finished and produced an artwork
    Completed(Artwork),
    /// The style failed and was skipped
    Failed { style: StyleId, reason: String },
    /// No styles remain; always the last event of a stream
    Finished(GenerationReport),
}

/// Summary of a finished (or cancelled) generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Styles in the request
    pub requested: usize,
    /// Styles whose transform was started
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<(StyleId, String)>,
    pub cancelled: bool,
}

impl GenerationReport {
    /// True when styles were attempted and none produced an artwork
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cancelled {
            write!(f, "cancelled after {}/{} styles", self.succeeded, self.requested)
        } else {
            write!(f, "completed {}/{} styles", self.succeeded, self.requested)
        }
    }
}

/// Drives the style transform over a source image, one style at a time
#[derive(Debug)]
pub struct TransformQueue<T> {
    catalog: StyleCatalog,
    transform: Arc<T>,
    artist: String,
}

impl<T: StyleTransform> TransformQueue<T> {
    pub fn new(catalog: StyleCatalog, transform: T) -> Self {
        Self {
            catalog,
            transform: Arc::new(transform),
            artist: DEFAULT_ARTIST.to_string(),
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    /// Start a generation for `selection`
    ///
    /// Fails with `EmptySelection` or `UnknownStyle` before any transform
    /// is invoked. Independent generations may run concurrently.
    pub fn generate(
        &self,
        source: SourceImage,
        selection: &SelectionSet,
        cancel: CancellationToken,
    ) -> Result<Generation<T>> {
        if selection.is_empty() {
            return Err(GalleryError::EmptySelection);
        }

        let pending = selection
            .iter()
            .map(|id| self.catalog.describe(id).cloned())
            .collect::<Result<VecDeque<_>>>()?;

        tracing::info!(
            "Generating {} style(s): {}",
            pending.len(),
            selection.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
        );

        Ok(Generation {
            transform: Arc::clone(&self.transform),
            artist: self.artist.clone(),
            source,
            report: GenerationReport {
                requested: pending.len(),
                ..GenerationReport::default()
            },
            pending,
            cancel,
        })
    }

    /// Run a whole generation, appending each artwork to `gallery` as it
    /// completes
    pub async fn run_into(
        &self,
        source: SourceImage,
        selection: &SelectionSet,
        cancel: CancellationToken,
        gallery: &mut GalleryState,
    ) -> Result<GenerationReport> {
        let mut generation = self.generate(source, selection, cancel)?;
        while let Some(artwork) = generation.next_artwork().await {
            gallery.append(artwork);
        }
        Ok(generation.into_report())
    }
}

/// A validated, lazily evaluated generation request
pub struct Generation<T> {
    transform: Arc<T>,
    artist: String,
    source: SourceImage,
    pending: VecDeque<StyleInfo>,
    cancel: CancellationToken,
    report: GenerationReport,
}

impl<T: StyleTransform> Generation<T> {
    /// Run the next queued style
    ///
    /// Returns `None` once every style was attempted or cancellation was
    /// observed. A result that arrives after cancellation is discarded.
    pub async fn next_event(&mut self) -> Option<GenerationEvent> {
        if self.pending.is_empty() {
            return None;
        }
        if is_cancelled(&self.cancel) {
            self.stop_cancelled();
            return None;
        }

        let style = self.pending.pop_front()?;
        self.report.attempted += 1;
        tracing::debug!(
            "Style {}/{}: {}",
            self.report.attempted,
            self.report.requested,
            style.name
        );

        let result = self
            .transform
            .transform(&self.source, style.id, &style.params)
            .await;

        if is_cancelled(&self.cancel) {
            self.stop_cancelled();
            return None;
        }

        match result {
            Ok(image) => {
                self.report.succeeded += 1;
                Some(GenerationEvent::Completed(Artwork {
                    image,
                    title: format!("{} Style", style.name),
                    artist: self.artist.clone(),
                    style: style.id,
                    created_at: Utc::now(),
                }))
            }
            Err(e) => {
                tracing::warn!("{} transform failed, skipping: {}", style.name, e);
                let reason = e.to_string();
                self.report.failures.push((style.id, reason.clone()));
                Some(GenerationEvent::Failed {
                    style: style.id,
                    reason,
                })
            }
        }
    }

    /// Run styles until one produces an artwork
    pub async fn next_artwork(&mut self) -> Option<Artwork> {
        while let Some(event) = self.next_event().await {
            if let GenerationEvent::Completed(artwork) = event {
                return Some(artwork);
            }
        }
        None
    }

    /// Styles not yet started
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn into_report(self) -> GenerationReport {
        tracing::info!("Generation {}", self.report);
        self.report
    }

    fn stop_cancelled(&mut self) {
        if !self.report.cancelled {
            tracing::warn!(
                "Generation cancelled with {} style(s) not started",
                self.pending.len()
            );
        }
        self.report.cancelled = true;
        self.pending.clear();
    }
}

impl<T: StyleTransform + 'static> Generation<T> {
    /// Adapt into a stream of events ending with `Finished`
    pub fn into_stream(self) -> impl Stream<Item = GenerationEvent> + Send + 'static {
        stream::unfold(Some(self), |state| async move {
            let mut generation = state?;
            match generation.next_event().await {
                Some(event) => Some((event, Some(generation))),
                None => Some((GenerationEvent::Finished(generation.into_report()), None)),
            }
        })
    }
}
