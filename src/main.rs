use std::path::PathBuf;

use iced::widget::{button, canvas, column, container, image, row, scrollable, text, Column};
use iced::{event, window, Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing_subscriber::EnvFilter;

use neural_gallery::pipeline::{cancel, cancellation_token};
use neural_gallery::{
    CancellationToken, FilterTransform, GalleryConfig, GalleryState, GenerationEvent,
    PositionedEntry, SceneComposer, SelectionSet, SourceImage, StyleCatalog, StyleId,
    TransformQueue,
};

mod ui;

/// Main application state
struct NeuralGallery {
    queue: TransformQueue<FilterTransform>,
    /// Every artwork generated this session; only `update` writes to it
    gallery: GalleryState,
    composer: SceneComposer,
    /// Scene entries for the current gallery snapshot
    entries: Vec<PositionedEntry>,
    source: Option<SourceImage>,
    selection: SelectionSet,
    /// Set while a generation is running
    cancel: Option<CancellationToken>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Choose Image"
    PickImage,
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// Background file read finished
    ImageLoaded(Result<SourceImage, String>),
    /// User discarded the current image
    ClearImage,
    ToggleStyle(StyleId),
    Generate,
    Cancel,
    /// One step of the running generation
    Generation(GenerationEvent),
}

impl NeuralGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = GalleryConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring config: {}", e);
            GalleryConfig::default()
        });

        let queue = TransformQueue::new(
            StyleCatalog::builtin(),
            FilterTransform::with_latency(config.transform_latency()),
        )
        .with_artist(config.artist.clone());
        let composer = config.composer();
        let gallery = GalleryState::new();
        let entries = composer.compose(&gallery.snapshot());

        tracing::info!(
            "Neural Gallery initialized with {} styles and {} wall slots",
            queue.catalog().len(),
            composer.layout().len()
        );

        (
            NeuralGallery {
                queue,
                gallery,
                composer,
                entries,
                source: None,
                selection: SelectionSet::new(),
                cancel: None,
                status: "Upload an image to get started.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                let file = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp", "gif"])
                    .pick_file();

                match file {
                    Some(path) => self.load_image(path),
                    None => Task::none(),
                }
            }
            Message::FileDropped(path) => {
                if self.cancel.is_some() {
                    tracing::debug!("Ignoring drop of {} during generation", path.display());
                    self.status =
                        "Wait for the current generation to finish before uploading.".to_string();
                    return Task::none();
                }
                self.load_image(path)
            }
            Message::ImageLoaded(Ok(source)) => {
                self.source = Some(source);
                self.status =
                    "Image uploaded successfully! Choose a style to transform your image.".to_string();
                Task::none()
            }
            Message::ImageLoaded(Err(e)) => {
                tracing::warn!("Image upload failed: {}", e);
                self.status = format!("Upload failed: {}", e);
                Task::none()
            }
            Message::ClearImage => {
                self.source = None;
                self.status = "Upload an image to get started.".to_string();
                Task::none()
            }
            Message::ToggleStyle(id) => {
                self.selection.toggle(id);
                Task::none()
            }
            Message::Generate => {
                if self.cancel.is_some() {
                    return Task::none();
                }
                let Some(source) = self.source.clone() else {
                    self.status = "Upload an image first.".to_string();
                    return Task::none();
                };

                let token = cancellation_token();
                match self.queue.generate(source, &self.selection, token.clone()) {
                    Ok(generation) => {
                        self.cancel = Some(token);
                        self.status = format!("Generating {} artwork(s)...", self.selection.len());
                        Task::run(generation.into_stream(), Message::Generation)
                    }
                    Err(e) => {
                        self.status = e.to_string();
                        Task::none()
                    }
                }
            }
            Message::Cancel => {
                if let Some(token) = &self.cancel {
                    cancel(token);
                    self.status = "Cancelling...".to_string();
                }
                Task::none()
            }
            Message::Generation(event) => {
                self.on_generation_event(event);
                Task::none()
            }
        }
    }

    /// Read and validate an image file in the background
    fn load_image(&mut self, path: PathBuf) -> Task<Message> {
        self.status = format!("Processing {}...", path.display());
        Task::perform(
            async move { SourceImage::load(path).await.map_err(|e| e.to_string()) },
            Message::ImageLoaded,
        )
    }

    fn on_generation_event(&mut self, event: GenerationEvent) {
        match event {
            GenerationEvent::Completed(artwork) => {
                tracing::info!("Art generated: {}", artwork.title);
                self.status = format!(
                    "Art generated! {} has been added to the gallery.",
                    artwork.title
                );
                self.gallery.append(artwork);
                self.entries = self.composer.compose(&self.gallery.snapshot());
            }
            GenerationEvent::Failed { style, reason } => {
                self.status = format!("{} failed: {}", style, reason);
            }
            GenerationEvent::Finished(report) => {
                self.cancel = None;
                self.status = if report.all_failed() {
                    format!("No artworks were generated ({})", report)
                } else {
                    format!("Generation {}", report)
                };
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let generating = self.cancel.is_some();

        let intake = row![
            button("Choose Image").on_press(Message::PickImage).padding(10),
            button("Upload Different Image")
                .on_press_maybe(self.source.as_ref().map(|_| Message::ClearImage))
                .padding(10),
        ]
        .spacing(10);

        let preview: Element<Message> = match self.source.as_ref().and_then(|s| s.payload().ok()) {
            Some(bytes) => image(image::Handle::from_bytes(bytes))
                .height(Length::Fixed(160.0))
                .into(),
            None => text("No image selected").into(),
        };

        let styles = Column::with_children(self.queue.catalog().iter().map(|style| {
            let marker = if self.selection.contains(style.id) { "[x]" } else { "[ ]" };
            button(text(format!("{} {} - {}", marker, style.name, style.description)))
                .on_press(Message::ToggleStyle(style.id))
                .width(Length::Fill)
                .into()
        }))
        .spacing(6);

        let can_generate = !generating && self.source.is_some() && !self.selection.is_empty();
        let actions = row![
            button(if generating {
                text("Generating...")
            } else {
                text(format!("Generate Art ({})", self.selection.len()))
            })
            .on_press_maybe(can_generate.then_some(Message::Generate))
            .padding(10),
            button("Cancel")
                .on_press_maybe(generating.then_some(Message::Cancel))
                .padding(10),
        ]
        .spacing(10);

        let entries = Column::with_children(self.entries.iter().enumerate().map(|(i, entry)| {
            let p = entry.slot.position;
            let caption = text(format!(
                "#{} {} at ({:.0}, {:.0}, {:.0})",
                i + 1,
                entry.label(),
                p.x,
                p.y,
                p.z
            ))
            .size(14);

            match entry.image_bytes() {
                Some(bytes) => row![
                    image(image::Handle::from_bytes(bytes)).height(Length::Fixed(120.0)),
                    caption,
                ]
                .spacing(12)
                .align_y(Alignment::Center)
                .into(),
                None => caption.into(),
            }
        }))
        .spacing(8);

        let floor_plan = canvas(ui::floor_plan::FloorPlan::new(
            &self.entries,
            self.queue.catalog(),
        ))
        .width(Length::Fill)
        .height(Length::Fixed(220.0));

        let content: Column<Message> = column![
            text("Neural Art Gallery").size(40),
            intake,
            preview,
            text("Choose Art Styles").size(24),
            styles,
            actions,
            text(&self.status).size(16),
            text(format!("Gallery ({} artworks)", self.gallery.len())).size(24),
            entries,
            floor_plan,
        ]
        .spacing(16)
        .padding(40)
        .align_x(Alignment::Start);

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Route dropped files into image intake
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window_id| {
            if let event::Event::Window(window::Event::FileDropped(path)) = event {
                return Some(Message::FileDropped(path));
            }
            None
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    iced::application(
        "Neural Art Gallery",
        NeuralGallery::update,
        NeuralGallery::view,
    )
    .theme(NeuralGallery::theme)
    .subscription(NeuralGallery::subscription)
    .centered()
    .run_with(NeuralGallery::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_ignored_while_generating() {
        let (mut app, _) = NeuralGallery::new();
        app.cancel = Some(cancellation_token());

        let _ = app.update(Message::FileDropped(PathBuf::from("dropped.png")));
        assert!(app.source.is_none());
        assert!(app.status.starts_with("Wait for the current generation"));
    }

    #[test]
    fn test_drop_starts_image_load() {
        let (mut app, _) = NeuralGallery::new();

        let _ = app.update(Message::FileDropped(PathBuf::from("dropped.png")));
        assert_eq!(app.status, "Processing dropped.png...");
    }

    #[test]
    fn test_loaded_image_becomes_source() {
        let (mut app, _) = NeuralGallery::new();
        let png = SourceImage::from_bytes(vec![
            0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A,
        ])
        .unwrap();

        let _ = app.update(Message::ImageLoaded(Ok(png.clone())));
        assert_eq!(app.source, Some(png));
    }
}
