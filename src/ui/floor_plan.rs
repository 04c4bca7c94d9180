/// Top-down floor plan of the gallery
/// Draws each positioned entry at its slot's (x, z), coloured by style
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Point, Rectangle, Size};

use neural_gallery::{EntryContent, PositionedEntry, StyleCatalog};

use crate::Message;

/// World-space extent shown by the plan: x in [-6, 6], z in [-10, 2]
const MIN_X: f32 = -6.0;
const MAX_X: f32 = 6.0;
const MIN_Z: f32 = -10.0;
const MAX_Z: f32 = 2.0;

/// Width of an artwork frame in world units
const FRAME_WIDTH: f32 = 3.2;

#[derive(Debug, Clone)]
struct Mark {
    x: f32,
    z: f32,
    color: Color,
    placeholder: bool,
}

#[derive(Debug, Clone)]
pub struct FloorPlan {
    marks: Vec<Mark>,
}

impl FloorPlan {
    pub fn new(entries: &[PositionedEntry], catalog: &StyleCatalog) -> Self {
        let marks = entries
            .iter()
            .map(|entry| {
                let (color, placeholder) = match &entry.content {
                    EntryContent::Artwork(artwork) => {
                        let color = catalog
                            .describe(artwork.style)
                            .map(|style| {
                                let [r, g, b] = style.accent;
                                Color::from_rgb8(r, g, b)
                            })
                            .unwrap_or(Color::WHITE);
                        (color, false)
                    }
                    EntryContent::Placeholder(_) => (Color::from_rgb(0.6, 0.6, 0.6), true),
                };
                Mark {
                    x: entry.slot.position.x,
                    z: entry.slot.position.z,
                    color,
                    placeholder,
                }
            })
            .collect();

        Self { marks }
    }
}

impl canvas::Program<Message> for FloorPlan {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let scale_x = bounds.width / (MAX_X - MIN_X);
        let scale_z = bounds.height / (MAX_Z - MIN_Z);
        let to_screen = |x: f32, z: f32| Point::new((x - MIN_X) * scale_x, (z - MIN_Z) * scale_z);

        // Floor outline
        frame.stroke(
            &Path::rectangle(Point::ORIGIN, bounds.size()),
            Stroke::default()
                .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.2))
                .with_width(1.0),
        );

        for mark in &self.marks {
            let center = to_screen(mark.x, mark.z);
            if mark.placeholder {
                frame.fill(&Path::circle(center, 6.0), mark.color);
                continue;
            }

            // Frames face the camera, so they are thin bars on the plan
            let width = FRAME_WIDTH * scale_x;
            let bar = Path::rectangle(
                Point::new(center.x - width / 2.0, center.y - 3.0),
                Size::new(width, 6.0),
            );
            frame.fill(&bar, mark.color);
        }

        vec![frame.into_geometry()]
    }
}
