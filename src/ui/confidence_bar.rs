/// Proportional confidence indicator
/// Draws a track plus a filled bar of width `confidence × 100` percent
use iced::widget::canvas::{self, Path};
use iced::{Color, Point, Rectangle, Size};

use super::result::Severity;

#[derive(Debug, Clone, Copy)]
pub struct ConfidenceBar {
    /// Fill percentage in [0, 100]
    pub percent: f32,
    pub severity: Severity,
}

impl ConfidenceBar {
    pub fn new(confidence: f64) -> Self {
        Self {
            percent: (confidence * 100.0).clamp(0.0, 100.0) as f32,
            severity: Severity::of(confidence),
        }
    }

    /// Width of the filled part for a track `width` pixels wide
    pub fn fill_width(&self, width: f32) -> f32 {
        width * self.percent / 100.0
    }
}

impl<Message> canvas::Program<Message> for ConfidenceBar {
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
        let radius = bounds.height / 2.0;

        let track = Path::rounded_rectangle(Point::ORIGIN, bounds.size(), radius.into());
        frame.fill(&track, Color::from_rgba(0.5, 0.5, 0.5, 0.25));

        let fill = self.fill_width(bounds.width);
        if fill > 0.0 {
            let bar = Path::rounded_rectangle(
                Point::ORIGIN,
                Size::new(fill, bounds.height),
                radius.into(),
            );
            frame.fill(&bar, self.severity.color());
        }

        vec![frame.into_geometry()]
    }
}
