/// Classification result renderer
///
/// Pure display: given a response it lays out the file header, the top
/// prediction and every ranked prediction. Nothing here touches state.
use iced::widget::{canvas, column, container, row, text, Column};
use iced::{Alignment, Background, Border, Color, Element, Length, Theme};

use super::confidence_bar::ConfidenceBar;
use crate::state::data::{ClassificationResponse, Prediction};

/// Visual accent tier for a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// confidence > 0.7
    High,
    /// 0.4 < confidence <= 0.7
    Medium,
    /// confidence <= 0.4
    Neutral,
}

impl Severity {
    pub fn of(confidence: f64) -> Self {
        if confidence > 0.7 {
            Severity::High
        } else if confidence > 0.4 {
            Severity::Medium
        } else {
            Severity::Neutral
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Severity::High => Color::from_rgb(0.09, 0.64, 0.29),
            Severity::Medium => Color::from_rgb(0.96, 0.65, 0.14),
            Severity::Neutral => Color::from_rgb(0.55, 0.57, 0.60),
        }
    }
}

/// Confidence as a percentage with one decimal (0.732 -> "73.2%")
///
/// Ties round half-up (0.8125 -> "81.3%").
pub fn format_confidence(confidence: f64) -> String {
    let tenths = (confidence * 1000.0).round() / 10.0;
    format!("{:.1}%", tenths)
}

/// "800 × 600px"
pub fn format_dimensions(width: u32, height: u32) -> String {
    format!("{} × {}px", width, height)
}

/// Render a result, or nothing when there is none
pub fn view<'a, Message: 'a>(
    result: Option<&'a ClassificationResponse>,
) -> Option<Element<'a, Message>> {
    let result = result?;

    let header = column![
        text("Classification Results").size(22),
        row![
            text(format!("📁 {}", result.filename)).size(14),
            text(format!(
                "📐 {}",
                format_dimensions(result.image_size.width, result.image_size.height)
            ))
            .size(14),
        ]
        .spacing(16),
    ]
    .spacing(6);

    let top = &result.top_prediction;
    let top_severity = Severity::of(top.confidence);
    let top_card = container(
        column![
            row![
                text("Most Likely Style").size(16).width(Length::Fill),
                text(format_confidence(top.confidence))
                    .size(16)
                    .color(top_severity.color()),
            ]
            .align_y(Alignment::Center),
            text(top.style.as_str()).size(28),
        ]
        .spacing(8),
    )
    .padding(16)
    .width(Length::Fill)
    .style(|theme: &Theme| card_style(theme, true));

    let rows = result
        .predictions
        .iter()
        .enumerate()
        .fold(Column::new().spacing(8), |list, (index, prediction)| {
            list.push(prediction_row(index + 1, prediction))
        });

    let footer = text(
        "📝 Note: These are currently dummy predictions for testing. \
         The actual ML model will be integrated in the next phase.",
    )
    .size(12)
    .color(Severity::Medium.color());

    let content = column![
        header,
        top_card,
        text("All Predictions").size(18),
        rows,
        footer,
    ]
    .spacing(16);

    Some(
        container(content)
            .padding(20)
            .width(Length::Fill)
            .style(|theme: &Theme| card_style(theme, false))
            .into(),
    )
}

/// One ranked entry. Rank 1 gets the highlighted card.
fn prediction_row<'a, Message: 'a>(rank: usize, prediction: &'a Prediction) -> Element<'a, Message> {
    let severity = Severity::of(prediction.confidence);
    let highlighted = rank == 1;

    let line = row![
        text(format!("#{}", rank)).size(14).width(Length::Fixed(32.0)),
        text(prediction.style.as_str()).size(16).width(Length::Fill),
        canvas(ConfidenceBar::new(prediction.confidence))
            .width(Length::Fixed(128.0))
            .height(Length::Fixed(8.0)),
        text(format_confidence(prediction.confidence))
            .size(14)
            .color(severity.color())
            .width(Length::Fixed(56.0)),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    container(line)
        .padding(10)
        .width(Length::Fill)
        .style(move |theme: &Theme| card_style(theme, highlighted))
        .into()
}

fn card_style(theme: &Theme, highlighted: bool) -> container::Style {
    let palette = theme.extended_palette();
    let (background, border) = if highlighted {
        (palette.primary.weak.color, palette.primary.base.color)
    } else {
        (palette.background.weak.color, palette.background.strong.color)
    };

    container::Style {
        background: Some(Background::Color(Color { a: 0.35, ..background })),
        border: Border {
            color: border,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}
