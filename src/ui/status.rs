/// Transient status widgets: busy panel, error banner, service indicator
use iced::widget::{column, container, text};
use iced::{Background, Border, Color, Element, Length, Theme};

use crate::error::ClassifyError;
use crate::state::data::ServiceHealth;

const DANGER: Color = Color {
    r: 0.86,
    g: 0.21,
    b: 0.27,
    a: 1.0,
};

/// Reachability of the classification service, checked once at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Checking,
    Online,
    /// Answered, but did not report itself healthy
    Degraded(String),
    Unreachable(String),
}

impl ServiceStatus {
    pub fn from_health_check(check: Result<ServiceHealth, ClassifyError>) -> Self {
        if let Ok(health) = &check {
            log::debug!("{} reports '{}'", health.service, health.status);
        }
        match check {
            Ok(health) if health.is_healthy() => ServiceStatus::Online,
            Ok(health) => ServiceStatus::Degraded(health.status),
            Err(err) => ServiceStatus::Unreachable(err.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ServiceStatus::Checking => "Checking service…".to_string(),
            ServiceStatus::Online => "● Service online".to_string(),
            ServiceStatus::Degraded(status) => format!("● Service {}", status),
            ServiceStatus::Unreachable(_) => "● Service unreachable".to_string(),
        }
    }

    fn color(&self) -> Color {
        match self {
            ServiceStatus::Checking => Color::from_rgb(0.55, 0.57, 0.60),
            ServiceStatus::Online => Color::from_rgb(0.09, 0.64, 0.29),
            ServiceStatus::Degraded(_) => Color::from_rgb(0.96, 0.65, 0.14),
            ServiceStatus::Unreachable(_) => DANGER,
        }
    }
}

pub fn service_indicator<'a, Message: 'a>(status: &ServiceStatus) -> Element<'a, Message> {
    text(status.label()).size(12).color(status.color()).into()
}

/// Shown while a request is in flight
pub fn busy_panel<'a, Message: 'a>() -> Element<'a, Message> {
    container(text("Analyzing architectural features...").size(16))
        .padding(24)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(container::rounded_box)
        .into()
}

pub fn error_banner<'a, Message: 'a>(message: &'a str) -> Element<'a, Message> {
    container(
        column![text("Error").size(16).color(DANGER), text(message).size(14)].spacing(4),
    )
    .padding(16)
    .width(Length::Fill)
    .style(|_theme: &Theme| container::Style {
        background: Some(Background::Color(Color { a: 0.12, ..DANGER })),
        border: Border {
            color: DANGER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    })
    .into()
}
