use iced::widget::{button, column, container, row, scrollable, text};
use iced::window;
use iced::{event, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

mod config;
mod error;
mod service;
mod state;
mod ui;

use config::{AppConfig, LogLevel};
use error::{ClassifyError, SelectionError};
use service::HttpClassifier;
use state::data::{ClassificationResponse, ServiceHealth};
use state::shell::{Dispatch, RequestId, Shell};
use ui::selector::{Action, ImageSelector, SelectorMessage};
use ui::status::{self, ServiceStatus};

/// Main application state
struct StyleClassifier {
    /// Selection, in-flight flag, result and error
    shell: Shell,
    /// Drop zone / preview component
    selector: ImageSelector,
    classifier: HttpClassifier,
    service: ServiceStatus,
    dark_theme: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    Selector(SelectorMessage),
    /// User clicked "Classify Architecture"
    Classify,
    /// User clicked "Reset"
    Reset,
    /// A classification request settled
    Classified(RequestId, Result<ClassificationResponse, ClassifyError>),
    /// Start-up health check finished
    HealthChecked(Result<ServiceHealth, ClassifyError>),
}

impl StyleClassifier {
    fn new(config: AppConfig, classifier: HttpClassifier) -> (Self, Task<Message>) {
        log::info!("Classification service at {}", classifier.base_url());

        let health_check = Task::perform(classifier.clone().health(), Message::HealthChecked);

        (
            StyleClassifier {
                shell: Shell::new(),
                selector: ImageSelector::new(),
                classifier,
                service: ServiceStatus::Checking,
                dark_theme: config.dark_theme,
            },
            health_check,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Selector(message) => match self.selector.update(message) {
                Action::None => Task::none(),
                Action::Run(task) => task.map(Message::Selector),
                Action::Selected(image) => {
                    self.shell.select(image);
                    Task::none()
                }
                Action::Rejected(err) => {
                    show_rejection_notice(&err);
                    Task::none()
                }
            },
            Message::Classify => match self.shell.submit() {
                Some(Dispatch { id, image }) => Task::perform(
                    self.classifier.clone().classify(image),
                    move |outcome| Message::Classified(id, outcome),
                ),
                None => Task::none(),
            },
            Message::Reset => {
                self.shell.reset();
                self.selector.clear();
                Task::none()
            }
            Message::Classified(id, outcome) => {
                if let Err(err) = &outcome {
                    log::error!("Classification error: {}", err);
                }
                self.shell.settle(id, outcome);
                Task::none()
            }
            Message::HealthChecked(check) => {
                self.service = ServiceStatus::from_health_check(check);
                match &self.service {
                    ServiceStatus::Unreachable(reason) => {
                        log::warn!("Classification service unreachable: {}", reason)
                    }
                    other => log::info!("Classification service: {:?}", other),
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("🏛️ Architectural Style Classifier").size(36),
            text("Upload an image of a building to identify its architectural style").size(16),
            status::service_indicator::<Message>(&self.service),
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        let mut upload = column![
            text("Upload Image").size(22),
            self.selector
                .view(self.shell.selected())
                .map(Message::Selector),
        ]
        .spacing(16);

        if self.shell.selected().is_some() {
            let label = if self.shell.is_busy() {
                "Analyzing..."
            } else {
                "Classify Architecture"
            };

            upload = upload.push(
                row![
                    button(label)
                        .on_press_maybe(self.shell.can_submit().then_some(Message::Classify))
                        .padding(12),
                    button("Reset")
                        .on_press(Message::Reset)
                        .style(button::secondary)
                        .padding(12),
                ]
                .spacing(12),
            );
        }

        let content = column![
            header,
            container(upload)
                .padding(24)
                .width(Length::Fill)
                .style(container::rounded_box),
        ]
        .push_maybe(self.shell.error().map(status::error_banner::<Message>))
        .push_maybe(ui::result::view::<Message>(self.shell.result()))
        .push_maybe(self.shell.is_busy().then(status::busy_panel::<Message>))
        .push(text("Built with Rust, iced, and Machine Learning").size(12))
        .spacing(24)
        .padding(32)
        .max_width(900)
        .align_x(Alignment::Center);

        scrollable(container(content).center_x(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Window-level file drag-and-drop feeds the selector
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => {
                Some(Message::Selector(SelectorMessage::DragEntered))
            }
            Event::Window(window::Event::FilesHoveredLeft) => {
                Some(Message::Selector(SelectorMessage::DragLeft))
            }
            Event::Window(window::Event::FileDropped(path)) => {
                Some(Message::Selector(SelectorMessage::Dropped(path)))
            }
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.dark_theme {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Blocking notice for a refused file
fn show_rejection_notice(err: &SelectionError) {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Image not accepted")
        .set_description(err.to_string())
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        // Renderer internals are noisy below warn
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("naga", log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_problem) = AppConfig::load();
    init_logging(config.log_level);
    if let Some(problem) = config_problem {
        log::warn!("{}", problem);
    }

    let classifier = HttpClassifier::new(&config.service_url)?;

    iced::application(
        "Architectural Style Classifier",
        StyleClassifier::update,
        StyleClassifier::view,
    )
    .theme(StyleClassifier::theme)
    .subscription(StyleClassifier::subscription)
    .centered()
    .run_with(move || StyleClassifier::new(config, classifier))?;

    Ok(())
}
