/// Image selector component
///
/// Accepts one image from the file dialog or from a window file drop,
/// validates it, owns its preview handle and reports every change of the
/// selection (including clearing) to the parent through `Action`.
use std::path::PathBuf;

use iced::widget::{button, column, container, image, row, text, Column, Image};
use iced::{Alignment, Background, Border, Color, ContentFit, Element, Length, Task, Theme};
use rfd::FileDialog;

use super::preview::PreviewSlot;
use crate::error::SelectionError;
use crate::state::selection::{load_image, SelectedImage, IMAGE_EXTENSIONS};

#[derive(Debug, Clone)]
pub enum SelectorMessage {
    /// "Choose Image" / "Change Image"
    ChooseClicked,
    RemoveClicked,
    /// A file is being dragged over the window
    DragEntered,
    /// The drag left the window without dropping
    DragLeft,
    Dropped(PathBuf),
    /// Background load finished for the given load generation
    Loaded(u64, Result<SelectedImage, SelectionError>),
}

/// What the parent has to do after an update
pub enum Action {
    None,
    /// Run a background task and feed its message back to the selector
    Run(Task<SelectorMessage>),
    /// The selection changed; `None` means the image was removed
    Selected(Option<SelectedImage>),
    /// The file was refused; show the notice, change nothing
    Rejected(SelectionError),
}

#[derive(Debug)]
pub struct ImageSelector {
    preview: PreviewSlot,
    /// Highlight only, never affects acceptance
    drag_active: bool,
    /// Bumped on every load start and on clear; older loads are dropped
    load_generation: u64,
}

impl ImageSelector {
    pub fn new() -> Self {
        Self {
            preview: PreviewSlot::new(),
            drag_active: false,
            load_generation: 0,
        }
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    #[cfg(test)]
    pub fn has_preview(&self) -> bool {
        self.preview.current_id().is_some()
    }

    pub fn update(&mut self, message: SelectorMessage) -> Action {
        match message {
            SelectorMessage::ChooseClicked => match pick_image_file() {
                Some(path) => self.start_load(path),
                None => Action::None,
            },
            SelectorMessage::RemoveClicked => {
                if self.clear() {
                    Action::Selected(None)
                } else {
                    Action::None
                }
            }
            SelectorMessage::DragEntered => {
                self.drag_active = true;
                Action::None
            }
            SelectorMessage::DragLeft => {
                self.drag_active = false;
                Action::None
            }
            SelectorMessage::Dropped(path) => {
                self.drag_active = false;
                self.start_load(path)
            }
            SelectorMessage::Loaded(generation, result) => {
                if generation != self.load_generation {
                    log::debug!("Dropping superseded load #{}", generation);
                    return Action::None;
                }

                match result {
                    Ok(image) => {
                        self.preview.acquire(image.bytes.to_vec());
                        Action::Selected(Some(image))
                    }
                    Err(err) => {
                        log::warn!("Rejected file: {}", err);
                        Action::Rejected(err)
                    }
                }
            }
        }
    }

    /// Release the preview and forget any pending load. Returns true if a
    /// preview was released.
    pub fn clear(&mut self) -> bool {
        self.load_generation += 1;
        self.drag_active = false;
        self.preview.release().is_some()
    }

    fn start_load(&mut self, path: PathBuf) -> Action {
        self.load_generation += 1;
        let generation = self.load_generation;
        log::info!("Loading {}", path.display());

        Action::Run(Task::perform(load_image(path), move |result| {
            SelectorMessage::Loaded(generation, result)
        }))
    }

    pub fn view<'a>(&'a self, selected: Option<&'a SelectedImage>) -> Element<'a, SelectorMessage> {
        match selected {
            None => self.drop_zone(),
            Some(image) => self.preview_panel(image),
        }
    }

    fn drop_zone(&self) -> Element<'_, SelectorMessage> {
        let drag_active = self.is_drag_active();

        let content = column![
            text("🏛️").size(56),
            text("Upload an architectural image").size(20),
            text("Drag and drop your image here, or click to browse").size(14),
            button("Choose Image")
                .on_press(SelectorMessage::ChooseClicked)
                .style(button::secondary)
                .padding(10),
            text("Supports: JPG, PNG, GIF, WebP (max 10MB)").size(12),
        ]
        .spacing(12)
        .align_x(Alignment::Center);

        container(content)
            .padding(32)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .style(move |theme: &Theme| drop_zone_style(theme, drag_active))
            .into()
    }

    fn preview_panel<'a>(&'a self, selected: &'a SelectedImage) -> Element<'a, SelectorMessage> {
        let mut panel = Column::new().spacing(12).align_x(Alignment::Center);

        if let Some(handle) = self.preview.handle() {
            let preview: Image<image::Handle> = image(handle.clone());
            panel = panel.push(
                preview
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fixed(400.0)),
            );
        }

        panel
            .push(text(format!("File: {}", selected.name)).size(14))
            .push(text(format!("Size: {}", selected.size_label())).size(14))
            .push(
                row![
                    button("Change Image")
                        .on_press(SelectorMessage::ChooseClicked)
                        .style(button::secondary),
                    button("Remove")
                        .on_press(SelectorMessage::RemoveClicked)
                        .style(button::danger),
                ]
                .spacing(8),
            )
            .into()
    }
}

/// Native file dialog limited to image extensions
fn pick_image_file() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select an Architectural Image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

fn drop_zone_style(theme: &Theme, drag_active: bool) -> container::Style {
    let palette = theme.extended_palette();
    let (border, background) = if drag_active {
        (palette.primary.base.color, Color { a: 0.15, ..palette.primary.weak.color })
    } else {
        (palette.background.strong.color, Color::TRANSPARENT)
    };

    container::Style {
        background: Some(Background::Color(background)),
        border: Border {
            color: border,
            width: 2.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}
