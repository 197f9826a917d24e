use std::path::PathBuf;

use iced::{
    Alignment::Center,
    Element, Task,
    widget::{button, column, container, text},
};
use rfd::AsyncFileDialog;

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};
use crate::io::SUPPORTED_EXTENSIONS;

#[derive(Debug, Clone, Default)]
pub struct LandingPageScreen {
    error: Option<String>,
}

impl LandingPageScreen {
    /// Landing page showing why the last load failed
    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum LandingPageMessage {
    OpenImage,
    None,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    OpenedImage(PathBuf),
}

impl Screen for LandingPageScreen {
    type Message = LandingPageMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut content = column![
            text("Sketchify").size(32),
            text("Sketch, edge, threshold and poster effects for your images"),
            button("Open Image").on_press(ScreenMessage::ScreenMessage(
                LandingPageMessage::OpenImage
            )),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Center);

        if let Some(error) = &self.error {
            content = content.push(text(error.as_str()));
        }

        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LandingPageMessage::OpenImage => Task::perform(
                AsyncFileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Image files", &SUPPORTED_EXTENSIONS)
                    .pick_file(),
                |handle| match handle {
                    Some(data) => ScreenMessage::ParentMessage(ParentMessage::OpenedImage(
                        data.path().to_path_buf(),
                    )),
                    None => ScreenMessage::ScreenMessage(LandingPageMessage::None),
                },
            ),
            LandingPageMessage::None => Task::none(),
        }
    }
}
