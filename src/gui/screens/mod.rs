pub mod editor;
pub mod landing_page;
pub mod loading_page;

use iced::{Element, Task};
use std::path::PathBuf;
use std::sync::Arc;

use crate::gui::{AppState, Message, state::LoadedImage};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    type ParentMessage: std::fmt::Debug;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    LandingPage(landing_page::LandingPageScreen),
    LoadingPage(loading_page::LoadingPageScreen),
    Editor(editor::EditorScreen),
}

/// Read and decode a file off the UI thread
async fn load_image_file(path: PathBuf) -> anyhow::Result<LoadedImage> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let image = crate::io::decode_image(&bytes)?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Image loaded"
    );
    Ok(LoadedImage {
        path,
        image: Arc::new(image),
    })
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;
    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self {
            ScreenData::LandingPage(screen) => screen.view().map(Message::LandingPage),
            ScreenData::LoadingPage(screen) => screen.view().map(Message::LoadingPageMessage),
            ScreenData::Editor(screen) => screen.view().map(Message::EditorMessage),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::ChangeScreen(screen)) => {
                *x = screen;
                Task::none()
            }
            (x, Message::ImageLoaded(loaded)) => {
                let editor = editor::EditorScreen::new(&loaded, &state.config);
                state.original = Some(loaded);
                state.processed = None;
                *x = ScreenData::Editor(editor);
                Task::none()
            }
            (x, Message::LoadFailed(error)) => {
                tracing::warn!(%error, "Image could not be loaded");
                *x = ScreenData::LandingPage(landing_page::LandingPageScreen::with_error(error));
                Task::none()
            }
            (ScreenData::LandingPage(page), Message::LandingPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::LandingPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(parent_msg) => match parent_msg {
                    landing_page::ParentMessage::OpenedImage(path) => {
                        Task::done(ScreenMessage::ScreenMessage(Message::ChangeScreen(
                            ScreenData::LoadingPage(loading_page::LoadingPageScreen),
                        )))
                        .chain(Task::perform(load_image_file(path), |result| {
                            ScreenMessage::ScreenMessage(match result {
                                Ok(loaded) => Message::ImageLoaded(loaded),
                                Err(e) => Message::LoadFailed(e.to_string()),
                            })
                        }))
                    }
                },
            },
            (ScreenData::Editor(page), Message::EditorMessage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::EditorMessage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(editor::ParentMessage::OpenAnother) => {
                    state.original = None;
                    state.processed = None;
                    Task::done(ScreenMessage::ScreenMessage(Message::ChangeScreen(
                        ScreenData::LandingPage(landing_page::LandingPageScreen::default()),
                    )))
                }
            },
            _ => Task::none(),
        }
    }
}
