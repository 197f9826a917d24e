use iced::{Element, Task};

use super::screens::{Screen, ScreenData, ScreenMessage, landing_page::LandingPageScreen};
use super::{AppState, Message};
use crate::EffectConfig;

pub struct SketchifyApp {
    state: AppState,
    screen: ScreenData,
}

/// The root screen has no parent to talk to
fn root_message(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}

impl SketchifyApp {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            state: AppState::new(config),
            screen: ScreenData::LandingPage(LandingPageScreen::default()),
        }
    }

    pub fn title(&self) -> String {
        match &self.state.original {
            Some(loaded) => format!("Sketchify - {}", loaded.path.display()),
            None => "Sketchify".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.screen.update(message, &mut self.state).map(root_message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(root_message)
    }
}

/// Open the editor window and block until it is closed
pub fn run(config: EffectConfig) -> iced::Result {
    iced::application(
        move || SketchifyApp::new(config.clone()),
        SketchifyApp::update,
        SketchifyApp::view,
    )
    .title(SketchifyApp::title)
    .run()
}
