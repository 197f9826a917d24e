use crate::gui::{
    screens::{
        ScreenData, ScreenMessage, editor::EditorScreen, landing_page::LandingPageScreen,
        loading_page::LoadingPageScreen,
    },
    state::LoadedImage,
};

#[derive(Debug)]
pub enum Message {
    LandingPage(ScreenMessage<LandingPageScreen>),
    LoadingPageMessage(ScreenMessage<LoadingPageScreen>),
    EditorMessage(ScreenMessage<EditorScreen>),
    ChangeScreen(ScreenData),
    ImageLoaded(LoadedImage),
    LoadFailed(String),
}
