use std::path::PathBuf;

use iced::{
    Element, Length, Task,
    widget::{button, column, image::Handle, pick_list, row, slider, text},
};
use image::DynamicImage;
use rfd::AsyncFileDialog;

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
    state::LoadedImage,
    widgets::{Stage, layout},
};
use crate::io::{DEFAULT_OUTPUT, SUPPORTED_EXTENSIONS, is_supported, save_image};
use crate::{Effect, EffectConfig, EffectKind};

/// Largest level count offered by the posterize slider
const MAX_SLIDER_LEVELS: u8 = 32;

#[derive(Debug, Clone)]
pub struct EditorScreen {
    file_name: String,
    kind: EffectKind,
    cutoff: u8,
    levels: u8,
    original_preview: Handle,
    processed_preview: Option<Handle>,
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum EditorMessage {
    EffectSelected(EffectKind),
    CutoffChanged(u8),
    LevelsChanged(u8),
    Apply,
    Save,
    SaveTo(PathBuf),
    None,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    OpenAnother,
}

/// Convert any image into an RGBA handle the renderer can show
fn preview_handle(img: &DynamicImage) -> Handle {
    let rgba = img.to_rgba8();
    Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
}

fn preview<'a>(
    title: &'a str,
    handle: Option<&Handle>,
) -> Element<'a, ScreenMessage<EditorScreen>> {
    let body: Element<'a, ScreenMessage<EditorScreen>> = match handle {
        Some(handle) => iced::widget::image(handle.clone()).width(Length::Fill).into(),
        None => text("Nothing applied yet").into(),
    };
    column![text(title).size(18), body]
        .spacing(10)
        .width(Length::FillPortion(1))
        .into()
}

impl EditorScreen {
    pub fn new(loaded: &LoadedImage, config: &EffectConfig) -> Self {
        let file_name = loaded
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| loaded.path.display().to_string());
        Self {
            file_name,
            kind: EffectKind::Sketch,
            cutoff: config.threshold_cutoff.clamp(0, 255) as u8,
            levels: config.posterize_levels.clamp(1, MAX_SLIDER_LEVELS as i32) as u8,
            original_preview: preview_handle(&loaded.image),
            processed_preview: None,
            status: None,
        }
    }

    /// The selected effect with the slider values folded into `config`
    fn effect(&self, config: &EffectConfig) -> Effect {
        let config = config
            .clone()
            .with_threshold_cutoff(self.cutoff as i32)
            .with_posterize_levels(self.levels as i32);
        Effect::from_kind(self.kind, &config)
    }

    fn stage(&self) -> Stage {
        if self.processed_preview.is_some() {
            Stage::Save
        } else {
            Stage::Apply
        }
    }

    fn parameter_control(&self) -> Element<'_, ScreenMessage<Self>> {
        match self.kind {
            EffectKind::Threshold => row![
                text(format!("Cutoff: {}", self.cutoff)),
                slider(0..=255, self.cutoff, |v| {
                    ScreenMessage::ScreenMessage(EditorMessage::CutoffChanged(v))
                }),
            ]
            .spacing(10)
            .into(),
            EffectKind::Posterize => row![
                text(format!("Levels: {}", self.levels)),
                slider(1..=MAX_SLIDER_LEVELS, self.levels, |v| {
                    ScreenMessage::ScreenMessage(EditorMessage::LevelsChanged(v))
                }),
            ]
            .spacing(10)
            .into(),
            _ => column![].into(),
        }
    }
}

impl Screen for EditorScreen {
    type Message = EditorMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let controls = column![
            text(self.file_name.as_str()).size(20),
            pick_list(EffectKind::ALL, Some(self.kind), |kind| {
                ScreenMessage::ScreenMessage(EditorMessage::EffectSelected(kind))
            }),
            self.parameter_control(),
            row![
                button("Apply").on_press(ScreenMessage::ScreenMessage(EditorMessage::Apply)),
                button("Save").on_press(ScreenMessage::ScreenMessage(EditorMessage::Save)),
            ]
            .spacing(10),
            button("Open Another")
                .on_press(ScreenMessage::ParentMessage(ParentMessage::OpenAnother)),
            text(self.status.as_deref().unwrap_or("")),
        ]
        .spacing(15)
        .padding(10);

        let previews = row![
            preview("Original", Some(&self.original_preview)),
            preview("Processed", self.processed_preview.as_ref()),
        ]
        .spacing(20)
        .padding(10);

        layout(controls, previews, self.stage())
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            EditorMessage::EffectSelected(kind) => {
                self.kind = kind;
                Task::none()
            }
            EditorMessage::CutoffChanged(cutoff) => {
                self.cutoff = cutoff;
                Task::none()
            }
            EditorMessage::LevelsChanged(levels) => {
                self.levels = levels;
                Task::none()
            }
            EditorMessage::Apply => {
                let Some(original) = &state.original else {
                    self.status = Some("No image loaded".to_string());
                    return Task::none();
                };
                let effect = self.effect(&state.config);
                match effect.apply(&original.image) {
                    Ok(processed) => {
                        self.processed_preview = Some(preview_handle(&processed));
                        self.status = Some(format!("Applied {}", effect));
                        state.processed = Some(processed);
                    }
                    Err(e) => {
                        tracing::warn!(%effect, error = %e, "Effect failed");
                        self.status = Some(e.to_string());
                    }
                }
                Task::none()
            }
            EditorMessage::Save => {
                if state.processed.is_none() {
                    self.status = Some("Apply an effect before saving".to_string());
                    return Task::none();
                }
                Task::perform(
                    AsyncFileDialog::new()
                        .set_title("Save Processed Image")
                        .set_file_name(DEFAULT_OUTPUT)
                        .add_filter("Image files", &SUPPORTED_EXTENSIONS)
                        .save_file(),
                    |handle| match handle {
                        Some(data) => ScreenMessage::ScreenMessage(EditorMessage::SaveTo(
                            data.path().to_path_buf(),
                        )),
                        None => ScreenMessage::ScreenMessage(EditorMessage::None),
                    },
                )
            }
            EditorMessage::SaveTo(path) => {
                let path = if is_supported(&path) {
                    path
                } else {
                    path.with_extension("png")
                };
                if let Some(processed) = &state.processed {
                    self.status = Some(match save_image(processed, &path) {
                        Ok(()) => format!("Saved {}", path.display()),
                        Err(e) => e.to_string(),
                    });
                }
                Task::none()
            }
            EditorMessage::None => Task::none(),
        }
    }
}
