use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

use crate::EffectConfig;

/// An image decoded from disk
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: Arc<DynamicImage>,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub config: EffectConfig,
    pub original: Option<LoadedImage>,
    pub processed: Option<DynamicImage>,
}

impl AppState {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            config,
            original: None,
            processed: None,
        }
    }
}
