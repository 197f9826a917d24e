pub mod config;
pub mod effects;
pub mod error;
pub mod io;
pub mod pipeline;

pub use config::{EdgeThresholds, EffectConfig};
pub use effects::{
    Effect, EffectKind, contour_highlight, edge_detection, grayscale, posterize, sketch,
    tattoo_binarize, threshold,
};
pub use error::EffectError;
pub use pipeline::{DebugConfig, MetadataValue, Pipeline, PipelineData, PipelineStep};

#[cfg(feature = "gui")]
pub mod gui;
