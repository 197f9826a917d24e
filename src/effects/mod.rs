pub mod contours;
pub mod preprocessing;
pub mod steps;

use image::DynamicImage;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

use crate::config::{EdgeThresholds, EffectConfig, validate_cutoff, validate_kernel_size, validate_levels};
use crate::error::{EffectError, Result};
use crate::pipeline::Pipeline;
use steps::*;

/// Identifier of an effect, without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Grayscale,
    Sketch,
    EdgeDetection,
    Threshold,
    Posterize,
    ContourHighlight,
    TattooBinarize,
}

impl EffectKind {
    pub const ALL: [EffectKind; 7] = [
        EffectKind::Grayscale,
        EffectKind::Sketch,
        EffectKind::EdgeDetection,
        EffectKind::Threshold,
        EffectKind::Posterize,
        EffectKind::ContourHighlight,
        EffectKind::TattooBinarize,
    ];

    /// Stable machine name, accepted back by `FromStr`
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Grayscale => "grayscale",
            EffectKind::Sketch => "sketch",
            EffectKind::EdgeDetection => "edge_detection",
            EffectKind::Threshold => "threshold",
            EffectKind::Posterize => "posterize",
            EffectKind::ContourHighlight => "contour_highlight",
            EffectKind::TattooBinarize => "tattoo_binarize",
        }
    }

    /// Human-readable label for menus
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Grayscale => "Grayscale",
            EffectKind::Sketch => "Sketch Effect",
            EffectKind::EdgeDetection => "Edge Detection",
            EffectKind::Threshold => "Thresholding",
            EffectKind::Posterize => "Posterization",
            EffectKind::ContourHighlight => "Contour Highlighting",
            EffectKind::TattooBinarize => "Tattoo Template",
        }
    }

    /// Name of the user-tunable parameter, if the effect has one
    pub fn parameter(self) -> Option<&'static str> {
        match self {
            EffectKind::Threshold => Some("cutoff"),
            EffectKind::Posterize => Some("levels"),
            _ => None,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EffectKind {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = EffectKind::ALL.iter().map(|k| k.name()).collect();
                EffectError::InvalidParameter(format!(
                    "unknown effect '{}' (expected one of: {})",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// An effect with its parameters resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Grayscale,
    Sketch { kernel_size: u32 },
    EdgeDetection(EdgeThresholds),
    Threshold { cutoff: i32 },
    Posterize { levels: i32 },
    ContourHighlight(EdgeThresholds),
    TattooBinarize { cutoff: i32 },
}

impl Effect {
    /// Build an effect of `kind`, taking its parameters from `config`
    pub fn from_kind(kind: EffectKind, config: &EffectConfig) -> Self {
        match kind {
            EffectKind::Grayscale => Effect::Grayscale,
            EffectKind::Sketch => Effect::Sketch {
                kernel_size: config.sketch_kernel_size,
            },
            EffectKind::EdgeDetection => Effect::EdgeDetection(config.edge),
            EffectKind::Threshold => Effect::Threshold {
                cutoff: config.threshold_cutoff,
            },
            EffectKind::Posterize => Effect::Posterize {
                levels: config.posterize_levels,
            },
            EffectKind::ContourHighlight => Effect::ContourHighlight(config.edge),
            EffectKind::TattooBinarize => Effect::TattooBinarize {
                cutoff: config.tattoo_cutoff,
            },
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Grayscale => EffectKind::Grayscale,
            Effect::Sketch { .. } => EffectKind::Sketch,
            Effect::EdgeDetection(_) => EffectKind::EdgeDetection,
            Effect::Threshold { .. } => EffectKind::Threshold,
            Effect::Posterize { .. } => EffectKind::Posterize,
            Effect::ContourHighlight(_) => EffectKind::ContourHighlight,
            Effect::TattooBinarize { .. } => EffectKind::TattooBinarize,
        }
    }

    /// Channel count of the image this effect produces
    pub fn output_channels(&self) -> u8 {
        match self {
            Effect::ContourHighlight(_) => 3,
            _ => 1,
        }
    }

    /// Validate parameters and assemble the step pipeline for this effect
    pub fn pipeline(&self) -> Result<Pipeline> {
        let pipeline = Pipeline::new().add_step(Arc::new(GrayscaleStep));

        let pipeline = match *self {
            Effect::Grayscale => pipeline,
            Effect::Sketch { kernel_size } => pipeline
                .add_step(Arc::new(InvertStep))
                .add_step(Arc::new(GaussianBlurStep {
                    kernel_size: validate_kernel_size(kernel_size)?,
                }))
                .add_step(Arc::new(ColorDodgeStep)),
            Effect::EdgeDetection(thresholds) => {
                thresholds.validate()?;
                pipeline.add_step(Arc::new(EdgeDetectionStep { thresholds }))
            }
            Effect::Threshold { cutoff } | Effect::TattooBinarize { cutoff } => {
                pipeline.add_step(Arc::new(ThresholdStep {
                    cutoff: validate_cutoff(cutoff)?,
                }))
            }
            Effect::Posterize { levels } => pipeline.add_step(Arc::new(PosterizeStep {
                levels: validate_levels(levels)?,
            })),
            Effect::ContourHighlight(thresholds) => {
                thresholds.validate()?;
                pipeline
                    .add_step(Arc::new(EdgeDetectionStep { thresholds }))
                    .add_step(Arc::new(ContourDrawStep))
            }
        };

        Ok(pipeline)
    }

    /// Apply the effect, returning a new image
    #[instrument(skip_all, fields(effect = %self))]
    pub fn apply(&self, img: &DynamicImage) -> Result<DynamicImage> {
        self.pipeline()?.apply(img)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().name();
        match self {
            Effect::Grayscale => write!(f, "{}", name),
            Effect::Sketch { kernel_size } => write!(f, "{}(kernel={})", name, kernel_size),
            Effect::EdgeDetection(t) | Effect::ContourHighlight(t) => {
                write!(f, "{}(low={}, high={})", name, t.low, t.high)
            }
            Effect::Threshold { cutoff } | Effect::TattooBinarize { cutoff } => {
                write!(f, "{}(cutoff={})", name, cutoff)
            }
            Effect::Posterize { levels } => write!(f, "{}(levels={})", name, levels),
        }
    }
}

/// Luma-weighted grayscale conversion
pub fn grayscale(img: &DynamicImage) -> Result<DynamicImage> {
    Effect::Grayscale.apply(img)
}

/// Pencil-sketch simulation with the default 21x21 blur
pub fn sketch(img: &DynamicImage) -> Result<DynamicImage> {
    Effect::from_kind(EffectKind::Sketch, &EffectConfig::default()).apply(img)
}

/// Binary Canny edge map
pub fn edge_detection(img: &DynamicImage, thresholds: EdgeThresholds) -> Result<DynamicImage> {
    Effect::EdgeDetection(thresholds).apply(img)
}

/// Binarize: 255 where gray > `cutoff`
pub fn threshold(img: &DynamicImage, cutoff: i32) -> Result<DynamicImage> {
    Effect::Threshold { cutoff }.apply(img)
}

/// Quantize gray to `levels` bands
pub fn posterize(img: &DynamicImage, levels: i32) -> Result<DynamicImage> {
    Effect::Posterize { levels }.apply(img)
}

/// White contour outlines on black, 3 channels
pub fn contour_highlight(img: &DynamicImage, thresholds: EdgeThresholds) -> Result<DynamicImage> {
    Effect::ContourHighlight(thresholds).apply(img)
}

/// High-contrast stencil, cutoff 128
pub fn tattoo_binarize(img: &DynamicImage) -> Result<DynamicImage> {
    Effect::from_kind(EffectKind::TattooBinarize, &EffectConfig::default()).apply(img)
}
