use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{EffectError, Result};

/// Data that flows through the pipeline
#[derive(Clone, Debug)]
pub struct PipelineData {
    /// The current image (grayscale or color)
    pub image: DynamicImage,

    /// The untouched pipeline input, shared between steps
    pub original: Arc<DynamicImage>,

    /// Per-run facts recorded by steps (e.g. "contour_count")
    pub metadata: HashMap<String, MetadataValue>,
}

/// Metadata value types
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Float(f32),
    Int(i64),
}

impl PipelineData {
    /// Create PipelineData for a full image
    pub fn from_image(image: DynamicImage) -> Self {
        let original = Arc::new(image.clone());
        Self {
            image,
            original,
            metadata: HashMap::new(),
        }
    }

    /// Replace the image, keeping the original and metadata
    pub fn with_image(mut self, image: DynamicImage) -> Self {
        self.image = image;
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Get metadata as int
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get metadata as float
    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.metadata.get(key) {
            Some(MetadataValue::Float(v)) => Some(*v),
            _ => None,
        }
    }
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform one image into the next
    fn process(&self, data: PipelineData) -> Result<PipelineData>;

    /// Human-readable name for this step (used in logs and debug file names)
    fn name(&self) -> &str;
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// File name for the output of step `index` (1-based), e.g. "02_invert.png"
    pub fn step_filename(index: usize, step_name: &str) -> String {
        format!(
            "{:02}_{}.png",
            index,
            step_name.to_lowercase().replace(' ', "_")
        )
    }

    fn save(&self, filename: &str, image: &DynamicImage) -> anyhow::Result<()> {
        let output_path = self.output_dir.join(filename);
        image
            .save(&output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        debug!("Debug: saved {}", filename);
        Ok(())
    }
}

/// Reject images with no pixels
pub fn ensure_not_empty(image: &DynamicImage) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EffectError::InvalidImage(format!(
            "image has zero area ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Composable pipeline builder
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    debug: Option<DebugConfig>,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    /// Step names in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step on a copy of `input` and return the final image.
    /// Never touches the filesystem, even in debug mode.
    pub fn apply(&self, input: &DynamicImage) -> Result<DynamicImage> {
        let data = execute(&self.steps, input.clone(), |_, _, _| Ok::<(), EffectError>(()))?;
        Ok(data.image)
    }

    /// Run the pipeline, writing every intermediate image when debug mode
    /// is enabled
    pub fn run(&self, input: DynamicImage) -> anyhow::Result<PipelineData> {
        self.run_partial(input, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: DynamicImage, num_steps: usize) -> anyhow::Result<PipelineData> {
        ensure_not_empty(&input)?;

        if let Some(debug_config) = &self.debug {
            debug_config.save("00_input.png", &input)?;
        }

        let steps = &self.steps[..num_steps.min(self.steps.len())];
        execute(steps, input, |index, step_name, data| {
            match &self.debug {
                Some(debug_config) => {
                    debug_config.save(&DebugConfig::step_filename(index, step_name), &data.image)
                }
                None => Ok(()),
            }
        })
    }
}

fn execute<E, F>(
    steps: &[Arc<dyn PipelineStep>],
    input: DynamicImage,
    mut after_step: F,
) -> std::result::Result<PipelineData, E>
where
    E: From<EffectError>,
    F: FnMut(usize, &str, &PipelineData) -> std::result::Result<(), E>,
{
    ensure_not_empty(&input)?;

    let mut data = PipelineData::from_image(input);
    for (step_idx, step) in steps.iter().enumerate() {
        debug!(
            step = step.name(),
            width = data.image.width(),
            height = data.image.height(),
            "Running step"
        );
        data = step.process(data)?;
        after_step(step_idx + 1, step.name(), &data)?;
    }

    Ok(data)
}
