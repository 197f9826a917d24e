use crate::config::EdgeThresholds;
use crate::effects::{contours, preprocessing};
use crate::error::Result;
use crate::pipeline::{MetadataValue, PipelineData, PipelineStep};
use image::DynamicImage;
use tracing::debug;

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, data: PipelineData) -> Result<PipelineData> {
        let gray = preprocessing::to_grayscale(&data.image);
        Ok(data.with_image(DynamicImage::ImageLuma8(gray)))
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Invert intensities
pub struct InvertStep;

impl PipelineStep for InvertStep {
    fn process(&self, data: PipelineData) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let inverted = preprocessing::invert(&gray);
        Ok(data.with_image(DynamicImage::ImageLuma8(inverted)))
    }

    fn name(&self) -> &str {
        "Invert"
    }
}

/// Apply Gaussian blur with a fixed kernel
pub struct GaussianBlurStep {
    pub kernel_size: u32,
}

impl PipelineStep for GaussianBlurStep {
    fn process(&self, data: PipelineData) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let blurred = preprocessing::apply_blur(&gray, self.kernel_size)?;
        Ok(data.with_image(DynamicImage::ImageLuma8(blurred)))
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Blend the grayscale original with the current (blurred, inverted) image
/// to get a pencil-sketch look
pub struct ColorDodgeStep;

impl PipelineStep for ColorDodgeStep {
    fn process(&self, data: PipelineData) -> Result<PipelineData> {
        let base = preprocessing::to_grayscale(&data.original);
        let blend = data.image.to_luma8();
        let sketch = preprocessing::color_dodge(&base, &blend);
        Ok(data.with_image(DynamicImage::ImageLuma8(sketch)))
    }

    fn name(&self) -> &str {
        "Color Dodge"
    }
}

/// Detect edges using Canny
pub struct EdgeDetectionStep {
    pub thresholds: EdgeThresholds,
}

impl PipelineStep for EdgeDetectionStep {
    fn process(&self, data: PipelineData) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let edges =
            preprocessing::detect_edges(&gray, self.thresholds.low, self.thresholds.high);
        let edge_pixels = edges.pixels().filter(|p| p[0] > 0).count();
        let edge_fraction = edge_pixels as f32 / (edges.width() as usize * edges.height() as usize) as f32;
        Ok(data
            .with_image(DynamicImage::ImageLuma8(edges))
            .with_metadata("edge_fraction", MetadataValue::Float(edge_fraction)))
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Binarize around a cutoff
pub struct ThresholdStep {
    pub cutoff: u8,
}

impl PipelineStep for ThresholdStep {
    fn process(&self, data: PipelineData) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let binary = preprocessing::binarize(&gray, self.cutoff);
        Ok(data.with_image(DynamicImage::ImageLuma8(binary)))
    }

    fn name(&self) -> &str {
        "Threshold"
    }
}

/// Reduce intensities to a fixed number of levels
pub struct PosterizeStep {
    /// Must be within 1..=256
    pub levels: u32,
}

impl PipelineStep for PosterizeStep {
    fn process(&self, data: PipelineData) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let poster = preprocessing::quantize(&gray, self.levels);
        Ok(data
            .with_image(DynamicImage::ImageLuma8(poster))
            .with_metadata("posterize_step", MetadataValue::Int((256 / self.levels) as i64)))
    }

    fn name(&self) -> &str {
        "Posterize"
    }
}

/// Trace contours in an edge image and draw them onto a black canvas the
/// size of the original input
pub struct ContourDrawStep;

impl PipelineStep for ContourDrawStep {
    fn process(&self, data: PipelineData) -> Result<PipelineData> {
        let edges = data.image.to_luma8();
        let found = contours::find_contours(&edges);
        let holes = contours::count_holes(&found);
        debug!(contours = found.len(), holes, "Contours traced");

        let canvas = contours::draw_contours(data.original.width(), data.original.height(), &found);
        Ok(data
            .with_image(DynamicImage::ImageRgb8(canvas))
            .with_metadata("contour_count", MetadataValue::Int(found.len() as i64))
            .with_metadata("hole_count", MetadataValue::Int(holes as i64)))
    }

    fn name(&self) -> &str {
        "Contour Drawing"
    }
}
