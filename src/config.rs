use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EffectError, Result};

/// Hysteresis thresholds for the Canny edge detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeThresholds {
    pub low: f32,
    pub high: f32,
}

impl EdgeThresholds {
    pub fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(EffectError::InvalidParameter(format!(
                "edge thresholds must be finite, got {}/{}",
                self.low, self.high
            )));
        }
        if self.low < 0.0 || self.high < 0.0 {
            return Err(EffectError::InvalidParameter(format!(
                "edge thresholds must be non-negative, got {}/{}",
                self.low, self.high
            )));
        }
        if self.low > self.high {
            return Err(EffectError::InvalidParameter(format!(
                "low edge threshold {} exceeds high threshold {}",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 150.0,
        }
    }
}

/// Tunable constants shared by every effect.
///
/// Every field has a default, so a TOML file only needs the keys it wants to
/// change:
///
/// ```toml
/// threshold_cutoff = 128
///
/// [edge]
/// low = 100.0
/// high = 200.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Canny thresholds used by edge detection and contour highlighting
    pub edge: EdgeThresholds,
    /// Cutoff for the `threshold` effect
    pub threshold_cutoff: i32,
    /// Cutoff for the `tattoo_binarize` effect
    pub tattoo_cutoff: i32,
    /// Level count for the `posterize` effect
    pub posterize_levels: i32,
    /// Gaussian kernel width for the `sketch` effect (odd)
    pub sketch_kernel_size: u32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            edge: EdgeThresholds::default(),
            threshold_cutoff: 127,
            tattoo_cutoff: 128,
            posterize_levels: 4,
            sketch_kernel_size: 21,
        }
    }
}

impl EffectConfig {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config = Self::from_toml_str(&data)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(data: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_threshold_cutoff(mut self, cutoff: i32) -> Self {
        self.threshold_cutoff = cutoff;
        self
    }

    pub fn with_posterize_levels(mut self, levels: i32) -> Self {
        self.posterize_levels = levels;
        self
    }

    pub fn with_edge_thresholds(mut self, edge: EdgeThresholds) -> Self {
        self.edge = edge;
        self
    }

    /// Report the first value outside its domain
    pub fn validate(&self) -> Result<()> {
        self.edge.validate()?;
        validate_cutoff(self.threshold_cutoff)?;
        validate_cutoff(self.tattoo_cutoff)?;
        validate_levels(self.posterize_levels)?;
        validate_kernel_size(self.sketch_kernel_size)?;
        Ok(())
    }
}

pub(crate) fn validate_cutoff(cutoff: i32) -> Result<u8> {
    u8::try_from(cutoff).map_err(|_| {
        EffectError::InvalidParameter(format!("cutoff must be within 0..=255, got {}", cutoff))
    })
}

pub(crate) fn validate_levels(levels: i32) -> Result<u32> {
    // 256 / levels must leave a non-zero step
    if !(1..=256).contains(&levels) {
        return Err(EffectError::InvalidParameter(format!(
            "posterize levels must be within 1..=256, got {}",
            levels
        )));
    }
    Ok(levels as u32)
}

pub(crate) fn validate_kernel_size(size: u32) -> Result<u32> {
    if size == 0 || size % 2 == 0 {
        return Err(EffectError::InvalidParameter(format!(
            "blur kernel size must be a positive odd number, got {}",
            size
        )));
    }
    Ok(size)
}
