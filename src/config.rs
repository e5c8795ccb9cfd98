//! Render configuration: one immutable parameter bundle per conversion.

use crate::palette::Palette;
use crate::{ConversionError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default output width in characters.
pub const DEFAULT_WIDTH: u32 = 100;
/// Character cells are roughly twice as tall as wide.
pub const DEFAULT_ASPECT_CORRECTION: f32 = 0.55;
pub const DEFAULT_BORDER_WIDTH: u32 = 2;

/// Weight of the normalized edge magnitude when blended back into the image.
pub const EDGE_WEIGHT: f32 = 0.2;
/// Gaussian sigma applied before edge detection.
pub const EDGE_PRE_BLUR_SIGMA: f32 = 0.5;
pub const CONTRAST_FACTOR: f32 = 1.5;
pub const SHARPNESS_FACTOR: f32 = 2.0;
/// Amount added or subtracted by the `dark` / `bright` adjust modes.
pub const BRIGHTNESS_DELTA: i32 = 50;
/// Box radius used for the local average of the adaptive classifier.
pub const ADAPTIVE_RADIUS: u32 = 3;
pub const ADAPTIVE_SLOPE: f32 = 0.3;

/// Brightness adjustment applied to foreground pixels before quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustMode {
    /// Subtract [`BRIGHTNESS_DELTA`], floor 0.
    Bright,
    /// Add [`BRIGHTNESS_DELTA`], ceiling 255.
    Dark,
    #[default]
    None,
}

impl AdjustMode {
    pub fn apply(self, value: u8) -> u8 {
        let v = value as i32;
        match self {
            AdjustMode::Bright => (v - BRIGHTNESS_DELTA).max(0) as u8,
            AdjustMode::Dark => (v + BRIGHTNESS_DELTA).min(255) as u8,
            AdjustMode::None => value,
        }
    }
}

/// Background / foreground classification algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStrategy {
    /// `intensity > tolerance` is background.
    Fixed,
    /// Pixels close to the dominant histogram peak are background.
    #[default]
    Histogram,
    /// Threshold shifted by the local neighborhood average.
    Adaptive,
}

impl BackgroundStrategy {
    /// Tolerance used when the config does not set one.
    pub fn default_tolerance(self) -> i32 {
        match self {
            BackgroundStrategy::Fixed => 240,
            BackgroundStrategy::Histogram => 30,
            BackgroundStrategy::Adaptive => 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Target column count.
    pub width: u32,
    /// Named palette or a literal glyph string.
    pub palette: String,
    pub adjust: AdjustMode,
    pub strategy: BackgroundStrategy,
    /// Classifier tolerance; `None` falls back to the strategy default.
    pub tolerance: Option<i32>,
    /// Glyph for background cells; `None` uses the palette's own fill glyph.
    pub fill_char: Option<char>,
    pub edge_enhancement: bool,
    pub border_cleanup: bool,
    pub border_width: u32,
    pub aspect_correction: f32,
    /// Weight of the edge magnitude blend; 0 disables it.
    pub edge_weight: f32,
    /// Contrast factor around mid-gray; 1 is neutral.
    pub contrast: f32,
    /// Sharpness factor; 1 is neutral.
    pub sharpness: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            palette: "standard".to_string(),
            adjust: AdjustMode::None,
            strategy: BackgroundStrategy::Histogram,
            tolerance: None,
            fill_char: None,
            edge_enhancement: true,
            border_cleanup: true,
            border_width: DEFAULT_BORDER_WIDTH,
            aspect_correction: DEFAULT_ASPECT_CORRECTION,
            edge_weight: EDGE_WEIGHT,
            contrast: CONTRAST_FACTOR,
            sharpness: SHARPNESS_FACTOR,
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| ConversionError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn with_strategy(mut self, strategy: BackgroundStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_tolerance(mut self, tolerance: i32) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_fill_char(mut self, fill: char) -> Self {
        self.fill_char = Some(fill);
        self
    }

    pub fn effective_tolerance(&self) -> i32 {
        self.tolerance.unwrap_or_else(|| self.strategy.default_tolerance())
    }

    /// Check the config and resolve its palette.
    pub fn validate(&self) -> Result<Palette> {
        if self.width == 0 {
            return Err(ConversionError::InvalidConfig(
                "width must be at least 1".to_string(),
            ));
        }
        if !self.aspect_correction.is_finite() || self.aspect_correction <= 0.0 {
            return Err(ConversionError::InvalidConfig(format!(
                "aspect correction must be positive, got {}",
                self.aspect_correction
            )));
        }
        for (name, value) in [
            ("edge weight", self.edge_weight),
            ("contrast", self.contrast),
            ("sharpness", self.sharpness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConversionError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Palette::parse(&self.palette)
    }
}
