//! Image to ASCII / binary text art converter.
//!
//! The pipeline runs strictly forward: load, preprocess, resize, classify
//! background, map glyphs, assemble lines. Each conversion is a pure function
//! of the image and its [`RenderConfig`].

pub mod background;
pub mod config;
pub mod grid;
pub mod loader;
pub mod mapper;
pub mod palette;
pub mod preprocess;
pub mod resize;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{AdjustMode, BackgroundStrategy, RenderConfig};
pub use grid::ArtDocument;
pub use palette::Palette;

use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Unable to open image file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Conversion produced no output")]
    EmptyResult,
    #[error("Config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

/// A validated config with its palette resolved, reusable across images.
pub struct Converter {
    config: RenderConfig,
    palette: Palette,
}

impl Converter {
    pub fn new(config: RenderConfig) -> Result<Self> {
        let palette = config.validate()?;
        Ok(Self { config, palette })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Glyph written into background cells and the cleaned border.
    pub fn fill_char(&self) -> char {
        self.config.fill_char.unwrap_or(self.palette.profile().fill)
    }

    pub fn convert(&self, image: &DynamicImage) -> Result<ArtDocument> {
        let config = &self.config;
        let mut gray = preprocess::to_grayscale(image);
        log::debug!("source size {}x{}", gray.width(), gray.height());
        if config.edge_enhancement {
            gray = preprocess::enhance(&gray, config);
        }

        let gray = resize::resize(&gray, config.width, config.aspect_correction)?;
        log::debug!("resized to {}x{}", gray.width(), gray.height());

        let mask = background::classify(
            &gray,
            config.strategy,
            config.effective_tolerance(),
            self.palette.profile(),
        );
        let fill = self.fill_char();
        let glyphs = mapper::map_pixels(&gray, &mask, &self.palette, config.adjust, fill);

        let mut doc = ArtDocument::assemble(glyphs, gray.width() as usize)?;
        if config.border_cleanup {
            doc.clean_border(config.border_width as usize, fill);
        }
        Ok(doc)
    }

    pub fn convert_path(&self, path: impl AsRef<Path>) -> Result<ArtDocument> {
        self.convert(&loader::load(path)?)
    }
}

/// Load `path` and render it with `config`.
pub fn convert(path: impl AsRef<Path>, config: &RenderConfig) -> Result<ArtDocument> {
    Converter::new(config.clone())?.convert_path(path)
}

pub fn convert_image(image: &DynamicImage, config: &RenderConfig) -> Result<ArtDocument> {
    Converter::new(config.clone())?.convert(image)
}

/// Convert independent images in parallel. Results keep the input order.
#[cfg(not(target_arch = "wasm32"))]
pub fn convert_batch<P>(paths: &[P], config: &RenderConfig) -> Result<Vec<Result<ArtDocument>>>
where
    P: AsRef<Path> + Sync,
{
    use rayon::prelude::*;

    let converter = Converter::new(config.clone())?;
    Ok(paths.par_iter().map(|p| converter.convert_path(p)).collect())
}
