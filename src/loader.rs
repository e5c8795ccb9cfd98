//! Image decoding.

use crate::{ConversionError, Result};
use image::DynamicImage;
use std::path::Path;

/// Decode any raster format `image` supports. Reporting is left to the caller.
pub fn load(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|source| ConversionError::Load {
        path: path.to_path_buf(),
        source,
    })
}
