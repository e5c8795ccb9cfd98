//! Scaling to the output grid with character aspect-ratio correction.

use crate::{ConversionError, Result};
use image::{imageops, GrayImage};

/// Row count for a `target_width`-column rendering of a `width × height`
/// image: `round(target_width * height / width * aspect)`, at least 1.
pub fn target_height(width: u32, height: u32, target_width: u32, aspect: f32) -> u32 {
    let rows = target_width as f64 * height as f64 / width as f64 * aspect as f64;
    (rows.round() as u32).max(1)
}

/// Lanczos3 resample to `target_width` columns. Images already at the target
/// size are returned untouched.
pub fn resize(gray: &GrayImage, target_width: u32, aspect: f32) -> Result<GrayImage> {
    if target_width == 0 {
        return Err(ConversionError::InvalidConfig(
            "width must be at least 1".to_string(),
        ));
    }
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(ConversionError::EmptyResult);
    }

    let out_h = target_height(w, h, target_width, aspect);
    if (target_width, out_h) == (w, h) {
        return Ok(gray.clone());
    }
    Ok(imageops::resize(gray, target_width, out_h, imageops::FilterType::Lanczos3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn height_follows_aspect_and_rounds_half_up() {
        assert_eq!(target_height(640, 480, 80, 0.55), 33);
        assert_eq!(target_height(200, 100, 10, 0.5), 3);
        assert_eq!(target_height(300, 300, 10, 0.55), 6);
    }

    #[test]
    fn height_never_drops_to_zero() {
        assert_eq!(target_height(10_000, 1, 3, 0.55), 1);
    }

    #[test]
    fn resize_produces_target_dimensions() {
        let src = GrayImage::from_fn(64, 48, |x, y| Luma([(x + y) as u8]));
        let out = resize(&src, 16, 0.5).unwrap();
        assert_eq!(out.dimensions(), (16, 6));
    }

    #[test]
    fn same_size_is_identity() {
        let src = GrayImage::from_raw(2, 2, vec![0, 255, 0, 255]).unwrap();
        assert_eq!(resize(&src, 2, 1.0).unwrap(), src);
    }

    #[test]
    fn zero_width_is_invalid() {
        let src = GrayImage::new(4, 4);
        assert!(matches!(resize(&src, 0, 0.55), Err(ConversionError::InvalidConfig(_))));
    }

    #[test]
    fn empty_source_is_an_empty_result() {
        let src = GrayImage::new(0, 0);
        assert!(matches!(resize(&src, 10, 0.55), Err(ConversionError::EmptyResult)));
    }
}
