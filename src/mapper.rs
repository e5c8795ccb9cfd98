//! Intensity to glyph quantization.

use crate::background::BackgroundMask;
use crate::config::AdjustMode;
use crate::palette::Palette;
use image::GrayImage;

/// Map every pixel in raster order to a glyph. Background cells become
/// `fill`; the result has `width * height` entries.
pub fn map_pixels(
    gray: &GrayImage,
    mask: &BackgroundMask,
    palette: &Palette,
    adjust: AdjustMode,
    fill: char,
) -> Vec<char> {
    gray.pixels()
        .zip(mask.cells())
        .map(|(p, &background)| {
            if background {
                fill
            } else {
                palette.glyph_for(adjusted_value(p.0[0], palette, adjust))
            }
        })
        .collect()
}

/// Brightness adjust, then the palette's gamma and contrast remap.
pub fn adjusted_value(value: u8, palette: &Palette, adjust: AdjustMode) -> u8 {
    let profile = palette.profile();
    let mut v = adjust.apply(value);
    if let Some(gamma) = profile.gamma {
        v = apply_gamma(v, gamma);
    }
    if let Some(remap) = &profile.remap {
        v = remap.apply(v);
    }
    v
}

/// `255 * (v / 255)^gamma`
pub fn apply_gamma(value: u8, gamma: f32) -> u8 {
    (255.0 * (value as f32 / 255.0).powf(gamma)).round().clamp(0.0, 255.0) as u8
}
