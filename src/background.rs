//! Background / subject separation.
//!
//! All strategies assume a bright background: the brighter side of the
//! effective threshold is background.

use crate::config::{BackgroundStrategy, ADAPTIVE_RADIUS, ADAPTIVE_SLOPE};
use crate::palette::{PaletteProfile, PeakRule};
use image::GrayImage;

/// Per-pixel flags, row-major; `true` renders as the fill glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BackgroundMask {
    fn from_fn(gray: &GrayImage, mut f: impl FnMut(u32, u32, u8) -> bool) -> Self {
        let (width, height) = gray.dimensions();
        let cells = gray.enumerate_pixels().map(|(x, y, p)| f(x, y, p.0[0])).collect();
        Self { width, height, cells }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_background(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.width + x) as usize]
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn background_count(&self) -> usize {
        self.cells.iter().filter(|&&bg| bg).count()
    }
}

/// Build the mask with the configured strategy. The palette profile only
/// matters for the histogram strategy.
pub fn classify(
    gray: &GrayImage,
    strategy: BackgroundStrategy,
    tolerance: i32,
    profile: &PaletteProfile,
) -> BackgroundMask {
    match strategy {
        BackgroundStrategy::Fixed => fixed_threshold(gray, tolerance),
        BackgroundStrategy::Histogram => {
            histogram_peak(gray, tolerance as f32 * profile.tolerance_multiplier, profile.peak)
        }
        BackgroundStrategy::Adaptive => adaptive(gray, tolerance, ADAPTIVE_RADIUS),
    }
}

/// Background iff `intensity > tolerance`; equality stays foreground.
pub fn fixed_threshold(gray: &GrayImage, tolerance: i32) -> BackgroundMask {
    BackgroundMask::from_fn(gray, |_, _, v| v as i32 > tolerance)
}

/// Background iff the pixel lies within `tolerance` of the histogram peak.
pub fn histogram_peak(gray: &GrayImage, tolerance: f32, rule: PeakRule) -> BackgroundMask {
    let peak = find_peak(&histogram(gray), rule);
    log::debug!("background peak at intensity {peak}, tolerance {tolerance}");
    BackgroundMask::from_fn(gray, |_, _, v| (v as f32 - peak as f32).abs() <= tolerance)
}

pub fn histogram(gray: &GrayImage) -> [u32; 256] {
    let mut bins = [0u32; 256];
    for p in gray.pixels() {
        bins[p.0[0] as usize] += 1;
    }
    bins
}

/// Tallest populated bin(s) by count, ties broken towards the lower
/// intensity. `LowerOfTopTwo` falls back to the modal bin when only one
/// intensity occurs.
pub fn find_peak(bins: &[u32; 256], rule: PeakRule) -> u8 {
    let mut ranked: Vec<u8> = (0..=255).filter(|&v| bins[v as usize] > 0).collect();
    ranked.sort_by(|&a, &b| bins[b as usize].cmp(&bins[a as usize]).then(a.cmp(&b)));
    match (rule, ranked.as_slice()) {
        (_, []) => 0,
        (PeakRule::LowerOfTopTwo, [first, second, ..]) => (*first).min(*second),
        (_, [first, ..]) => *first,
    }
}

/// Threshold shifted by the local box average:
/// `v/255 > (tol/255) * (1 + slope * (avg/255 - 0.5))`.
pub fn adaptive(gray: &GrayImage, tolerance: i32, radius: u32) -> BackgroundMask {
    let local = box_average(gray, radius);
    let (w, _) = gray.dimensions();
    let base = tolerance as f32 / 255.0;
    BackgroundMask::from_fn(gray, |x, y, v| {
        let avg = local[(y * w + x) as usize] / 255.0;
        let threshold = base * (1.0 + ADAPTIVE_SLOPE * (avg - 0.5));
        v as f32 / 255.0 > threshold
    })
}

/// Mean over a `(2r+1)²` window, clamping coordinates to the image.
fn box_average(gray: &GrayImage, radius: u32) -> Vec<f32> {
    let (w, h) = gray.dimensions();
    let r = radius as i64;
    let window = ((2 * r + 1) * (2 * r + 1)) as f32;
    let mut out = Vec::with_capacity((w * h) as usize);
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let mut sum = 0u32;
            for dy in -r..=r {
                let sy = (y + dy).clamp(0, h as i64 - 1) as u32;
                for dx in -r..=r {
                    let sx = (x + dx).clamp(0, w as i64 - 1) as u32;
                    sum += gray.get_pixel(sx, sy).0[0] as u32;
                }
            }
            out.push(sum as f32 / window);
        }
    }
    out
}
