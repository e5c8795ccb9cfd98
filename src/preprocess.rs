//! Grayscale conversion and optional enhancement before resizing.
//!
//! Every pass is a fixed-factor transform, so the result depends only on the
//! input pixels.

use crate::config::{RenderConfig, EDGE_PRE_BLUR_SIGMA};
use image::{DynamicImage, GrayImage, Luma};

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
// Center-weighted smoothing used as the "blurred" side of the sharpness blend
const SMOOTH: [[f32; 3]; 3] = [
    [1.0 / 13.0, 1.0 / 13.0, 1.0 / 13.0],
    [1.0 / 13.0, 5.0 / 13.0, 1.0 / 13.0],
    [1.0 / 13.0, 1.0 / 13.0, 1.0 / 13.0],
];

/// ITU-R BT.601 luma, `(299 R + 587 G + 114 B) / 1000`. Alpha is ignored.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    let (w, h) = rgb.dimensions();
    let luma = rgb
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0.map(u32::from);
            ((299 * r + 587 * g + 114 * b) / 1000) as u8
        })
        .collect();
    // Buffer length is exactly w * h
    GrayImage::from_raw(w, h, luma).unwrap_or_else(|| GrayImage::new(w, h))
}

/// Edge enhancement, contrast stretch and sharpening, in that order, with
/// the factors from `config`.
pub fn enhance(gray: &GrayImage, config: &RenderConfig) -> GrayImage {
    let edged = enhance_edges(gray, config.edge_weight);
    let contrasted = stretch_contrast(&edged, config.contrast);
    sharpen(&contrasted, config.sharpness)
}

/// Blend the normalized Sobel magnitude of a lightly blurred copy back into
/// the image.
pub fn enhance_edges(gray: &GrayImage, weight: f32) -> GrayImage {
    let (w, h) = gray.dimensions();
    let samples: Vec<f32> = gray.pixels().map(|Luma([v])| *v as f32).collect();
    let blurred = convolve3x3(&samples, w, h, &gaussian3x3(EDGE_PRE_BLUR_SIGMA));
    let gx = convolve3x3(&blurred, w, h, &SOBEL_X);
    let gy = convolve3x3(&blurred, w, h, &SOBEL_Y);

    let magnitude: Vec<f32> = gx.iter().zip(&gy).map(|(x, y)| x.hypot(*y)).collect();
    let (min, max) = magnitude
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &m| (lo.min(m), hi.max(m)));
    let range = max - min;

    let mut out = gray.clone();
    // Less than one gray level of gradient anywhere: nothing to enhance
    if range < 1.0 {
        return out;
    }
    for (pixel, m) in out.pixels_mut().zip(&magnitude) {
        let normalized = (m - min) / range;
        pixel.0[0] = to_u8(pixel.0[0] as f32 + normalized * weight * 255.0);
    }
    out
}

/// Multiplicative contrast around mid-gray.
pub fn stretch_contrast(gray: &GrayImage, factor: f32) -> GrayImage {
    let mut out = gray.clone();
    for pixel in out.pixels_mut() {
        pixel.0[0] = to_u8(128.0 + factor * (pixel.0[0] as f32 - 128.0));
    }
    out
}

/// Unsharp-mask style blend: `smooth + factor * (original - smooth)`.
pub fn sharpen(gray: &GrayImage, factor: f32) -> GrayImage {
    let (w, h) = gray.dimensions();
    let samples: Vec<f32> = gray.pixels().map(|Luma([v])| *v as f32).collect();
    let smooth = convolve3x3(&samples, w, h, &SMOOTH);
    let mut out = gray.clone();
    for (pixel, s) in out.pixels_mut().zip(&smooth) {
        pixel.0[0] = to_u8(s + factor * (pixel.0[0] as f32 - s));
    }
    out
}

/// Normalized 3×3 Gaussian. Taps beyond one pixel are negligible for the
/// small sigmas used here.
fn gaussian3x3(sigma: f32) -> [[f32; 3]; 3] {
    let side = (-1.0 / (2.0 * sigma * sigma)).exp();
    let taps = [side, 1.0, side];
    let total: f32 = taps.iter().sum::<f32>().powi(2);
    let mut kernel = [[0.0; 3]; 3];
    for (ky, row) in kernel.iter_mut().enumerate() {
        for (kx, k) in row.iter_mut().enumerate() {
            *k = taps[ky] * taps[kx] / total;
        }
    }
    kernel
}

/// 3×3 correlation over a row-major `w × h` buffer, clamping to the edge.
fn convolve3x3(samples: &[f32], w: u32, h: u32, kernel: &[[f32; 3]; 3]) -> Vec<f32> {
    let (w, h) = (w as i64, h as i64);
    let mut out = Vec::with_capacity(samples.len());
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (ky, row) in kernel.iter().enumerate() {
                let sy = (y + ky as i64 - 1).clamp(0, h - 1);
                for (kx, k) in row.iter().enumerate() {
                    let sx = (x + kx as i64 - 1).clamp(0, w - 1);
                    acc += k * samples[(sy * w + sx) as usize];
                }
            }
            out.push(acc);
        }
    }
    out
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
