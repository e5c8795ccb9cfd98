//! End-to-end conversions through image files on disk.

use glyphgrid::{
    convert, convert_batch, resize::target_height, AdjustMode, BackgroundStrategy,
    ConversionError, RenderConfig,
};
use image::{GrayImage, Luma};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn save(dir: &TempDir, name: &str, image: &GrayImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save(&path).unwrap();
    path
}

fn gradient(w: u32, h: u32) -> GrayImage {
    GrayImage::from_fn(w, h, |x, y| Luma([((x * 255 / w.max(1)) ^ (y * 3)) as u8]))
}

#[test]
fn white_image_is_all_background() {
    let dir = TempDir::new().unwrap();
    let path = save(&dir, "white.png", &GrayImage::from_pixel(300, 300, Luma([255])));
    let config = RenderConfig {
        adjust: AdjustMode::None,
        ..RenderConfig::default()
    }
    .with_width(10)
    .with_palette("binary")
    .with_strategy(BackgroundStrategy::Fixed)
    .with_tolerance(30)
    .with_fill_char(' ');

    let doc = convert(&path, &config).unwrap();
    assert_eq!(doc.width(), 10);
    assert_eq!(doc.height(), 6);
    for line in doc.lines() {
        assert_eq!(line, " ".repeat(10));
    }
}

fn two_by_two_config() -> RenderConfig {
    RenderConfig {
        edge_enhancement: false,
        border_cleanup: false,
        aspect_correction: 1.0,
        ..RenderConfig::default()
    }
    .with_width(2)
    .with_palette("AB")
    .with_strategy(BackgroundStrategy::Histogram)
    .with_tolerance(-1)
}

#[test]
fn checker_columns_map_one_to_one_without_aspect_squash() {
    let dir = TempDir::new().unwrap();
    let img = GrayImage::from_raw(2, 2, vec![0, 255, 0, 255]).unwrap();
    let path = save(&dir, "cols.png", &img);

    let doc = convert(&path, &two_by_two_config()).unwrap();
    assert_eq!(doc.to_string(), "AB\nAB");
}

#[test]
fn checker_columns_with_default_aspect_collapse_to_one_row() {
    let dir = TempDir::new().unwrap();
    let img = GrayImage::from_raw(2, 2, vec![0, 255, 0, 255]).unwrap();
    let path = save(&dir, "cols.png", &img);

    let config = RenderConfig {
        aspect_correction: 0.55,
        ..two_by_two_config()
    };
    let doc = convert(&path, &config).unwrap();
    assert_eq!(doc.to_string(), "AB");
}

#[test]
fn every_line_has_the_target_width() {
    let dir = TempDir::new().unwrap();
    let path = save(&dir, "gradient.png", &gradient(173, 91));

    for palette in ["standard", "detailed", "simple", "binary", "numbers", "blocks", "blocks2", "letters", "xo"] {
        for strategy in [
            BackgroundStrategy::Fixed,
            BackgroundStrategy::Histogram,
            BackgroundStrategy::Adaptive,
        ] {
            let config = RenderConfig::default()
                .with_width(37)
                .with_palette(palette)
                .with_strategy(strategy);
            let doc = convert(&path, &config).unwrap();
            let expected_rows = target_height(173, 91, 37, config.aspect_correction) as usize;

            let text = doc.to_string();
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines.len(), expected_rows, "{palette} {strategy:?}");
            assert!(lines.iter().all(|l| l.chars().count() == 37), "{palette} {strategy:?}");
            let total: usize = lines.iter().map(|l| l.chars().count()).sum();
            assert_eq!(total, doc.width() * doc.height());
        }
    }
}

#[test]
fn tiny_image_still_produces_a_row() {
    let dir = TempDir::new().unwrap();
    let path = save(&dir, "dot.png", &GrayImage::from_pixel(1, 1, Luma([10])));
    let doc = convert(&path, &RenderConfig::default().with_width(5)).unwrap();
    assert_eq!(doc.width(), 5);
    assert_eq!(doc.height(), 3);
}

#[test]
fn dark_subject_on_white_keeps_the_subject() {
    let dir = TempDir::new().unwrap();
    let img = GrayImage::from_fn(40, 40, |x, y| {
        let inside = (10..30).contains(&x) && (10..30).contains(&y);
        Luma([if inside { 0 } else { 255 }])
    });
    let path = save(&dir, "square.png", &img);
    let config = RenderConfig {
        edge_enhancement: false,
        border_cleanup: false,
        aspect_correction: 1.0,
        ..RenderConfig::default()
    }
    .with_width(40)
    .with_palette("standard");

    let doc = convert(&path, &config).unwrap();
    let rows = doc.rows();
    assert_eq!(rows[0][0], ' ');
    assert_eq!(rows[20][20], '@');
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = convert(dir.path().join("nope.png"), &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, ConversionError::Load { .. }));
}

#[test]
fn invalid_width_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = save(&dir, "g.png", &gradient(10, 10));
    let err = convert(&path, &RenderConfig::default().with_width(0)).unwrap_err();
    assert!(matches!(err, ConversionError::InvalidConfig(_)));
}

#[test]
fn batch_keeps_input_order_and_isolates_failures() {
    let dir = TempDir::new().unwrap();
    let a = save(&dir, "a.png", &gradient(50, 20));
    let b = dir.path().join("missing.png");
    let c = save(&dir, "c.png", &gradient(20, 50));
    let config = RenderConfig::default().with_width(12);

    let results = convert_batch(&[a.clone(), b, c.clone()], &config).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap(), &convert(&a, &config).unwrap());
    assert!(matches!(results[1], Err(ConversionError::Load { .. })));
    assert_eq!(results[2].as_ref().unwrap(), &convert(&c, &config).unwrap());
}

#[test]
fn batch_rejects_bad_config_up_front() {
    let config = RenderConfig::default().with_palette("x");
    let paths: [PathBuf; 0] = [];
    assert!(matches!(convert_batch(&paths, &config), Err(ConversionError::InvalidConfig(_))));
}

#[test]
fn json_config_file_drives_conversion() {
    let dir = TempDir::new().unwrap();
    let path = save(&dir, "white.png", &GrayImage::from_pixel(64, 64, Luma([255])));
    let config_path = dir.path().join("render.json");
    std::fs::write(
        &config_path,
        r#"{"width": 8, "palette": "letters", "strategy": "fixed", "tolerance": 100}"#,
    )
    .unwrap();

    let config = RenderConfig::from_json_file(&config_path).unwrap();
    let doc = convert(&path, &config).unwrap();
    // letters fills background with '.'
    assert!(doc.lines().all(|l| l == "........"));
}

#[test]
fn conversion_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = save(&dir, "g.png", &gradient(120, 80));
    let config = RenderConfig::default().with_width(30).with_palette("detailed");
    assert_eq!(convert(&path, &config).unwrap(), convert(&path, &config).unwrap());
}

#[test]
fn white_image_is_all_fill_with_two_peak_palette() {
    let dir = TempDir::new().unwrap();
    let path = save(&dir, "white.png", &GrayImage::from_pixel(40, 40, Luma([255])));
    let config = RenderConfig {
        edge_enhancement: false,
        border_cleanup: false,
        ..RenderConfig::default()
    }
    .with_width(8)
    .with_palette("letters")
    .with_strategy(BackgroundStrategy::Histogram);

    let doc = convert(&path, &config).unwrap();
    for line in doc.lines() {
        assert_eq!(line, ".".repeat(8));
    }
}
