//! glyphgrid CLI - Convert images to ASCII or binary text art

use clap::{Parser, ValueEnum};
use glyphgrid::{AdjustMode, ArtDocument, BackgroundStrategy, ConversionError, RenderConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Clone, Copy, ValueEnum)]
enum BgAdjust {
    Bright,
    Dark,
    None,
}

impl From<BgAdjust> for AdjustMode {
    fn from(value: BgAdjust) -> Self {
        match value {
            BgAdjust::Bright => AdjustMode::Bright,
            BgAdjust::Dark => AdjustMode::Dark,
            BgAdjust::None => AdjustMode::None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Fixed,
    Histogram,
    Adaptive,
}

impl From<Strategy> for BackgroundStrategy {
    fn from(value: Strategy) -> Self {
        match value {
            Strategy::Fixed => BackgroundStrategy::Fixed,
            Strategy::Histogram => BackgroundStrategy::Histogram,
            Strategy::Adaptive => BackgroundStrategy::Adaptive,
        }
    }
}

#[derive(Parser)]
#[command(name = "glyphgrid", about = "Convert images to ASCII or binary text art")]
struct Args {
    /// Input image file; repeat to convert several images
    #[arg(short = 'i', long = "image_path", required = true)]
    image_path: Vec<PathBuf>,
    /// Output text file, or output directory when several inputs are given
    #[arg(short = 'o', long = "output_file")]
    output_file: PathBuf,
    /// JSON render config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output width in characters [default: 100]
    #[arg(short, long)]
    width: Option<u32>,
    /// Brightness adjustment for subject pixels
    #[arg(short = 'b', long = "bg_adjust", value_enum)]
    bg_adjust: Option<BgAdjust>,
    /// Background classification tolerance
    #[arg(short, long, allow_negative_numbers = true)]
    tolerance: Option<i32>,
    /// Background classification tolerance (wins over --tolerance)
    #[arg(long = "bg_tolerance", allow_negative_numbers = true)]
    bg_tolerance: Option<i32>,
    /// Background classification algorithm [default: histogram]
    #[arg(long = "bg_strategy", value_enum)]
    bg_strategy: Option<Strategy>,
    /// Glyph for background cells (defaults to the palette's own)
    #[arg(long = "fill_char")]
    fill_char: Option<char>,
    /// standard, detailed, simple, binary, numbers, blocks, blocks2, letters, or a literal glyph string
    #[arg(short = 'c', long = "char_set")]
    char_set: Option<String>,
    /// Row aspect correction (character cells are taller than wide) [default: 0.55]
    #[arg(long)]
    aspect: Option<f32>,
    /// Border rows/columns overwritten by border cleanup [default: 2]
    #[arg(long = "border_width")]
    border_width: Option<u32>,
    /// Disable edge enhancement
    #[arg(long = "no_edge_enhancement")]
    no_edge_enhancement: bool,
    /// Disable border cleanup
    #[arg(long = "no_border_cleanup")]
    no_border_cleanup: bool,
    /// Log pipeline details
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn render_config(&self) -> Result<RenderConfig, ConversionError> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)?,
            None => RenderConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(adjust) = self.bg_adjust {
            config.adjust = adjust.into();
        }
        if let Some(strategy) = self.bg_strategy {
            config.strategy = strategy.into();
        }
        if let Some(tolerance) = self.bg_tolerance.or(self.tolerance) {
            config.tolerance = Some(tolerance);
        }
        if let Some(fill) = self.fill_char {
            config.fill_char = Some(fill);
        }
        if let Some(palette) = &self.char_set {
            config.palette = palette.clone();
        }
        if let Some(aspect) = self.aspect {
            config.aspect_correction = aspect;
        }
        if let Some(border) = self.border_width {
            config.border_width = border;
        }
        if self.no_edge_enhancement {
            config.edge_enhancement = false;
        }
        if self.no_border_cleanup {
            config.border_cleanup = false;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            log::error!("Failed to generate text art for {failed} of {} images", args.image_path.len());
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("Failed to generate text art: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns the number of inputs that failed in batch mode.
fn run(args: &Args) -> Result<usize, ConversionError> {
    let config = args.render_config()?;
    log::debug!("render config: {config:?}");

    if let [input] = args.image_path.as_slice() {
        let doc = glyphgrid::convert(input, &config)?;
        write_document(&args.output_file, &doc)?;
        println!("Text art saved to {}", args.output_file.display());
        return Ok(0);
    }

    config.validate()?;
    std::fs::create_dir_all(&args.output_file)?;
    let results = glyphgrid::convert_batch(&args.image_path, &config)?;
    let mut failed = 0;
    for (input, result) in args.image_path.iter().zip(results) {
        match result {
            Ok(doc) => {
                let out = batch_output_path(&args.output_file, input);
                write_document(&out, &doc)?;
                println!("Text art saved to {}", out.display());
            }
            Err(e) => {
                log::error!("{}: {e}", input.display());
                failed += 1;
            }
        }
    }
    Ok(failed)
}

fn write_document(path: &Path, doc: &ArtDocument) -> std::io::Result<()> {
    std::fs::write(path, format!("{doc}\n"))
}

/// `<dir>/<input stem>.txt`
fn batch_output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    dir.join(format!("{}.txt", stem.to_string_lossy()))
}
