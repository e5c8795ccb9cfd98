//! Glyph palettes and the per-palette rendering profile.
//!
//! Glyphs are ordered so that index 0 is the densest ink and maps to the
//! darkest intensities.

use crate::{ConversionError, Result};

/// How the histogram classifier picks the background intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakRule {
    /// The tallest bin.
    Modal,
    /// The lower intensity of the two tallest bins.
    LowerOfTopTwo,
}

/// Linear stretch `(v - offset) * gain` clamped to [0, 255], then
/// hard-clamped to 0 below `floor_below` and to 255 above `ceil_above`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastRemap {
    pub offset: f32,
    pub gain: f32,
    pub floor_below: u8,
    pub ceil_above: u8,
}

impl ContrastRemap {
    pub fn apply(&self, value: u8) -> u8 {
        let stretched = ((value as f32 - self.offset) * self.gain).clamp(0.0, 255.0) as u8;
        if stretched > self.ceil_above {
            255
        } else if stretched < self.floor_below {
            0
        } else {
            stretched
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteProfile {
    /// Glyph used for background cells unless the config overrides it.
    pub fill: char,
    pub peak: PeakRule,
    /// Scales the histogram classifier tolerance.
    pub tolerance_multiplier: f32,
    pub gamma: Option<f32>,
    pub remap: Option<ContrastRemap>,
}

const PLAIN: PaletteProfile = PaletteProfile {
    fill: ' ',
    peak: PeakRule::Modal,
    tolerance_multiplier: 1.0,
    gamma: None,
    remap: None,
};

const BLOCKS: PaletteProfile = PaletteProfile {
    remap: Some(ContrastRemap { offset: 32.0, gain: 1.5, floor_below: 0, ceil_above: 255 }),
    ..PLAIN
};

const NAMED: &[(&str, &str, PaletteProfile)] = &[
    ("standard", "@%#*+=-:. ", PLAIN),
    (
        "detailed",
        r#"$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\|()1{}[]?-_+~<>i!lI;:,"^`'. "#,
        PaletteProfile { gamma: Some(1.2), ..PLAIN },
    ),
    ("simple", "#@%-. ", PLAIN),
    (
        "binary",
        "10",
        PaletteProfile {
            fill: '0',
            remap: Some(ContrastRemap { offset: 0.0, gain: 1.0, floor_below: 128, ceil_above: 127 }),
            ..PLAIN
        },
    ),
    (
        "numbers",
        "8846923570",
        PaletteProfile {
            fill: '0',
            peak: PeakRule::LowerOfTopTwo,
            tolerance_multiplier: 1.2,
            gamma: None,
            remap: Some(ContrastRemap { offset: 32.0, gain: 1.6, floor_below: 50, ceil_above: 200 }),
        },
    ),
    ("blocks", "█▆▄▃▂▁ ", BLOCKS),
    ("blocks2", "██▛▌▖  ", BLOCKS),
    (
        "letters",
        r#"MWBHNXKAVREDCJLITP@SZFQUG#=+<>~^",:. "#,
        PaletteProfile {
            fill: '.',
            peak: PeakRule::LowerOfTopTwo,
            tolerance_multiplier: 1.5,
            gamma: None,
            remap: Some(ContrastRemap { offset: 32.0, gain: 1.7, floor_below: 70, ceil_above: 180 }),
        },
    ),
];

/// Names accepted by [`Palette::parse`] besides literal glyph strings.
pub fn names() -> impl Iterator<Item = &'static str> {
    NAMED.iter().map(|(name, _, _)| *name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: Option<&'static str>,
    glyphs: Vec<char>,
    profile: PaletteProfile,
}

impl Palette {
    /// Resolve a palette name, or treat the string as a literal glyph ramp.
    pub fn parse(spec: &str) -> Result<Self> {
        if let Some((name, glyphs, profile)) = NAMED.iter().find(|(name, _, _)| *name == spec) {
            return Ok(Self { name: Some(*name), glyphs: glyphs.chars().collect(), profile: *profile });
        }
        Self::custom(spec)
    }

    pub fn custom(glyphs: &str) -> Result<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.len() < 2 {
            return Err(ConversionError::InvalidConfig(format!(
                "palette needs at least 2 glyphs, got {}",
                glyphs.len()
            )));
        }
        Ok(Self { name: None, glyphs, profile: PLAIN })
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn profile(&self) -> &PaletteProfile {
        &self.profile
    }

    /// `floor(value * len / 256)`, clamped to the last glyph.
    pub fn index_of(&self, value: u8) -> usize {
        (value as usize * self.glyphs.len() / 256).min(self.glyphs.len() - 1)
    }

    pub fn glyph_for(&self, value: u8) -> char {
        self.glyphs[self.index_of(value)]
    }
}
