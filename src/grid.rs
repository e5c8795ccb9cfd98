//! Folding the flat glyph stream back into lines.

use crate::{ConversionError, Result};
use std::fmt;

/// Rendered text art: `height` lines of exactly `width` glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtDocument {
    width: usize,
    rows: Vec<Vec<char>>,
}

impl ArtDocument {
    /// Split `glyphs` every `width` characters.
    pub fn assemble(glyphs: Vec<char>, width: usize) -> Result<Self> {
        if width == 0 || glyphs.is_empty() {
            return Err(ConversionError::EmptyResult);
        }
        if glyphs.len() % width != 0 {
            return Err(ConversionError::InvalidConfig(format!(
                "{} glyphs do not fill rows of {width}",
                glyphs.len()
            )));
        }
        let rows = glyphs.chunks(width).map(<[char]>::to_vec).collect();
        Ok(Self { width, rows })
    }

    /// Overwrite the outer `border` rows and columns with `fill`. Borders
    /// wider than half the grid simply fill everything.
    pub fn clean_border(&mut self, border: usize, fill: char) {
        let height = self.rows.len();
        let width = self.width;
        for (y, row) in self.rows.iter_mut().enumerate() {
            let edge_row = y < border || y >= height.saturating_sub(border);
            for (x, cell) in row.iter_mut().enumerate() {
                if edge_row || x < border || x >= width.saturating_sub(border) {
                    *cell = fill;
                }
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Total glyph count, `width * height`.
    pub fn len(&self) -> usize {
        self.width * self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.iter().collect())
    }
}

impl fmt::Display for ArtDocument {
    /// Lines joined by `\n`, no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}
