//! Text layout
//!
//! Wrapping and scrollback windowing for fixed-width rows. Everything here
//! is a pure function of the buffer and the metrics, recomputed on every
//! redraw.

use serde::{Deserialize, Serialize};

/// Fixed font and spacing metrics, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    /// Glyph height
    pub font_size: f32,
    /// Horizontal advance as a fraction of `font_size`
    pub advance_ratio: f32,
    /// Distance between baselines
    pub line_height: f32,
    /// Left margin, also reserved on the right and at the bottom
    pub margin: f32,
    /// Baseline of the first row
    pub top_offset: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            advance_ratio: 0.6,
            line_height: 18.0,
            margin: 8.0,
            top_offset: 20.0,
        }
    }
}

impl TextMetrics {
    /// Horizontal advance per character
    pub fn advance(&self) -> f32 {
        self.font_size * self.advance_ratio
    }

    /// Characters per row for a surface width, never less than one
    pub fn max_chars(&self, width: u32) -> usize {
        let usable = width as f32 - self.margin * 2.0;
        ((usable / self.advance()).floor() as usize).max(1)
    }

    /// Rows that fit under the top offset and above the bottom margin
    pub fn max_rows(&self, height: u32) -> usize {
        let usable = height as f32 - self.top_offset - self.margin;
        (usable / self.line_height).floor() as usize
    }

    /// Baseline y of a row
    pub fn baseline(&self, row: usize) -> i32 {
        (self.top_offset + row as f32 * self.line_height).round() as i32
    }

    /// Pen x of a column
    pub fn column_x(&self, col: usize) -> i32 {
        (self.margin + col as f32 * self.advance()).round() as i32
    }

    /// Lay out a buffer for a surface of the given size
    pub fn layout<'a, S: AsRef<str>>(&self, lines: &'a [S], width: u32, height: u32) -> TextLayout<'a> {
        let max_chars = self.max_chars(width);
        let max_rows = self.max_rows(height);
        let rows = wrap_lines(lines, max_chars);
        let start = rows.len().saturating_sub(max_rows);
        TextLayout {
            rows,
            start,
            max_chars,
            max_rows,
        }
    }
}

/// Wrapped rows plus the visible window over them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout<'a> {
    rows: Vec<&'a str>,
    start: usize,
    /// Characters per row
    pub max_chars: usize,
    /// Rows in the window
    pub max_rows: usize,
}

impl<'a> TextLayout<'a> {
    /// Every wrapped row, including those scrolled out of view
    pub fn all_rows(&self) -> &[&'a str] {
        &self.rows
    }

    /// The rows that are drawn, oldest first
    pub fn visible(&self) -> &[&'a str] {
        &self.rows[self.start..]
    }

    /// Row index of the prompt, directly under the last drawn row
    pub fn prompt_row(&self) -> usize {
        self.visible().len()
    }
}

/// Split one line into chunks of at most `max_chars` characters.
///
/// An empty line yields no chunks. Concatenating the chunks gives back the
/// original line.
pub fn wrap_line(line: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let split = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(idx, _)| idx);
        let (chunk, tail) = rest.split_at(split);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

/// Wrap every line, preserving line order and intra-line order
pub fn wrap_lines<S: AsRef<str>>(lines: &[S], max_chars: usize) -> Vec<&str> {
    lines
        .iter()
        .flat_map(|line| wrap_line(line.as_ref(), max_chars))
        .collect()
}

/// The last `max_rows` rows, in original order
pub fn window<T>(rows: &[T], max_rows: usize) -> &[T] {
    &rows[rows.len().saturating_sub(max_rows)..]
}
