//! Output buffer
//!
//! The ordered list of display lines the interpreter writes and the
//! rasterizer reads. Lines are never pruned: the visible window is computed
//! at render time, so the buffer only shrinks when it is replaced wholesale.

use serde::{Deserialize, Serialize};

/// Append-only sequence of display lines, replaceable wholesale
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputBuffer {
    lines: Vec<String>,
}

impl OutputBuffer {
    /// Create a buffer holding only the header line
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            lines: vec![header.into()],
        }
    }

    /// Create a buffer from existing lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// All lines in insertion order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Iterate over the lines
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    /// Number of logical lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the buffer holds no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Replace the whole buffer with the given lines
    pub fn replace<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.clear();
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    /// Reset to a single header line
    pub fn reset(&mut self, header: impl Into<String>) {
        self.lines.clear();
        self.lines.push(header.into());
    }
}

impl<'a> IntoIterator for &'a OutputBuffer {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
