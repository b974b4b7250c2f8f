//! Viewport adapter
//!
//! Classifies the display width into the compact text-list presentation or
//! the pixel-surface presentation.

use serde::{Deserialize, Serialize};

/// Widths below this are compact
pub const DEFAULT_COMPACT_THRESHOLD: u32 = 768;

/// Presentation chosen for a width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Plain scroll list of the raw buffer
    Compact,
    /// Rasterized surface on the 3D monitor
    Surface,
}

/// Stateless width predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    threshold: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_COMPACT_THRESHOLD)
    }
}

impl Viewport {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// `width < threshold`
    pub fn is_compact(&self, width: u32) -> bool {
        width < self.threshold
    }

    pub fn classify(&self, width: u32) -> Layout {
        if self.is_compact(width) {
            Layout::Compact
        } else {
            Layout::Surface
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        let viewport = Viewport::default();
        assert_eq!(viewport.classify(0), Layout::Compact);
        assert_eq!(viewport.classify(767), Layout::Compact);
        assert_eq!(viewport.classify(768), Layout::Surface);
        assert_eq!(viewport.classify(1920), Layout::Surface);
    }

    #[test]
    fn test_custom_threshold() {
        let viewport = Viewport::new(100);
        assert!(viewport.is_compact(99));
        assert!(!viewport.is_compact(100));
    }
}
