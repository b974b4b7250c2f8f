//! Text rasterizer
//!
//! Turns the output buffer and mode flags into a [`PixelSurface`]. Each
//! call clears the surface and redraws everything; the rasterizer keeps no
//! state between frames beyond its fixed configuration.

use rand::Rng;
use tracing::trace;

use super::font::{BitmapFont, GlyphSource};
use super::layout::TextMetrics;
use super::palette::{BezelStyle, ResolvedPalette, Rgb};
use super::surface::PixelSurface;
use crate::core::{ModeState, OutputBuffer, TerminalState};

/// Surface width used by the monitor texture
pub const DEFAULT_WIDTH: u32 = 400;
/// Surface height used by the monitor texture
pub const DEFAULT_HEIGHT: u32 = 250;
/// Crack segments drawn on a destroyed screen
pub const DEFAULT_CRACK_COUNT: usize = 10;

/// Prompt marker drawn below the last content row
pub const PROMPT: &str = "$ ";

/// One crack on a destroyed screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

/// Generate `count` segments with endpoints drawn uniformly from the surface
pub fn crack_segments<R: Rng>(rng: &mut R, width: u32, height: u32, count: usize) -> Vec<Segment> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let (w, h) = (width as i32, height as i32);
    (0..count)
        .map(|_| Segment {
            x0: rng.random_range(0..w),
            y0: rng.random_range(0..h),
            x1: rng.random_range(0..w),
            y1: rng.random_range(0..h),
        })
        .collect()
}

/// Everything the scene composer needs for one frame
#[derive(Debug, Clone)]
pub struct SceneFrame {
    /// Screen texture
    pub surface: PixelSurface,
    /// Retro flag, drives the bezel tint
    pub retro: bool,
    /// Destroyed flag
    pub destroyed: bool,
    /// Eye flash flag
    pub flash_eyes: bool,
    /// Frame colors for this frame
    pub bezel: BezelStyle,
}

/// Renders terminal state onto a fixed-size surface
pub struct Rasterizer {
    width: u32,
    height: u32,
    metrics: TextMetrics,
    palette: ResolvedPalette,
    crack_count: usize,
    glyphs: Box<dyn GlyphSource>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("metrics", &self.metrics)
            .field("crack_count", &self.crack_count)
            .finish_non_exhaustive()
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, TextMetrics::default(), ResolvedPalette::default())
    }
}

impl Rasterizer {
    /// Create a rasterizer using the built-in bitmap font sized to the metrics
    pub fn new(width: u32, height: u32, metrics: TextMetrics, palette: ResolvedPalette) -> Self {
        let cell_width = metrics.advance().round().max(1.0) as u32;
        let cell_height = metrics.font_size.round().max(1.0) as u32;
        Self {
            width,
            height,
            metrics,
            palette,
            crack_count: DEFAULT_CRACK_COUNT,
            glyphs: Box::new(BitmapFont::new(cell_width, cell_height)),
        }
    }

    /// Replace the glyph source
    pub fn with_glyphs(mut self, glyphs: Box<dyn GlyphSource>) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Change how many cracks a destroyed screen shows
    pub fn with_crack_count(mut self, count: usize) -> Self {
        self.crack_count = count;
        self
    }

    /// Surface dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Text metrics in use
    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Resolved colors in use
    pub fn palette(&self) -> &ResolvedPalette {
        &self.palette
    }

    /// Render with thread-local randomness for the destroyed screen
    pub fn render(&self, buffer: &OutputBuffer, modes: &ModeState) -> PixelSurface {
        self.render_with_rng(buffer, modes, &mut rand::rng())
    }

    /// Render with a caller-supplied random source
    pub fn render_with_rng<R: Rng>(&self, buffer: &OutputBuffer, modes: &ModeState, rng: &mut R) -> PixelSurface {
        let mut surface = PixelSurface::new(self.width, self.height);
        surface.clear(self.palette.background);

        if modes.destroyed {
            let cracks = crack_segments(rng, self.width, self.height, self.crack_count);
            trace!(cracks = cracks.len(), "render destroyed screen");
            for crack in &cracks {
                surface.draw_line(crack.x0, crack.y0, crack.x1, crack.y1, self.palette.crack);
            }
            return surface;
        }

        let layout = self.metrics.layout(buffer.lines(), self.width, self.height);
        trace!(
            rows = layout.all_rows().len(),
            visible = layout.visible().len(),
            "render text"
        );
        for (row, text) in layout.visible().iter().enumerate() {
            self.draw_text(&mut surface, row, text, self.palette.foreground);
        }
        self.draw_text(&mut surface, layout.prompt_row(), PROMPT, self.palette.foreground);

        surface
    }

    /// Render the boot screen
    pub fn render_boot(&self, message: &str) -> PixelSurface {
        let mut surface = PixelSurface::new(self.width, self.height);
        surface.clear(self.palette.background);
        let layout = self.metrics.layout(std::slice::from_ref(&message), self.width, self.height);
        for (row, text) in layout.visible().iter().enumerate() {
            self.draw_text(&mut surface, row, text, self.palette.foreground);
        }
        surface
    }

    /// Render a full scene frame from the session state
    pub fn frame(&self, state: &TerminalState) -> SceneFrame {
        SceneFrame {
            surface: self.render(&state.buffer, &state.modes),
            retro: state.modes.retro,
            destroyed: state.modes.destroyed,
            flash_eyes: state.modes.flash_eyes,
            bezel: self.palette.bezel_for(state.modes.retro),
        }
    }

    fn draw_text(&self, surface: &mut PixelSurface, row: usize, text: &str, color: Rgb) {
        let baseline = self.metrics.baseline(row);
        for (col, c) in text.chars().enumerate() {
            if let Some(glyph) = self.glyphs.glyph(c) {
                let (x, y) = glyph.origin(self.metrics.column_x(col), baseline);
                surface.draw_glyph(&glyph, x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ready() -> ModeState {
        ModeState::ready()
    }

    /// Pixel rows spanned by text row `row` with the default metrics
    fn text_rows(row: usize) -> std::ops::Range<u32> {
        let metrics = TextMetrics::default();
        let baseline = metrics.baseline(row) as u32;
        baseline - 14..baseline + 2
    }

    #[test]
    fn test_empty_buffer_draws_only_prompt() {
        let rasterizer = Rasterizer::default();
        let surface = rasterizer.render(&OutputBuffer::default(), &ready());
        let bg = rasterizer.palette().background;

        assert!(surface.rows_have_ink(text_rows(0), bg));
        assert!(!surface.rows_have_ink(text_rows(1).start..DEFAULT_HEIGHT, bg));
    }

    #[test]
    fn test_prompt_follows_last_row() {
        let rasterizer = Rasterizer::default();
        let bg = rasterizer.palette().background;
        let buffer = OutputBuffer::from_lines(["one", "two"]);
        let surface = rasterizer.render(&buffer, &ready());

        assert!(surface.rows_have_ink(text_rows(2), bg));
        assert!(!surface.rows_have_ink(text_rows(3).start..DEFAULT_HEIGHT, bg));
    }

    #[test]
    fn test_background_cleared_to_palette() {
        let rasterizer = Rasterizer::default();
        let surface = rasterizer.render(&OutputBuffer::default(), &ready());
        assert_eq!(surface.pixel(DEFAULT_WIDTH - 1, DEFAULT_HEIGHT - 1), Some(Rgb::BLACK));
        assert_eq!(surface.dimensions(), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn test_only_foreground_and_background_in_text_mode() {
        let rasterizer = Rasterizer::default();
        let palette = *rasterizer.palette();
        let buffer = OutputBuffer::from_lines(["Hello, World!"]);
        let surface = rasterizer.render(&buffer, &ready());

        let fg = surface.count_color(palette.foreground);
        let bg = surface.count_color(palette.background);
        assert!(fg > 0);
        assert_eq!(fg + bg, (DEFAULT_WIDTH * DEFAULT_HEIGHT) as usize);
    }

    #[test]
    fn test_retro_does_not_change_pixels() {
        let rasterizer = Rasterizer::default();
        let buffer = OutputBuffer::from_lines(["$ retro", "Retro mode ON!"]);
        let mut retro = ready();
        retro.retro = true;

        assert_eq!(rasterizer.render(&buffer, &ready()), rasterizer.render(&buffer, &retro));
    }

    #[test]
    fn test_long_line_scrolls_window() {
        let rasterizer = Rasterizer::default();
        let bg = rasterizer.palette().background;
        // 45 chars per row, 12 rows: 20 rows of text scroll the first 8 out of view
        let buffer = OutputBuffer::from_lines(["x".repeat(45 * 20)]);
        let surface = rasterizer.render(&buffer, &ready());

        for row in 0..12 {
            assert!(surface.rows_have_ink(text_rows(row), bg), "row {row} is empty");
        }
    }

    #[test]
    fn test_render_is_deterministic_in_text_mode() {
        let rasterizer = Rasterizer::default();
        let buffer = OutputBuffer::from_lines(["$ about", "Cooper Hoy"]);
        assert_eq!(rasterizer.render(&buffer, &ready()), rasterizer.render(&buffer, &ready()));
    }

    #[test]
    fn test_destroyed_ignores_buffer() {
        let rasterizer = Rasterizer::default().with_crack_count(0);
        let mut modes = ready();
        modes.destroyed = true;

        let buffer = OutputBuffer::from_lines(["lots", "of", "text"]);
        let surface = rasterizer.render(&buffer, &modes);
        assert_eq!(surface.count_other_than(rasterizer.palette().background), 0);
    }

    #[test]
    fn test_destroyed_draws_cracks() {
        let rasterizer = Rasterizer::default();
        let mut modes = ready();
        modes.destroyed = true;

        let mut rng = StdRng::seed_from_u64(7);
        let surface = rasterizer.render_with_rng(&OutputBuffer::default(), &modes, &mut rng);
        let crack = rasterizer.palette().crack;
        assert!(surface.count_color(crack) > 0);
        assert_eq!(
            surface.count_color(crack) + surface.count_color(rasterizer.palette().background),
            (DEFAULT_WIDTH * DEFAULT_HEIGHT) as usize
        );
    }

    #[test]
    fn test_crack_segments_structure() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let cracks = crack_segments(&mut rng, 400, 250, DEFAULT_CRACK_COUNT);
            assert_eq!(cracks.len(), DEFAULT_CRACK_COUNT);
            for c in cracks {
                assert!((0..400).contains(&c.x0) && (0..400).contains(&c.x1));
                assert!((0..250).contains(&c.y0) && (0..250).contains(&c.y1));
            }
        }
        assert!(crack_segments(&mut rng, 0, 250, 10).is_empty());
    }

    #[test]
    fn test_frame_carries_flags_and_bezel() {
        let rasterizer = Rasterizer::default();
        let mut state = TerminalState::default();
        state.modes = ready();
        state.modes.retro = true;
        state.modes.flash_eyes = true;

        let frame = rasterizer.frame(&state);
        assert!(frame.retro);
        assert!(!frame.destroyed);
        assert!(frame.flash_eyes);
        assert_eq!(frame.bezel, rasterizer.palette().retro_bezel);
    }

    #[test]
    fn test_boot_screen_has_text() {
        let rasterizer = Rasterizer::default();
        let surface = rasterizer.render_boot("Booting...");
        assert!(surface.rows_have_ink(text_rows(0), rasterizer.palette().background));
        assert!(!surface.rows_have_ink(text_rows(1).start..DEFAULT_HEIGHT, rasterizer.palette().background));
    }

    #[test]
    fn test_zero_height_surface_is_total() {
        let rasterizer = Rasterizer::new(400, 0, TextMetrics::default(), ResolvedPalette::default());
        let surface = rasterizer.render(&OutputBuffer::from_lines(["a"]), &ready());
        assert_eq!(surface.dimensions(), (400, 0));
    }
}
