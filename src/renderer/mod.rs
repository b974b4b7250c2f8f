//! Renderer Module
//!
//! Rasterizes the terminal onto a fixed-size pixel surface that textures the
//! monitor screen. Text layout (wrap and scrollback window) is kept separate
//! from drawing so it can be tested without pixels.

mod font;
mod layout;
mod palette;
mod rasterizer;
mod surface;

#[cfg(feature = "ttf")]
pub use font::TtfFont;
pub use font::{BitmapFont, FontError, GlyphBitmap, GlyphSource};
pub use layout::{window, wrap_line, wrap_lines, TextLayout, TextMetrics};
pub use palette::{BezelColors, BezelStyle, Palette, ResolvedPalette, Rgb};
pub use rasterizer::{
    crack_segments, Rasterizer, SceneFrame, Segment, DEFAULT_CRACK_COUNT, DEFAULT_HEIGHT, DEFAULT_WIDTH, PROMPT,
};
pub use surface::PixelSurface;
