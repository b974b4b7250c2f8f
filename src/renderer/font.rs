//! Font Rendering
//!
//! Glyph sources for the rasterizer. The built-in [`BitmapFont`] scales the
//! 8x8 glyphs from `font8x8` to the configured cell box, so rendering works
//! without any font files. With the `ttf` feature, [`TtfFont`] rasterizes a
//! monospace TrueType font through fontdue instead.

use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS, MISC_FONTS};

/// A rendered glyph: grayscale coverage plus its placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Horizontal offset from the pen position
    pub xmin: i32,
    /// Offset of the bitmap's bottom edge above the baseline
    pub ymin: i32,
    /// Coverage, 1 byte per pixel, row-major
    bitmap: Vec<u8>,
}

impl GlyphBitmap {
    /// Create a glyph sitting on the baseline at the pen position
    pub fn new(width: u32, height: u32, bitmap: Vec<u8>) -> Self {
        debug_assert_eq!(bitmap.len(), (width * height) as usize);
        Self {
            width,
            height,
            xmin: 0,
            ymin: 0,
            bitmap,
        }
    }

    /// Set the placement offsets
    pub fn with_offset(mut self, xmin: i32, ymin: i32) -> Self {
        self.xmin = xmin;
        self.ymin = ymin;
        self
    }

    /// Coverage at (x, y), 0 outside the bitmap
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.bitmap[(y * self.width + x) as usize]
    }

    /// Number of pixels with any coverage
    pub fn ink(&self) -> usize {
        self.bitmap.iter().filter(|&&a| a > 0).count()
    }

    /// Top-left corner for a pen position on the given baseline
    pub fn origin(&self, pen_x: i32, baseline: i32) -> (i32, i32) {
        (pen_x + self.xmin, baseline - self.ymin - self.height as i32)
    }
}

/// Something that can turn a character into a glyph bitmap
pub trait GlyphSource: Send + Sync {
    /// Rasterize `c`; `None` means nothing is drawn (e.g. whitespace)
    fn glyph(&self, c: char) -> Option<GlyphBitmap>;
}

/// Map typographic punctuation onto ASCII the bitmap font covers
fn fold(c: char) -> char {
    match c {
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
        '\u{2022}' | '\u{00B7}' | '\u{2219}' => '*',
        '\u{00A0}' | '\u{2007}' | '\u{202F}' => ' ',
        '\u{2026}' => '.',
        other => other,
    }
}

fn lookup(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| GREEK_FONTS.get(c))
        .or_else(|| BOX_FONTS.get(c))
        .or_else(|| BLOCK_FONTS.get(c))
        .or_else(|| MISC_FONTS.get(c))
}

/// Built-in bitmap font, nearest-neighbour scaled to a fixed cell box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    cell_width: u32,
    cell_height: u32,
}

impl BitmapFont {
    /// Create a font that fills a `cell_width` x `cell_height` box
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
        }
    }

    /// Cell box size in pixels
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    fn scale(&self, rows: &[u8; 8]) -> Vec<u8> {
        let (w, h) = (self.cell_width, self.cell_height);
        let mut bitmap = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            let bits = rows[(y * 8 / h) as usize];
            for x in 0..w {
                let col = x * 8 / w;
                bitmap.push(if (bits >> col) & 1 == 1 { 255 } else { 0 });
            }
        }
        bitmap
    }

    /// Hollow box drawn for characters the font lacks
    fn missing(&self) -> [u8; 8] {
        [0x00, 0x7E, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00]
    }
}

impl GlyphSource for BitmapFont {
    fn glyph(&self, c: char) -> Option<GlyphBitmap> {
        let c = fold(c);
        if c.is_whitespace() || c.is_control() {
            return None;
        }

        let rows = lookup(c).unwrap_or_else(|| self.missing());
        // The bottom source row is the descender row
        let descent = (self.cell_height / 8) as i32;
        Some(GlyphBitmap::new(self.cell_width, self.cell_height, self.scale(&rows)).with_offset(0, -descent))
    }
}

/// Font-related errors
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Font IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font parse error: {0}")]
    Parse(String),
    #[error("No suitable font found")]
    NoFontFound,
}

#[cfg(feature = "ttf")]
pub use ttf::TtfFont;

#[cfg(feature = "ttf")]
mod ttf {
    use std::path::Path;

    use fontdue::{Font, FontSettings};

    use super::{FontError, GlyphBitmap, GlyphSource};

    /// TrueType glyph source backed by fontdue
    pub struct TtfFont {
        font: Font,
        font_size: f32,
    }

    impl TtfFont {
        /// Load a font file at the given pixel size
        pub fn new(font_path: &Path, font_size: f32) -> Result<Self, FontError> {
            let font_data = std::fs::read(font_path)?;
            Self::from_bytes(&font_data, font_size)
        }

        /// Create a glyph source from font data bytes
        pub fn from_bytes(font_data: &[u8], font_size: f32) -> Result<Self, FontError> {
            let font = Font::from_bytes(font_data, FontSettings::default()).map_err(|e| FontError::Parse(e.to_string()))?;
            Ok(Self { font, font_size })
        }

        /// Try common system monospace fonts in order of preference
        pub fn with_default_font(font_size: f32) -> Result<Self, FontError> {
            let font_paths = [
                "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
                "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
                "/usr/share/fonts/truetype/ubuntu/UbuntuMono-R.ttf",
                "/usr/share/fonts/truetype/freefont/FreeMono.ttf",
            ];

            for path in &font_paths {
                if let Ok(font) = Self::new(Path::new(path), font_size) {
                    tracing::info!("Loaded font: {}", path);
                    return Ok(font);
                }
            }

            Err(FontError::NoFontFound)
        }

        /// Get the font size
        pub fn font_size(&self) -> f32 {
            self.font_size
        }
    }

    impl GlyphSource for TtfFont {
        fn glyph(&self, c: char) -> Option<GlyphBitmap> {
            if c.is_whitespace() || c.is_control() {
                return None;
            }
            let (metrics, bitmap) = self.font.rasterize(c, self.font_size);
            if metrics.width == 0 || metrics.height == 0 {
                return None;
            }
            Some(
                GlyphBitmap::new(metrics.width as u32, metrics.height as u32, bitmap)
                    .with_offset(metrics.xmin, metrics.ymin),
            )
        }
    }

}
