//! Pixel surface
//!
//! A fixed-size RGBA8 raster that the rasterizer draws into. The surface is
//! rebuilt from scratch on every redraw; nothing here tracks dirty regions.

use std::io::{self, Write};

use super::font::GlyphBitmap;
use super::palette::Rgb;

/// Fixed-size RGBA pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    /// Pixel buffer (RGBA, row-major)
    buffer: Vec<u8>,
    /// Buffer width
    width: u32,
    /// Buffer height
    height: u32,
}

impl PixelSurface {
    /// Create a surface filled with opaque black
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            buffer: vec![0u8; (width as usize) * (height as usize) * 4],
            width,
            height,
        };
        surface.clear(Rgb::BLACK);
        surface
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get buffer dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the pixel buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Take the pixel buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + x as usize) * 4)
    }

    /// Clear the buffer with a color
    pub fn clear(&mut self, color: Rgb) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel[0] = color.0;
            pixel[1] = color.1;
            pixel[2] = color.2;
            pixel[3] = 255;
        }
    }

    /// Read one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let idx = self.index(x as i32, y as i32)?;
        Some(Rgb(self.buffer[idx], self.buffer[idx + 1], self.buffer[idx + 2]))
    }

    /// Write one pixel, ignoring coordinates outside the surface
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(idx) = self.index(x, y) {
            self.buffer[idx] = color.0;
            self.buffer[idx + 1] = color.1;
            self.buffer[idx + 2] = color.2;
            self.buffer[idx + 3] = 255;
        }
    }

    /// Fill a rectangle with a color
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        for row in y..y.saturating_add(h).min(self.height) {
            for col in x..x.saturating_add(w).min(self.width) {
                self.put_pixel(col as i32, row as i32, color);
            }
        }
    }

    /// Draw a one-pixel line (Bresenham), clipped to the surface
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.put_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a glyph with its top-left corner at (x, y), blending coverage
    /// over whatever is already on the surface
    pub fn draw_glyph(&mut self, glyph: &GlyphBitmap, x: i32, y: i32, fg: Rgb) {
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                let alpha = glyph.coverage(gx, gy);
                if alpha == 0 {
                    continue;
                }

                let px = x + gx as i32;
                let py = y + gy as i32;
                if let Some(idx) = self.index(px, py) {
                    let under = Rgb(self.buffer[idx], self.buffer[idx + 1], self.buffer[idx + 2]);
                    let out = under.blend(fg, alpha);
                    self.buffer[idx] = out.0;
                    self.buffer[idx + 1] = out.1;
                    self.buffer[idx + 2] = out.2;
                    self.buffer[idx + 3] = 255;
                }
            }
        }
    }

    /// Count pixels of exactly this color
    pub fn count_color(&self, color: Rgb) -> usize {
        self.buffer
            .chunks_exact(4)
            .filter(|p| p[0] == color.0 && p[1] == color.1 && p[2] == color.2)
            .count()
    }

    /// Count pixels that differ from this color
    pub fn count_other_than(&self, color: Rgb) -> usize {
        (self.width as usize) * (self.height as usize) - self.count_color(color)
    }

    /// Check whether any pixel in the given rows differs from `background`
    pub fn rows_have_ink(&self, rows: std::ops::Range<u32>, background: Rgb) -> bool {
        rows.filter(|&y| y < self.height).any(|y| {
            (0..self.width).any(|x| self.pixel(x, y) != Some(background))
        })
    }

    /// Write the surface as a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut rgb = Vec::with_capacity(self.buffer.len() / 4 * 3);
        for pixel in self.buffer.chunks_exact(4) {
            rgb.extend_from_slice(&pixel[..3]);
        }
        out.write_all(&rgb)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_clear() {
        let mut surface = PixelSurface::new(10, 10);
        surface.clear(Rgb(255, 0, 0));

        assert_eq!(surface.buffer[0], 255); // R
        assert_eq!(surface.buffer[1], 0); // G
        assert_eq!(surface.buffer[2], 0); // B
        assert_eq!(surface.buffer[3], 255); // A
        assert_eq!(surface.count_color(Rgb(255, 0, 0)), 100);
    }

    #[test]
    fn test_surface_fill_rect() {
        let mut surface = PixelSurface::new(10, 10);
        surface.fill_rect(2, 2, 3, 3, Rgb(0, 255, 0));

        assert_eq!(surface.pixel(3, 3), Some(Rgb(0, 255, 0)));
        assert_eq!(surface.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(surface.count_color(Rgb(0, 255, 0)), 9);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_rect(2, 2, 100, 100, Rgb::WHITE);
        assert_eq!(surface.count_color(Rgb::WHITE), 4);
    }

    #[test]
    fn test_draw_line_endpoints_and_clipping() {
        let mut surface = PixelSurface::new(10, 10);
        surface.draw_line(0, 0, 9, 9, Rgb::WHITE);
        assert_eq!(surface.pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(surface.pixel(9, 9), Some(Rgb::WHITE));
        assert_eq!(surface.count_color(Rgb::WHITE), 10);

        // Partly off-surface lines must not panic
        surface.draw_line(-5, 3, 20, 3, Rgb(1, 2, 3));
        assert_eq!(surface.count_color(Rgb(1, 2, 3)), 10);
    }

    #[test]
    fn test_draw_glyph_blends() {
        let mut surface = PixelSurface::new(4, 4);
        let glyph = GlyphBitmap::new(2, 1, vec![255, 0]);
        surface.draw_glyph(&glyph, 1, 1, Rgb(0, 255, 0));
        assert_eq!(surface.pixel(1, 1), Some(Rgb(0, 255, 0)));
        assert_eq!(surface.pixel(2, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn test_write_ppm_header() {
        let surface = PixelSurface::new(3, 2);
        let mut out = Vec::new();
        surface.write_ppm(&mut out).unwrap();
        assert!(out.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(out.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);
    }
}
