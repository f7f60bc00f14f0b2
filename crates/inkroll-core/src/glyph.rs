//! Glyph bitmaps and the source that supplies them.

use crate::font::FontId;

pub const GLYPH_MAX_SIZE: usize = 16;

/// Glyph pixel: background, foreground, or shadow.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GlyphPixel {
    #[default]
    Background,
    Foreground,
    Shadow,
}

/// One decoded glyph, at most 16x16 pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph {
    pub width: u8,
    pub height: u8,
    pub pixels: [[GlyphPixel; GLYPH_MAX_SIZE]; GLYPH_MAX_SIZE],
}

impl Glyph {
    pub const KEYPAD_ICON_WIDTH: u8 = 8;

    pub const fn blank(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            pixels: [[GlyphPixel::Background; GLYPH_MAX_SIZE]; GLYPH_MAX_SIZE],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> GlyphPixel {
        if x >= self.width as usize || y >= self.height as usize {
            return GlyphPixel::Background;
        }
        self.pixels[y][x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: GlyphPixel) {
        if x < GLYPH_MAX_SIZE && y < GLYPH_MAX_SIZE {
            self.pixels[y][x] = pixel;
        }
    }
}

/// Supplies glyph bitmaps for a font.
///
/// Codes above `0xFF` address the extra-symbol page (`{ESCAPE n}` and
/// `0xF9 n` both draw glyph `n | 0x100`).
pub trait GlyphSource {
    fn glyph(&self, font: FontId, code: u16, japanese: bool) -> Glyph;

    fn glyph_width(&self, font: FontId, code: u16, japanese: bool) -> u8 {
        self.glyph(font, code, japanese).width
    }

    fn keypad_icon_width(&self, _icon: u8) -> u8 {
        Glyph::KEYPAD_ICON_WIDTH
    }
}

/// Solid rectangles of a fixed width; the space code is left blank.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedWidthGlyphs {
    width: u8,
    height: u8,
}

impl FixedWidthGlyphs {
    pub const fn new(width: u8) -> Self {
        Self { width, height: 8 }
    }

    pub const fn with_height(mut self, height: u8) -> Self {
        self.height = height;
        self
    }
}

impl GlyphSource for FixedWidthGlyphs {
    fn glyph(&self, _font: FontId, code: u16, _japanese: bool) -> Glyph {
        let mut glyph = Glyph::blank(self.width, self.height);
        if code != 0 {
            for y in 0..self.height as usize {
                for x in 0..self.width as usize {
                    glyph.set_pixel(x, y, GlyphPixel::Foreground);
                }
            }
        }
        glyph
    }

    fn glyph_width(&self, _font: FontId, _code: u16, _japanese: bool) -> u8 {
        self.width
    }
}
