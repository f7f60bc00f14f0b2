//! Font metrics, default colors, and string measurement.

use crate::{
    charmap::{
        CHAR_DYNAMIC, CHAR_EXTRA_SYMBOL, CHAR_KEYPAD_ICON, CHAR_NEWLINE, CHAR_PROMPT_CLEAR,
        CHAR_PROMPT_SCROLL, EOS, EXT_CTRL_CODE_BEGIN, EXT_CTRL_CODE_CLEAR,
        EXT_CTRL_CODE_CLEAR_TO, EXT_CTRL_CODE_ESCAPE, EXT_CTRL_CODE_FONT,
        EXT_CTRL_CODE_MIN_LETTER_SPACING, EXT_CTRL_CODE_SKIP, PLACEHOLDER_BEGIN,
        ext_ctrl_payload_len,
    },
    glyph::GlyphSource,
};

pub const FONT_COUNT: usize = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FontId {
    Small,
    Normal,
    Short,
    ShortCopy1,
    ShortCopy2,
    ShortCopy3,
    Braille,
    Narrow,
    SmallNarrow,
    /// Japanese glyph set only.
    Bold,
}

impl FontId {
    pub const ALL: [Self; FONT_COUNT] = [
        Self::Small,
        Self::Normal,
        Self::Short,
        Self::ShortCopy1,
        Self::ShortCopy2,
        Self::ShortCopy3,
        Self::Braille,
        Self::Narrow,
        Self::SmallNarrow,
        Self::Bold,
    ];

    /// Font named by a `{FONT n}` payload.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Stepping function a font renders with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FontBehavior {
    Generic,
    Braille,
}

/// Foreground, background, and shadow palette indices.
///
/// Background `0` is transparent: span clears leave it untouched.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ColorTriple {
    pub fg: u8,
    pub bg: u8,
    pub shadow: u8,
}

impl ColorTriple {
    pub const fn new(fg: u8, bg: u8, shadow: u8) -> Self {
        Self { fg, bg, shadow }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FontInfo {
    pub behavior: FontBehavior,
    pub max_letter_width: u8,
    pub max_letter_height: u8,
    pub letter_spacing: u8,
    pub line_spacing: u8,
    pub colors: ColorTriple,
}

impl FontInfo {
    const fn generic(max_letter_width: u8, max_letter_height: u8) -> Self {
        Self {
            behavior: FontBehavior::Generic,
            max_letter_width,
            max_letter_height,
            letter_spacing: 0,
            line_spacing: 0,
            colors: ColorTriple::new(2, 1, 3),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FontAttribute {
    MaxLetterWidth,
    MaxLetterHeight,
    LetterSpacing,
    LineSpacing,
    ColorForeground,
    ColorBackground,
    ColorShadow,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorDimension {
    Width,
    Height,
}

const DEFAULT_FONTS: [FontInfo; FONT_COUNT] = [
    FontInfo::generic(5, 12),
    FontInfo::generic(6, 16),
    FontInfo::generic(6, 14),
    FontInfo::generic(6, 14),
    FontInfo::generic(6, 14),
    FontInfo::generic(6, 14),
    FontInfo {
        behavior: FontBehavior::Braille,
        max_letter_width: 8,
        max_letter_height: 16,
        letter_spacing: 0,
        line_spacing: 8,
        colors: ColorTriple::new(2, 1, 3),
    },
    FontInfo::generic(5, 16),
    FontInfo::generic(5, 8),
    FontInfo {
        colors: ColorTriple::new(1, 2, 15),
        ..FontInfo::generic(8, 8)
    },
];

/// Width and height of the menu cursor drawn next to each font.
const MENU_CURSOR_DIMENSIONS: [(u8, u8); FONT_COUNT] = [
    (8, 12),
    (8, 15),
    (8, 14),
    (8, 14),
    (8, 14),
    (8, 14),
    (8, 16),
    (8, 15),
    (8, 8),
    (8, 8),
];

/// Per-font metrics and current default colors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FontRegistry {
    fonts: [FontInfo; FONT_COUNT],
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_FONTS)
    }
}

impl FontRegistry {
    pub const fn new(fonts: [FontInfo; FONT_COUNT]) -> Self {
        Self { fonts }
    }

    pub fn attributes(&self, font: FontId) -> &FontInfo {
        &self.fonts[font.index()]
    }

    pub fn attribute(&self, font: FontId, attribute: FontAttribute) -> u8 {
        let info = self.attributes(font);
        match attribute {
            FontAttribute::MaxLetterWidth => info.max_letter_width,
            FontAttribute::MaxLetterHeight => info.max_letter_height,
            FontAttribute::LetterSpacing => info.letter_spacing,
            FontAttribute::LineSpacing => info.line_spacing,
            FontAttribute::ColorForeground => info.colors.fg,
            FontAttribute::ColorBackground => info.colors.bg,
            FontAttribute::ColorShadow => info.colors.shadow,
        }
    }

    pub fn behavior(&self, font: FontId) -> FontBehavior {
        self.attributes(font).behavior
    }

    pub fn save_colors(&self, font: FontId) -> ColorTriple {
        self.attributes(font).colors
    }

    pub fn restore_colors(&mut self, font: FontId, colors: ColorTriple) {
        self.fonts[font.index()].colors = colors;
    }

    pub fn menu_cursor_dimension(&self, font: FontId, which: CursorDimension) -> u8 {
        let (width, height) = MENU_CURSOR_DIMENSIONS[font.index()];
        match which {
            CursorDimension::Width => width,
            CursorDimension::Height => height,
        }
    }

    /// Pixel width of `text` printed in `font`, without drawing.
    ///
    /// Multi-line strings report their widest line. `letter_spacing`
    /// overrides the font's spacing when given.
    pub fn width_of<G: GlyphSource>(
        &self,
        glyphs: &G,
        font: FontId,
        text: &[u8],
        letter_spacing: Option<u8>,
    ) -> u32 {
        let mut font = font;
        let mut spacing = letter_spacing.unwrap_or(self.attributes(font).letter_spacing) as u32;
        let mut min_letter_spacing = 0u32;
        let mut line_width = 0u32;
        let mut widest = 0u32;
        let mut i = 0usize;

        let advance = |glyph_width: u32, min: u32| glyph_width.max(min);

        while i < text.len() {
            let code = text[i];
            i += 1;

            match code {
                EOS => break,
                CHAR_NEWLINE | CHAR_PROMPT_CLEAR | CHAR_PROMPT_SCROLL => {
                    widest = widest.max(line_width);
                    line_width = 0;
                }
                PLACEHOLDER_BEGIN | CHAR_DYNAMIC => i += 1,
                CHAR_KEYPAD_ICON => {
                    let Some(&icon) = text.get(i) else { break };
                    i += 1;
                    line_width += glyphs.keypad_icon_width(icon) as u32 + spacing;
                }
                CHAR_EXTRA_SYMBOL => {
                    let Some(&symbol) = text.get(i) else { break };
                    i += 1;
                    let width = glyphs.glyph_width(font, symbol as u16 | 0x100, false) as u32;
                    line_width += advance(width, min_letter_spacing) + spacing;
                }
                EXT_CTRL_CODE_BEGIN => {
                    let Some(&ext) = text.get(i) else { break };
                    i += 1;
                    let arg = text.get(i).copied().unwrap_or(0) as u32;
                    match ext {
                        EXT_CTRL_CODE_FONT => {
                            if let Some(next) = FontId::from_raw(arg as u8) {
                                font = next;
                                if letter_spacing.is_none() {
                                    spacing = self.attributes(font).letter_spacing as u32;
                                }
                            }
                        }
                        EXT_CTRL_CODE_CLEAR => line_width += arg,
                        EXT_CTRL_CODE_SKIP => line_width = arg,
                        EXT_CTRL_CODE_CLEAR_TO => line_width = line_width.max(arg),
                        EXT_CTRL_CODE_MIN_LETTER_SPACING => min_letter_spacing = arg,
                        EXT_CTRL_CODE_ESCAPE => {
                            let width = glyphs.glyph_width(font, arg as u16 | 0x100, false) as u32;
                            line_width += advance(width, min_letter_spacing) + spacing;
                        }
                        _ => {}
                    }
                    i += ext_ctrl_payload_len(ext);
                }
                _ => {
                    let width = glyphs.glyph_width(font, code as u16, false) as u32;
                    line_width += advance(width, min_letter_spacing) + spacing;
                }
            }
        }

        widest.max(line_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        charmap::encode,
        glyph::{FixedWidthGlyphs, Glyph},
    };

    #[test]
    fn metrics_table_matches_fonts() {
        let fonts = FontRegistry::default();
        assert_eq!(fonts.attribute(FontId::Normal, FontAttribute::MaxLetterHeight), 16);
        assert_eq!(fonts.attribute(FontId::Small, FontAttribute::MaxLetterWidth), 5);
        assert_eq!(fonts.attribute(FontId::Braille, FontAttribute::LineSpacing), 8);
        assert_eq!(fonts.attribute(FontId::Bold, FontAttribute::ColorShadow), 15);
        assert_eq!(fonts.behavior(FontId::Braille), FontBehavior::Braille);
        assert_eq!(fonts.behavior(FontId::ShortCopy2), FontBehavior::Generic);
    }

    #[test]
    fn raw_ids_past_the_table_are_rejected() {
        assert_eq!(FontId::from_raw(1), Some(FontId::Normal));
        assert_eq!(FontId::from_raw(9), Some(FontId::Bold));
        assert_eq!(FontId::from_raw(10), None);
    }

    #[test]
    fn menu_cursor_follows_font() {
        let fonts = FontRegistry::default();
        assert_eq!(fonts.menu_cursor_dimension(FontId::Normal, CursorDimension::Height), 15);
        assert_eq!(fonts.menu_cursor_dimension(FontId::SmallNarrow, CursorDimension::Width), 8);
    }

    #[test]
    fn colors_round_trip_through_save_and_restore() {
        let mut fonts = FontRegistry::default();
        let saved = fonts.save_colors(FontId::Normal);
        fonts.restore_colors(FontId::Normal, ColorTriple::new(4, 0, 5));
        assert_eq!(fonts.attribute(FontId::Normal, FontAttribute::ColorForeground), 4);
        fonts.restore_colors(FontId::Normal, saved);
        assert_eq!(fonts.save_colors(FontId::Normal), ColorTriple::new(2, 1, 3));
    }

    fn width(text: &str, spacing: Option<u8>) -> u32 {
        let encoded: heapless::Vec<u8, 64> = encode(text).unwrap();
        FontRegistry::default().width_of(&FixedWidthGlyphs::new(6), FontId::Normal, &encoded, spacing)
    }

    #[test]
    fn width_counts_glyphs_and_spacing() {
        assert_eq!(width("", None), 0);
        assert_eq!(width("ABC", None), 18);
        assert_eq!(width("ABC", Some(1)), 21);
    }

    #[test]
    fn width_reports_widest_line() {
        assert_eq!(width("AB\\nABCD\\nA", None), 24);
    }

    #[test]
    fn width_control_codes() {
        assert_eq!(width("A{CLEAR 10}", None), 16);
        assert_eq!(width("A{SKIP 40}B", None), 46);
        assert_eq!(width("A{CLEAR_TO 3}B", None), 12);
        assert_eq!(width("{MIN_LETTER_SPACING 9}AB", None), 18);
        assert_eq!(width("A{PAUSE 30}{PLACEHOLDER 1}{DYNAMIC 0}B", None), 12);
        assert_eq!(width("A{KEYPAD 2}", None), 6 + Glyph::KEYPAD_ICON_WIDTH as u32);
    }
}
