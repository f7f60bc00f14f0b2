use core::cell::RefCell;

use crate::{
    audio::AudioHost,
    font::{ColorTriple, FontId},
    glyph::{FixedWidthGlyphs, Glyph, GlyphPixel, GlyphSource},
    surface::{RegionId, Surface},
};

pub(crate) struct RecordingSurface {
    sizes: Vec<(u16, u16)>,
    back: Vec<Vec<u8>>,
    front: Vec<Vec<u8>>,
    pub presents: usize,
    pub glyphs_drawn: usize,
    pub scrolled: u32,
    pub fills: usize,
    pub keypad_icons: Vec<(u8, u16, u16)>,
}

impl RecordingSurface {
    pub(crate) fn new(sizes: &[(u16, u16)]) -> Self {
        let buffers: Vec<Vec<u8>> = sizes
            .iter()
            .map(|&(w, h)| vec![0u8; w as usize * h as usize])
            .collect();
        Self {
            sizes: sizes.to_vec(),
            back: buffers.clone(),
            front: buffers,
            presents: 0,
            glyphs_drawn: 0,
            scrolled: 0,
            fills: 0,
            keypad_icons: Vec::new(),
        }
    }

    pub(crate) fn back_pixel(&self, region: RegionId, x: u16, y: u16) -> u8 {
        let (w, _) = self.sizes[region.0 as usize];
        self.back[region.0 as usize][y as usize * w as usize + x as usize]
    }

    pub(crate) fn front_pixel(&self, region: RegionId, x: u16, y: u16) -> u8 {
        let (w, _) = self.sizes[region.0 as usize];
        self.front[region.0 as usize][y as usize * w as usize + x as usize]
    }

    pub(crate) fn front_is_blank(&self, region: RegionId) -> bool {
        self.front[region.0 as usize].iter().all(|&p| p == 0)
    }

    fn set(&mut self, region: RegionId, x: u16, y: u16, color: u8) {
        let Some(&(w, h)) = self.sizes.get(region.0 as usize) else {
            return;
        };
        if x < w && y < h {
            self.back[region.0 as usize][y as usize * w as usize + x as usize] = color;
        }
    }
}

impl Surface for RecordingSurface {
    fn region_size(&self, region: RegionId) -> Option<(u16, u16)> {
        self.sizes.get(region.0 as usize).copied()
    }

    fn fill(&mut self, region: RegionId, color: u8) {
        self.fills += 1;
        if let Some(buffer) = self.back.get_mut(region.0 as usize) {
            buffer.fill(color);
        }
    }

    fn fill_rect(&mut self, region: RegionId, x: u16, y: u16, width: u16, height: u16, color: u8) {
        for dy in 0..height {
            for dx in 0..width {
                self.set(region, x.saturating_add(dx), y.saturating_add(dy), color);
            }
        }
    }

    fn blit_glyph(&mut self, region: RegionId, x: u16, y: u16, glyph: &Glyph, colors: ColorTriple) {
        self.glyphs_drawn += 1;
        for gy in 0..glyph.height as u16 {
            for gx in 0..glyph.width as u16 {
                let color = match glyph.pixel(gx as usize, gy as usize) {
                    GlyphPixel::Foreground => colors.fg,
                    GlyphPixel::Shadow => colors.shadow,
                    GlyphPixel::Background if colors.bg != 0 => colors.bg,
                    GlyphPixel::Background => continue,
                };
                self.set(region, x.saturating_add(gx), y.saturating_add(gy), color);
            }
        }
    }

    fn scroll_up(&mut self, region: RegionId, pixels: u8, fill: u8) {
        self.scrolled += pixels as u32;
        let Some(&(w, _)) = self.sizes.get(region.0 as usize) else {
            return;
        };
        let buffer = &mut self.back[region.0 as usize];
        let shift = (pixels as usize * w as usize).min(buffer.len());
        buffer.copy_within(shift.., 0);
        let len = buffer.len();
        buffer[len - shift..].fill(fill);
    }

    fn present(&mut self, region: RegionId) {
        self.presents += 1;
        let index = region.0 as usize;
        if index < self.back.len() {
            self.front[index] = self.back[index].clone();
        }
    }

    fn draw_keypad_icon(&mut self, _region: RegionId, icon: u8, x: u16, y: u16) -> u8 {
        self.keypad_icons.push((icon, x, y));
        Glyph::KEYPAD_ICON_WIDTH
    }
}

#[derive(Default)]
pub(crate) struct RecordingAudio {
    pub se: Vec<u16>,
    pub bgm: Vec<u16>,
    pub se_playing: bool,
    pub music_paused: bool,
}

impl AudioHost for RecordingAudio {
    fn play_se(&mut self, id: u16) {
        self.se.push(id);
    }

    fn play_bgm(&mut self, id: u16) {
        self.bgm.push(id);
    }

    fn is_se_playing(&self) -> bool {
        self.se_playing
    }

    fn pause_music(&mut self) {
        self.music_paused = true;
    }

    fn resume_music(&mut self) {
        self.music_paused = false;
    }
}

/// Fixed-width glyphs that log every code requested.
pub(crate) struct LoggingGlyphs {
    inner: FixedWidthGlyphs,
    pub codes: RefCell<Vec<u16>>,
}

impl LoggingGlyphs {
    pub(crate) fn new(width: u8) -> Self {
        Self {
            inner: FixedWidthGlyphs::new(width),
            codes: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn drawn(&self) -> Vec<u16> {
        self.codes.borrow().clone()
    }
}

impl GlyphSource for LoggingGlyphs {
    fn glyph(&self, font: FontId, code: u16, japanese: bool) -> Glyph {
        self.codes.borrow_mut().push(code);
        self.inner.glyph(font, code, japanese)
    }

    fn glyph_width(&self, font: FontId, code: u16, japanese: bool) -> u8 {
        self.inner.glyph_width(font, code, japanese)
    }
}
