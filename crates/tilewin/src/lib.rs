#![cfg_attr(not(test), no_std)]

//! In-memory window buffers implementing [`inkroll_core::surface::Surface`].

mod window;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use window::{Window, bytes_for};

use heapless::Vec;
use inkroll_core::{
    font::ColorTriple,
    glyph::{Glyph, GlyphPixel},
    surface::{RegionId, Surface},
};

/// Window allocation errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error {
    /// Every window slot is taken.
    Full,
    /// The window does not fit the per-window byte budget.
    TooLarge,
}

/// Up to `N` windows of at most `BYTES` packed bytes each, addressed by
/// [`RegionId`] in creation order.
pub struct WindowSet<const N: usize, const BYTES: usize> {
    windows: Vec<Window<BYTES>, N>,
}

impl<const N: usize, const BYTES: usize> Default for WindowSet<N, BYTES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const BYTES: usize> WindowSet<N, BYTES> {
    pub const fn new() -> Self {
        Self {
            windows: Vec::new(),
        }
    }

    /// Creates a window cleared to color 0.
    pub fn add_window(&mut self, width: u16, height: u16) -> Result<RegionId, Error> {
        let window = Window::new(width, height).ok_or(Error::TooLarge)?;
        let id = u8::try_from(self.windows.len()).map_err(|_| Error::Full)?;
        self.windows.push(window).map_err(|_| Error::Full)?;
        Ok(RegionId(id))
    }

    pub fn window(&self, region: RegionId) -> Option<&Window<BYTES>> {
        self.windows.get(region.0 as usize)
    }

    pub fn window_mut(&mut self, region: RegionId) -> Option<&mut Window<BYTES>> {
        self.windows.get_mut(region.0 as usize)
    }

    /// Total presents across every window.
    pub fn presents(&self) -> u32 {
        self.windows.iter().map(Window::presents).sum()
    }
}

/// Outline of a keypad button; the icon index is not rendered.
const KEYPAD_ICON_HEIGHT: u16 = 8;
const KEYPAD_ICON_COLOR: u8 = 2;

impl<const N: usize, const BYTES: usize> Surface for WindowSet<N, BYTES> {
    fn region_size(&self, region: RegionId) -> Option<(u16, u16)> {
        self.window(region)
            .map(|window| (window.width(), window.height()))
    }

    fn fill(&mut self, region: RegionId, color: u8) {
        if let Some(window) = self.window_mut(region) {
            window.fill(color);
        }
    }

    fn fill_rect(&mut self, region: RegionId, x: u16, y: u16, width: u16, height: u16, color: u8) {
        if let Some(window) = self.window_mut(region) {
            window.fill_rect(x, y, width, height, color);
        }
    }

    fn blit_glyph(&mut self, region: RegionId, x: u16, y: u16, glyph: &Glyph, colors: ColorTriple) {
        let Some(window) = self.window_mut(region) else {
            return;
        };
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                let color = match glyph.pixel(gx as usize, gy as usize) {
                    GlyphPixel::Foreground => colors.fg,
                    GlyphPixel::Shadow => colors.shadow,
                    GlyphPixel::Background if colors.bg == 0 => continue,
                    GlyphPixel::Background => colors.bg,
                };
                window.set_pixel(x.saturating_add(gx as u16), y.saturating_add(gy as u16), color);
            }
        }
    }

    fn scroll_up(&mut self, region: RegionId, pixels: u8, fill: u8) {
        if let Some(window) = self.window_mut(region) {
            window.scroll_up(pixels as u16, fill);
        }
    }

    fn present(&mut self, region: RegionId) {
        if let Some(window) = self.window_mut(region) {
            window.present();
        }
    }

    fn draw_keypad_icon(&mut self, region: RegionId, _icon: u8, x: u16, y: u16) -> u8 {
        let width = Glyph::KEYPAD_ICON_WIDTH as u16;
        if let Some(window) = self.window_mut(region) {
            let right = x.saturating_add(width - 1);
            let bottom = y.saturating_add(KEYPAD_ICON_HEIGHT - 1);
            window.fill_rect(x, y, width, 1, KEYPAD_ICON_COLOR);
            window.fill_rect(x, bottom, width, 1, KEYPAD_ICON_COLOR);
            window.fill_rect(x, y, 1, KEYPAD_ICON_HEIGHT, KEYPAD_ICON_COLOR);
            window.fill_rect(right, y, 1, KEYPAD_ICON_HEIGHT, KEYPAD_ICON_COLOR);
        }
        Glyph::KEYPAD_ICON_WIDTH
    }
}
