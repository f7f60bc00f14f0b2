//! One double-buffered 4bpp window.

/// Packed 4bpp window with a back buffer and a visible "VRAM" copy.
///
/// Nibble mapping: pixel `i` (row-major) lives in byte `i / 2`, even pixels
/// in the low nibble, matching the GBA tile layout.
#[derive(Clone)]
pub struct Window<const BYTES: usize> {
    width: u16,
    height: u16,
    back: [u8; BYTES],
    vram: [u8; BYTES],
    presents: u32,
}

/// Bytes needed for a `width` x `height` window.
pub const fn bytes_for(width: u16, height: u16) -> usize {
    (width as usize * height as usize).div_ceil(2)
}

impl<const BYTES: usize> Window<BYTES> {
    /// Creates a window cleared to color 0, or `None` when it does not fit
    /// in `BYTES`.
    pub const fn new(width: u16, height: u16) -> Option<Self> {
        if bytes_for(width, height) > BYTES {
            return None;
        }
        Some(Self {
            width,
            height,
            back: [0u8; BYTES],
            vram: [0u8; BYTES],
            presents: 0,
        })
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of times the back buffer was copied to VRAM.
    pub const fn presents(&self) -> u32 {
        self.presents
    }

    fn slot(&self, x: u16, y: u16) -> Option<(usize, u32)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        Some((index / 2, (index as u32 % 2) * 4))
    }

    /// Sets a back-buffer pixel.
    ///
    /// Returns `true` when the pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: u8) -> bool {
        let Some((byte, shift)) = self.slot(x, y) else {
            return false;
        };
        let cell = &mut self.back[byte];
        *cell = (*cell & !(0x0F << shift)) | ((color & 0x0F) << shift);
        true
    }

    /// Reads a back-buffer pixel.
    pub fn pixel(&self, x: u16, y: u16) -> Option<u8> {
        let (byte, shift) = self.slot(x, y)?;
        Some((self.back[byte] >> shift) & 0x0F)
    }

    /// Reads a visible pixel.
    pub fn vram_pixel(&self, x: u16, y: u16) -> Option<u8> {
        let (byte, shift) = self.slot(x, y)?;
        Some((self.vram[byte] >> shift) & 0x0F)
    }

    pub fn fill(&mut self, color: u8) {
        let color = color & 0x0F;
        let used = bytes_for(self.width, self.height);
        self.back[..used].fill(color | (color << 4));
    }

    /// Fills a rectangle, clipped to the window.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: u8) {
        let right = x.saturating_add(width).min(self.width);
        let bottom = y.saturating_add(height).min(self.height);
        for py in y..bottom {
            for px in x..right {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Moves every row up by `rows`, filling the rows exposed at the bottom.
    pub fn scroll_up(&mut self, rows: u16, fill: u8) {
        let rows = rows.min(self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let color = match y.checked_add(rows).filter(|&src| src < self.height) {
                    Some(src) => self.pixel(x, src).unwrap_or(fill),
                    None => fill,
                };
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Copies the back buffer to VRAM.
    pub fn present(&mut self) {
        self.vram = self.back;
        self.presents = self.presents.wrapping_add(1);
    }

    /// Visible pixels of row `y`, left to right.
    pub fn vram_row(&self, y: u16) -> impl Iterator<Item = u8> + '_ {
        (0..self.width).filter_map(move |x| self.vram_pixel(x, y))
    }
}
