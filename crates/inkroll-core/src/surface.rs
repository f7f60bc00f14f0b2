//! Display surface the printers draw into.

use crate::{font::ColorTriple, glyph::Glyph};

/// Destination window.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RegionId(pub u8);

/// Windowed pixel buffers with a draw-then-present model.
///
/// Drawing goes to a back buffer; [`Surface::present`] copies a region to
/// the visible buffer. Coordinates are region-relative and drawing outside
/// the region is clipped.
pub trait Surface {
    /// `(width, height)` in pixels, `None` for an unknown region.
    fn region_size(&self, region: RegionId) -> Option<(u16, u16)>;

    fn fill(&mut self, region: RegionId, color: u8);

    fn fill_rect(&mut self, region: RegionId, x: u16, y: u16, width: u16, height: u16, color: u8);

    /// Draws `glyph` with its top-left corner at `(x, y)`. Background pixels
    /// use `colors.bg`; a transparent background (0) leaves them untouched.
    fn blit_glyph(&mut self, region: RegionId, x: u16, y: u16, glyph: &Glyph, colors: ColorTriple);

    /// Moves the region contents up by `pixels`, filling the exposed rows.
    fn scroll_up(&mut self, region: RegionId, pixels: u8, fill: u8);

    fn present(&mut self, region: RegionId);

    /// Draws keypad icon `icon` at `(x, y)` and returns its width.
    fn draw_keypad_icon(&mut self, region: RegionId, icon: u8, x: u16, y: u16) -> u8;
}
