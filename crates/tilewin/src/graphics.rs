use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Gray4, GrayColor},
};

use crate::Window;

/// Draws into the back buffer; luma is the palette index.
impl<const BYTES: usize> DrawTarget for Window<BYTES> {
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                continue;
            };
            let _ = self.set_pixel(x, y, color.luma());
        }

        Ok(())
    }
}

impl<const BYTES: usize> OriginDimensions for Window<BYTES> {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}
