use super::{RenderContext, TextPrinter};
use crate::{
    audio::{AudioHost, SE_SELECT},
    font::ColorTriple,
    glyph::{Glyph, GlyphPixel, GlyphSource},
    surface::Surface,
};

/// Frames the arrow holds each bob position.
const DOWN_ARROW_FRAME_DELAY: u8 = 8;
/// Vertical bob offsets, cycled.
const DOWN_ARROW_BOB: [u16; 4] = [0, 1, 2, 1];
const DOWN_ARROW_WIDTH: u16 = 8;
const DOWN_ARROW_HEIGHT: u16 = 16;
/// Frames an auto-scrolling wait lasts.
const AUTO_SCROLL_WAIT: u8 = 49;

const DOWN_ARROW_ROWS: [&[u8; 8]; 4] = [b"#######s", b".#####s.", b"..###s..", b"...#s..."];
const DOWN_ARROW_TOP: usize = 6;

const fn down_arrow() -> Glyph {
    let mut glyph = Glyph::blank(8, 12);
    let mut row = 0;
    while row < DOWN_ARROW_ROWS.len() {
        let mut x = 0;
        while x < 8 {
            glyph.pixels[DOWN_ARROW_TOP + row][x] = match DOWN_ARROW_ROWS[row][x] {
                b'#' => GlyphPixel::Foreground,
                b's' => GlyphPixel::Shadow,
                _ => GlyphPixel::Background,
            };
            x += 1;
        }
        row += 1;
    }
    glyph
}

static DOWN_ARROW: Glyph = down_arrow();

impl TextPrinter<'_> {
    /// Resets the timers of the wait that is about to start.
    pub(super) fn init_down_arrow<S, G, AU>(&mut self, ctx: &RenderContext<'_, S, G, AU>) {
        if ctx.flags.auto_scroll {
            self.auto_scroll_delay = 0;
        } else {
            self.down_arrow_index = 0;
            self.down_arrow_delay = 0;
        }
    }

    /// Counts an auto-mode wait; `true` once it has timed out.
    pub fn wait_auto_mode(&mut self) -> bool {
        if self.auto_scroll_delay >= AUTO_SCROLL_WAIT {
            return true;
        }
        self.auto_scroll_delay += 1;
        false
    }

    /// Waits for an advance press while bobbing the down arrow at the pen.
    /// Times out instead when auto-scroll is on.
    pub fn wait_with_down_arrow<S, G, AU>(&mut self, ctx: &mut RenderContext<'_, S, G, AU>) -> bool
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        if ctx.flags.auto_scroll {
            return self.wait_auto_mode();
        }

        self.draw_down_arrow(ctx);
        self.take_advance(ctx)
    }

    /// Waits for an advance press without drawing anything. Times out
    /// instead when auto-scroll is on.
    pub fn wait<S, G, AU>(&mut self, ctx: &mut RenderContext<'_, S, G, AU>) -> bool
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        if ctx.flags.auto_scroll {
            return self.wait_auto_mode();
        }
        self.take_advance(ctx)
    }

    fn take_advance<S, G, AU>(&mut self, ctx: &mut RenderContext<'_, S, G, AU>) -> bool
    where
        AU: AudioHost,
    {
        if ctx.advance.pressed {
            ctx.audio.play_se(SE_SELECT);
            return true;
        }
        false
    }

    pub(super) fn draw_down_arrow<S, G, AU>(&mut self, ctx: &mut RenderContext<'_, S, G, AU>)
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        if ctx.flags.auto_scroll {
            return;
        }
        if self.down_arrow_delay > 0 {
            self.down_arrow_delay -= 1;
            return;
        }

        let template = &self.template;
        let colors = if ctx.flags.use_alternate_down_arrow {
            ColorTriple::new(template.colors.shadow, template.colors.bg, template.colors.fg)
        } else {
            template.colors
        };
        ctx.surface.fill_rect(
            template.region,
            template.current_x,
            template.current_y,
            DOWN_ARROW_WIDTH,
            DOWN_ARROW_HEIGHT,
            template.colors.bg,
        );
        ctx.surface.blit_glyph(
            template.region,
            template.current_x,
            template
                .current_y
                .saturating_add(DOWN_ARROW_BOB[self.down_arrow_index as usize]),
            &DOWN_ARROW,
            colors,
        );
        ctx.present(template.region);

        self.down_arrow_delay = DOWN_ARROW_FRAME_DELAY;
        self.down_arrow_index = (self.down_arrow_index + 1) % DOWN_ARROW_BOB.len() as u8;
    }

    pub(super) fn clear_down_arrow<S, G, AU>(&mut self, ctx: &mut RenderContext<'_, S, G, AU>)
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        let template = &self.template;
        ctx.surface.fill_rect(
            template.region,
            template.current_x,
            template.current_y,
            DOWN_ARROW_WIDTH,
            DOWN_ARROW_HEIGHT,
            template.colors.bg,
        );
        ctx.present(template.region);
    }
}
