use super::{RenderContext, RenderResult, TextPrinter, decode::Decoded};
use crate::{audio::AudioHost, glyph::GlyphSource, surface::Surface};

impl TextPrinter<'_> {
    /// Braille stepper for `HandleChar`.
    ///
    /// Differs from the generic stepper: keypad icons are skipped, pacing
    /// ignores auto-scroll, minimum letter spacing has no effect, and
    /// glyphs are never decapitalized.
    pub(super) fn handle_char_braille<S, G, AU>(
        &mut self,
        ctx: &mut RenderContext<'_, S, G, AU>,
    ) -> RenderResult
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        if !self.pace(ctx, false) {
            return RenderResult::Update;
        }

        let fold = self.fold.take();
        let decoded = self.decode(ctx);
        self.fold = fold;

        match decoded {
            Decoded::Done(result) => result,
            Decoded::KeypadIcon(_) => RenderResult::Repeat,
            Decoded::Glyph(code) => {
                let glyph = ctx.glyphs.glyph(self.font, code, self.japanese);
                ctx.surface.blit_glyph(
                    self.template.region,
                    self.template.current_x,
                    self.template.current_y,
                    &glyph,
                    self.template.colors,
                );
                self.glyph_height = glyph.height;
                self.template.current_x = self
                    .template
                    .current_x
                    .saturating_add(glyph.width as u16 + self.template.letter_spacing as u16);
                RenderResult::Print
            }
        }
    }
}
