use log::debug;

use super::{RenderResult, RenderState, TextPrinter};
use crate::{
    audio::AudioHost,
    charmap::{
        CHAR_DYNAMIC, CHAR_EXTRA_SYMBOL, CHAR_KEYPAD_ICON, CHAR_NEWLINE, CHAR_PROMPT_CLEAR,
        CHAR_PROMPT_SCROLL, EOS, EXT_CTRL_CODE_BEGIN, EXT_CTRL_CODE_CLEAR, EXT_CTRL_CODE_CLEAR_TO,
        EXT_CTRL_CODE_COLOR, EXT_CTRL_CODE_COLOR_HIGHLIGHT_SHADOW, EXT_CTRL_CODE_ENG,
        EXT_CTRL_CODE_ESCAPE, EXT_CTRL_CODE_FILL_WINDOW, EXT_CTRL_CODE_FIXED_CASE,
        EXT_CTRL_CODE_FONT, EXT_CTRL_CODE_HIGHLIGHT, EXT_CTRL_CODE_JPN,
        EXT_CTRL_CODE_MIN_LETTER_SPACING, EXT_CTRL_CODE_PALETTE, EXT_CTRL_CODE_PAUSE,
        EXT_CTRL_CODE_PAUSE_MUSIC, EXT_CTRL_CODE_PAUSE_UNTIL_PRESS, EXT_CTRL_CODE_PLAY_BGM,
        EXT_CTRL_CODE_PLAY_SE, EXT_CTRL_CODE_RESET_FONT, EXT_CTRL_CODE_RESUME_MUSIC,
        EXT_CTRL_CODE_SHADOW, EXT_CTRL_CODE_SHIFT_DOWN, EXT_CTRL_CODE_SHIFT_RIGHT,
        EXT_CTRL_CODE_SKIP, EXT_CTRL_CODE_WAIT_SE, PLACEHOLDER_BEGIN,
    },
    contract_violation,
    font::FontId,
    glyph::GlyphSource,
    surface::Surface,
};

/// What the next code in the string asks for.
#[derive(Clone, Copy, Debug)]
pub(super) enum Decoded {
    /// Handled entirely by the decoder.
    Done(RenderResult),
    Glyph(u16),
    KeypadIcon(u8),
}

impl TextPrinter<'_> {
    /// Generic stepper for `HandleChar`.
    pub(super) fn handle_char<S, G, AU>(
        &mut self,
        ctx: &mut super::RenderContext<'_, S, G, AU>,
    ) -> RenderResult
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        if !self.pace(ctx, true) {
            return RenderResult::Update;
        }

        match self.decode(ctx) {
            Decoded::Done(result) => result,
            Decoded::KeypadIcon(icon) => {
                let width = ctx.surface.draw_keypad_icon(
                    self.template.region,
                    icon,
                    self.template.current_x,
                    self.template.current_y,
                );
                self.template.current_x = self
                    .template
                    .current_x
                    .saturating_add(width as u16 + self.template.letter_spacing as u16);
                RenderResult::Print
            }
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

                self.template.current_x = self.template.current_x.saturating_add(glyph.width as u16);
                if self.min_letter_spacing > glyph.width {
                    let pad = (self.min_letter_spacing - glyph.width) as u16;
                    self.clear_span(ctx.surface, pad);
                    self.template.current_x = self.template.current_x.saturating_add(pad);
                }
                self.template.current_x = self
                    .template
                    .current_x
                    .saturating_add(self.template.letter_spacing as u16);
                RenderResult::Print
            }
        }
    }

    /// Consumes the next code and applies any control sequence. Printable
    /// codes come back folded when the printer decapitalizes.
    pub(super) fn decode<S, G, AU>(
        &mut self,
        ctx: &mut super::RenderContext<'_, S, G, AU>,
    ) -> Decoded
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        let Some(code) = self.next_byte() else {
            return Decoded::Done(RenderResult::Finish);
        };

        if code < CHAR_DYNAMIC {
            let rest = self.remaining();
            let resolved = match (&mut self.fold, self.japanese) {
                (Some(fold), false) => fold.fold_char(code, rest),
                (Some(fold), true) => {
                    fold.note_control(code);
                    code
                }
                (None, _) => code,
            };
            return Decoded::Glyph(resolved as u16);
        }

        if let Some(fold) = &mut self.fold {
            fold.note_control(code);
        }

        match code {
            EOS => Decoded::Done(RenderResult::Finish),
            CHAR_NEWLINE => {
                self.newline(ctx);
                Decoded::Done(RenderResult::Repeat)
            }
            PLACEHOLDER_BEGIN | CHAR_DYNAMIC => match self.next_byte() {
                Some(_) => Decoded::Done(RenderResult::Repeat),
                None => Decoded::Done(RenderResult::Finish),
            },
            CHAR_PROMPT_CLEAR => {
                self.state = RenderState::Clear;
                self.init_down_arrow(ctx);
                Decoded::Done(RenderResult::Update)
            }
            CHAR_PROMPT_SCROLL => {
                self.state = RenderState::ScrollStart;
                self.init_down_arrow(ctx);
                Decoded::Done(RenderResult::Update)
            }
            CHAR_EXTRA_SYMBOL => match self.next_byte() {
                Some(symbol) => Decoded::Glyph(symbol as u16 | 0x100),
                None => Decoded::Done(RenderResult::Finish),
            },
            CHAR_KEYPAD_ICON => match self.next_byte() {
                Some(icon) => Decoded::KeypadIcon(icon),
                None => Decoded::Done(RenderResult::Finish),
            },
            EXT_CTRL_CODE_BEGIN => match self.next_byte() {
                Some(ext) => self.decode_ext(ext, ctx),
                None => Decoded::Done(RenderResult::Finish),
            },
            _ => Decoded::Done(RenderResult::Repeat),
        }
    }

    fn decode_ext<S, G, AU>(
        &mut self,
        ext: u8,
        ctx: &mut super::RenderContext<'_, S, G, AU>,
    ) -> Decoded
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        let repeat = Decoded::Done(RenderResult::Repeat);
        let finish = Decoded::Done(RenderResult::Finish);

        match ext {
            EXT_CTRL_CODE_COLOR => match self.next_byte() {
                Some(color) => {
                    self.template.colors.fg = color;
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_HIGHLIGHT => match self.next_byte() {
                Some(color) => {
                    self.template.colors.bg = color;
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_SHADOW => match self.next_byte() {
                Some(color) => {
                    self.template.colors.shadow = color;
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_COLOR_HIGHLIGHT_SHADOW => {
                let (Some(fg), Some(bg), Some(shadow)) =
                    (self.next_byte(), self.next_byte(), self.next_byte())
                else {
                    return finish;
                };
                self.template.colors.fg = fg;
                self.template.colors.bg = bg;
                self.template.colors.shadow = shadow;
                repeat
            }
            EXT_CTRL_CODE_PALETTE => match self.next_byte() {
                Some(_) => repeat,
                None => finish,
            },
            EXT_CTRL_CODE_FONT => match self.next_byte() {
                Some(raw) => {
                    match FontId::from_raw(raw) {
                        Some(font) => self.font = font,
                        None => contract_violation!("text: invalid font id={} in string", raw),
                    }
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_RESET_FONT => {
                self.font = self.template.font;
                repeat
            }
            EXT_CTRL_CODE_PAUSE => match self.next_byte() {
                Some(frames) => {
                    self.delay_counter = frames;
                    self.state = RenderState::Pause;
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_PAUSE_UNTIL_PRESS => {
                self.state = RenderState::Wait;
                if ctx.flags.auto_scroll {
                    self.auto_scroll_delay = 0;
                }
                Decoded::Done(RenderResult::Update)
            }
            EXT_CTRL_CODE_WAIT_SE => {
                self.state = RenderState::WaitForSoundEffect;
                Decoded::Done(RenderResult::Update)
            }
            EXT_CTRL_CODE_PLAY_BGM | EXT_CTRL_CODE_PLAY_SE => {
                let (Some(lo), Some(hi)) = (self.next_byte(), self.next_byte()) else {
                    return finish;
                };
                let id = u16::from_le_bytes([lo, hi]);
                if ext == EXT_CTRL_CODE_PLAY_BGM {
                    ctx.audio.play_bgm(id);
                } else {
                    ctx.audio.play_se(id);
                }
                repeat
            }
            EXT_CTRL_CODE_ESCAPE => match self.next_byte() {
                Some(code) => Decoded::Glyph(code as u16 | 0x100),
                None => finish,
            },
            EXT_CTRL_CODE_SHIFT_RIGHT => match self.next_byte() {
                Some(offset) => {
                    self.template.current_x = self.template.x.saturating_add(offset as u16);
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_SHIFT_DOWN => match self.next_byte() {
                Some(offset) => {
                    self.template.current_y = self.template.y.saturating_add(offset as u16);
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_FILL_WINDOW => {
                ctx.surface.fill(self.template.region, self.template.colors.bg);
                repeat
            }
            EXT_CTRL_CODE_PAUSE_MUSIC => {
                ctx.audio.pause_music();
                repeat
            }
            EXT_CTRL_CODE_RESUME_MUSIC => {
                ctx.audio.resume_music();
                repeat
            }
            EXT_CTRL_CODE_CLEAR => match self.next_byte() {
                Some(0) => repeat,
                Some(width) => {
                    self.clear_span(ctx.surface, width as u16);
                    self.template.current_x = self.template.current_x.saturating_add(width as u16);
                    Decoded::Done(RenderResult::Print)
                }
                None => finish,
            },
            EXT_CTRL_CODE_SKIP => match self.next_byte() {
                Some(offset) => {
                    self.template.current_x = self.template.x.saturating_add(offset as u16);
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_CLEAR_TO => match self.next_byte() {
                Some(offset) => {
                    let target = self.template.x.saturating_add(offset as u16);
                    if target > self.template.current_x {
                        self.clear_span(ctx.surface, target - self.template.current_x);
                        self.template.current_x = target;
                        return Decoded::Done(RenderResult::Print);
                    }
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_MIN_LETTER_SPACING => match self.next_byte() {
                Some(spacing) => {
                    self.min_letter_spacing = spacing;
                    repeat
                }
                None => finish,
            },
            EXT_CTRL_CODE_JPN => {
                self.japanese = true;
                repeat
            }
            EXT_CTRL_CODE_ENG => {
                self.japanese = false;
                repeat
            }
            EXT_CTRL_CODE_FIXED_CASE => repeat,
            unknown => {
                debug!("text: unknown control code ext={:#04x} cursor={}", unknown, self.cursor);
                repeat
            }
        }
    }
}
