//! Resumable per-job text printer.
//!
//! A [`TextPrinter`] draws its string one step per call to
//! [`TextPrinter::render_step`], suspending between frames in one of the
//! [`RenderState`]s. Control codes embedded in the string drive the state
//! changes.

mod braille;
mod decode;
mod wait;

use log::debug;

use crate::{
    audio::AudioHost,
    case_fold::FoldCursor,
    charmap::starts_fixed_case,
    config::TextFlags,
    font::{ColorTriple, FontBehavior, FontId, FontRegistry},
    glyph::GlyphSource,
    input::AdvanceState,
    surface::{RegionId, Surface},
    tagging::TextHandle,
};

/// Bound on steps taken when a whole string is rendered at add time.
pub const INSTANT_RENDER_STEP_LIMIT: u16 = 0x400;

/// Outcome of one render step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderResult {
    /// Drew into the back buffer.
    Print,
    /// The string is exhausted.
    Finish,
    /// Step again this frame.
    Repeat,
    /// Nothing new drawn; waiting or changed state.
    Update,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RenderState {
    #[default]
    HandleChar,
    Wait,
    Clear,
    ScrollStart,
    Scroll,
    WaitForSoundEffect,
    Pause,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrintSpeed {
    /// Render everything at add time and present it.
    Instant,
    /// Render everything at add time into the back buffer only.
    Preload,
    /// One character every `n` frames.
    Delay(u8),
    /// One character per advance press.
    OnAdvance,
}

impl PrintSpeed {
    /// Raw speed byte: `0` instant, `0xFF` preload, otherwise a delay.
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Instant,
            0xFF => Self::Preload,
            k => Self::Delay(k),
        }
    }

    pub const fn renders_at_add(self) -> bool {
        matches!(self, Self::Instant | Self::Preload)
    }

    /// Frames skipped between two characters.
    const fn pacing(self) -> u8 {
        match self {
            Self::Delay(k) => k.saturating_sub(1),
            _ => 0,
        }
    }
}

/// Parameters of one print job.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextPrinterTemplate<'a> {
    pub text: TextHandle<'a>,
    pub region: RegionId,
    pub font: FontId,
    /// Origin; newlines and clears return the pen here.
    pub x: u16,
    pub y: u16,
    /// Pen position.
    pub current_x: u16,
    pub current_y: u16,
    pub letter_spacing: u8,
    pub line_spacing: u8,
    pub colors: ColorTriple,
}

impl<'a> TextPrinterTemplate<'a> {
    /// Template with the font's default spacing and colors, pen at origin.
    pub fn new(
        fonts: &FontRegistry,
        region: RegionId,
        font: FontId,
        text: TextHandle<'a>,
        x: u16,
        y: u16,
    ) -> Self {
        let info = fonts.attributes(font);
        Self {
            text,
            region,
            font,
            x,
            y,
            current_x: x,
            current_y: y,
            letter_spacing: info.letter_spacing,
            line_spacing: info.line_spacing,
            colors: info.colors,
        }
    }

    pub const fn with_spacing(mut self, letter_spacing: u8, line_spacing: u8) -> Self {
        self.letter_spacing = letter_spacing;
        self.line_spacing = line_spacing;
        self
    }

    pub const fn with_colors(mut self, colors: ColorTriple) -> Self {
        self.colors = colors;
        self
    }
}

/// Completion hook, called after each `Print`/`Update` step and once with
/// `Finish`.
pub type PrinterCallback = for<'t> fn(&TextPrinterTemplate<'t>, RenderResult);

/// Collaborators and per-frame inputs shared by every printer stepped in
/// one frame.
pub struct RenderContext<'r, S, G, AU> {
    pub surface: &'r mut S,
    pub glyphs: &'r G,
    pub audio: &'r mut AU,
    pub fonts: &'r FontRegistry,
    pub flags: TextFlags,
    /// Pixels per frame while scrolling.
    pub scroll_step: u8,
    pub advance: AdvanceState,
    presenting: bool,
    presented: bool,
}

impl<'r, S, G, AU> RenderContext<'r, S, G, AU>
where
    S: Surface,
    G: GlyphSource,
    AU: AudioHost,
{
    pub fn new(
        surface: &'r mut S,
        glyphs: &'r G,
        audio: &'r mut AU,
        fonts: &'r FontRegistry,
        flags: TextFlags,
        scroll_step: u8,
        advance: AdvanceState,
    ) -> Self {
        Self {
            surface,
            glyphs,
            audio,
            fonts,
            flags,
            scroll_step,
            advance,
            presenting: true,
            presented: false,
        }
    }

    /// Suppresses presents until re-enabled; used while rendering at add
    /// time.
    pub fn set_presenting(&mut self, presenting: bool) {
        self.presenting = presenting;
    }

    pub fn present(&mut self, region: RegionId) {
        if self.presenting {
            self.surface.present(region);
            self.presented = true;
        }
    }

    /// Whether anything was presented through this context.
    pub fn presented(&self) -> bool {
        self.presented
    }
}

/// One in-flight print job.
#[derive(Clone, Debug)]
pub struct TextPrinter<'a> {
    template: TextPrinterTemplate<'a>,
    callback: Option<PrinterCallback>,
    cursor: usize,
    state: RenderState,
    speed: PrintSpeed,
    /// Active font; `{FONT n}` switches it.
    font: FontId,
    delay_counter: u8,
    scroll_distance: u8,
    min_letter_spacing: u8,
    japanese: bool,
    sped_up: bool,
    down_arrow_delay: u8,
    down_arrow_index: u8,
    auto_scroll_delay: u8,
    glyph_height: u8,
    fold: Option<FoldCursor>,
    active: bool,
}

impl<'a> TextPrinter<'a> {
    /// Builds an active printer. `fold` enables decapitalization; it is
    /// ignored for strings opening with the fixed-case marker.
    pub fn new(
        fonts: &FontRegistry,
        template: TextPrinterTemplate<'a>,
        speed: PrintSpeed,
        callback: Option<PrinterCallback>,
        fold: bool,
    ) -> Self {
        let fold = fold && !starts_fixed_case(template.text.text());
        Self {
            template,
            callback,
            cursor: 0,
            state: RenderState::HandleChar,
            speed,
            font: template.font,
            delay_counter: 0,
            scroll_distance: 0,
            min_letter_spacing: 0,
            japanese: false,
            sped_up: false,
            down_arrow_delay: 0,
            down_arrow_index: 0,
            auto_scroll_delay: 0,
            glyph_height: fonts.attributes(template.font).max_letter_height,
            fold: fold.then(FoldCursor::new),
            active: true,
        }
    }

    pub fn template(&self) -> &TextPrinterTemplate<'a> {
        &self.template
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn speed(&self) -> PrintSpeed {
        self.speed
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_japanese(&self) -> bool {
        self.japanese
    }

    pub fn has_been_sped_up(&self) -> bool {
        self.sped_up
    }

    pub fn folds(&self) -> bool {
        self.fold.is_some()
    }

    /// Last code the printer decoded, when folding.
    pub fn last_char(&self) -> Option<u8> {
        self.fold.and_then(|fold| fold.last_char())
    }

    /// Byte offset of the next code to decode.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Advances by one step of the active font's stepping function.
    pub fn render_step<S, G, AU>(&mut self, ctx: &mut RenderContext<'_, S, G, AU>) -> RenderResult
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        match self.state {
            RenderState::HandleChar => match ctx.fonts.behavior(self.font) {
                FontBehavior::Generic => self.handle_char(ctx),
                FontBehavior::Braille => self.handle_char_braille(ctx),
            },
            RenderState::Wait => {
                if self.wait(ctx) {
                    self.state = RenderState::HandleChar;
                }
                RenderResult::Update
            }
            RenderState::Clear => {
                if self.wait_with_down_arrow(ctx) {
                    ctx.surface.fill(self.template.region, self.template.colors.bg);
                    self.template.current_x = self.template.x;
                    self.template.current_y = self.template.y;
                    self.state = RenderState::HandleChar;
                }
                RenderResult::Update
            }
            RenderState::ScrollStart => {
                if self.wait_with_down_arrow(ctx) {
                    self.clear_down_arrow(ctx);
                    let line = ctx.fonts.attributes(self.template.font).max_letter_height;
                    self.scroll_distance = line.saturating_add(self.template.line_spacing);
                    self.template.current_x = self.template.x;
                    self.state = RenderState::Scroll;
                }
                RenderResult::Update
            }
            RenderState::Scroll => {
                if self.scroll_distance > 0 {
                    let step = ctx.scroll_step.max(1).min(self.scroll_distance);
                    ctx.surface
                        .scroll_up(self.template.region, step, self.template.colors.bg);
                    self.scroll_distance -= step;
                    ctx.present(self.template.region);
                } else {
                    self.state = RenderState::HandleChar;
                }
                RenderResult::Update
            }
            RenderState::WaitForSoundEffect => {
                if !ctx.audio.is_se_playing() {
                    self.state = RenderState::HandleChar;
                }
                RenderResult::Update
            }
            RenderState::Pause => {
                if self.delay_counter > 0 {
                    self.delay_counter -= 1;
                } else {
                    self.state = RenderState::HandleChar;
                }
                RenderResult::Update
            }
        }
    }

    /// Runs one frame: steps until a non-`Repeat` result, presents on
    /// `Print`, and reports to the callback.
    pub fn run_frame<S, G, AU>(&mut self, ctx: &mut RenderContext<'_, S, G, AU>) -> RenderResult
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        if !self.active {
            return RenderResult::Finish;
        }

        let result = loop {
            let result = self.render_step(ctx);
            if result != RenderResult::Repeat {
                break result;
            }
        };

        match result {
            RenderResult::Print => {
                ctx.present(self.template.region);
                self.notify(RenderResult::Print);
            }
            RenderResult::Update => self.notify(RenderResult::Update),
            RenderResult::Finish => self.finish(),
            RenderResult::Repeat => {}
        }
        result
    }

    /// Steps until the string finishes or `limit` steps have run. Returns
    /// whether it finished.
    pub fn render_to_end<S, G, AU>(
        &mut self,
        ctx: &mut RenderContext<'_, S, G, AU>,
        limit: u16,
    ) -> bool
    where
        S: Surface,
        G: GlyphSource,
        AU: AudioHost,
    {
        for _ in 0..limit {
            if self.render_step(ctx) == RenderResult::Finish {
                return true;
            }
        }
        false
    }

    /// Marks the job complete and reports `Finish` once.
    pub(crate) fn finish(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        debug!(
            "text: printer finished region={} font={:?} pen=({}, {})",
            self.template.region.0, self.font, self.template.current_x, self.template.current_y
        );
        self.notify(RenderResult::Finish);
    }

    fn notify(&self, result: RenderResult) {
        if let Some(callback) = self.callback {
            callback(&self.template, result);
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.template.text.text().get(self.cursor).copied()?;
        self.cursor += 1;
        Some(byte)
    }

    fn remaining(&self) -> &'a [u8] {
        let text = self.template.text.text();
        &text[self.cursor.min(text.len())..]
    }

    /// Per-character pacing shared by both steppers. Returns `false` while
    /// the printer must keep waiting this frame.
    fn pace<S, G, AU>(&mut self, ctx: &RenderContext<'_, S, G, AU>, auto_scroll_pacing: bool) -> bool {
        if ctx.advance.held && self.sped_up {
            self.delay_counter = 0;
        }

        let auto_paced = auto_scroll_pacing && ctx.flags.auto_scroll;
        if self.delay_counter > 0 && (self.speed.pacing() > 0 || auto_paced) {
            self.delay_counter -= 1;
            if ctx.flags.can_speed_up_print && ctx.advance.pressed {
                self.sped_up = true;
                self.delay_counter = 0;
            }
            return false;
        }

        if self.speed == PrintSpeed::OnAdvance {
            let go = ctx.advance.pressed || (ctx.advance.held && self.sped_up);
            if ctx.flags.can_speed_up_print && ctx.advance.pressed {
                self.sped_up = true;
            }
            if !go {
                return false;
            }
        }

        self.delay_counter = if auto_paced {
            3
        } else {
            self.speed.pacing()
        };
        true
    }

    /// Fills `width` pixels of background at the pen, one glyph tall.
    /// A transparent background leaves the span untouched.
    fn clear_span<S: Surface>(&self, surface: &mut S, width: u16) {
        let colors = self.template.colors;
        if colors.bg == 0 {
            return;
        }
        surface.fill_rect(
            self.template.region,
            self.template.current_x,
            self.template.current_y,
            width,
            self.glyph_height as u16,
            colors.bg,
        );
    }

    fn newline<S, G, AU>(&mut self, ctx: &RenderContext<'_, S, G, AU>) {
        let line = ctx.fonts.attributes(self.template.font).max_letter_height;
        self.template.current_x = self.template.x;
        self.template.current_y = self
            .template
            .current_y
            .saturating_add(line as u16 + self.template.line_spacing as u16);
    }
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests;
