impl<'a, S, G, IN, AU, const N: usize> TextEngine<'a, S, G, IN, AU, N>
where
    S: Surface,
    G: GlyphSource,
    IN: InputProvider,
    AU: AudioHost,
{
    /// Advances every active printer by one frame, in slot order.
    pub fn tick(&mut self) -> TickResult {
        let advance = self.poll_advance();
        if self.disabled {
            return TickResult::NoRender;
        }

        let mut ctx = RenderContext::new(
            &mut self.surface,
            &self.glyphs,
            &mut self.audio,
            &self.fonts,
            self.config.flags,
            self.config.effective_text_speed().scroll_step(),
            advance,
        );
        for printer in self.pool.active_mut() {
            printer.run_frame(&mut ctx);
        }

        if ctx.presented() {
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    fn poll_advance(&mut self) -> AdvanceState {
        let mut advance = AdvanceState::default();
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => advance.apply(event),
                Ok(None) => break,
                Err(_) => {
                    warn!("input: poll failed, frame treated as idle");
                    return AdvanceState::default();
                }
            }
        }
        advance
    }

    fn render_at_add(&mut self, printer: &mut TextPrinter<'a>) {
        let region = printer.template().region;
        let mut ctx = RenderContext::new(
            &mut self.surface,
            &self.glyphs,
            &mut self.audio,
            &self.fonts,
            self.config.flags,
            self.config.effective_text_speed().scroll_step(),
            AdvanceState::default(),
        );
        ctx.set_presenting(false);

        let finished = printer.render_to_end(&mut ctx, INSTANT_RENDER_STEP_LIMIT);
        if printer.speed() == PrintSpeed::Instant {
            ctx.set_presenting(true);
            ctx.present(region);
        }

        if finished {
            printer.finish();
        } else {
            warn!(
                "text: add-time render hit step limit region={} limit={} cursor={}",
                region.0,
                INSTANT_RENDER_STEP_LIMIT,
                printer.cursor()
            );
            printer.deactivate();
        }
    }
}
