impl<'a, S, G, IN, AU, const N: usize> TextEngine<'a, S, G, IN, AU, N>
where
    S: Surface,
    G: GlyphSource,
    IN: InputProvider,
    AU: AudioHost,
{
    pub fn save_colors(&self, font: FontId) -> ColorTriple {
        self.fonts.save_colors(font)
    }

    pub fn restore_colors(&mut self, font: FontId, colors: ColorTriple) {
        self.fonts.restore_colors(font, colors);
    }

    pub fn string_width(&self, font: FontId, text: &[u8], letter_spacing: Option<u8>) -> u32 {
        self.fonts.width_of(&self.glyphs, font, text, letter_spacing)
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn glyphs(&self) -> &G {
        &self.glyphs
    }

    pub fn audio(&self) -> &AU {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AU {
        &mut self.audio
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }

    pub fn into_parts(self) -> (S, G, IN, AU) {
        (self.surface, self.glyphs, self.input, self.audio)
    }
}
