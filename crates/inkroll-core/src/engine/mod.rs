//! Orchestrator: printer pool, fonts, and per-frame stepping.

use log::{debug, warn};

use crate::{
    audio::AudioHost,
    config::EngineConfig,
    contract_violation,
    font::{ColorTriple, FontId, FontRegistry},
    glyph::GlyphSource,
    input::{AdvanceState, InputProvider},
    pool::{DEFAULT_POOL_SIZE, PrinterId, PrinterPool},
    printer::{
        INSTANT_RENDER_STEP_LIMIT, PrintSpeed, PrinterCallback, RenderContext, TextPrinter,
        TextPrinterTemplate,
    },
    surface::{RegionId, Surface},
    tagging::{TextHandle, tag},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Owns every printer and the collaborators they draw with.
///
/// Call [`TextEngine::tick`] once per frame. Strings are borrowed for `'a`.
pub struct TextEngine<'a, S, G, IN, AU, const N: usize = DEFAULT_POOL_SIZE>
where
    S: Surface,
    G: GlyphSource,
    IN: InputProvider,
    AU: AudioHost,
{
    surface: S,
    glyphs: G,
    input: IN,
    audio: AU,
    fonts: FontRegistry,
    config: EngineConfig,
    pool: PrinterPool<'a, N>,
    disabled: bool,
}

impl<'a, S, G, IN, AU, const N: usize> TextEngine<'a, S, G, IN, AU, N>
where
    S: Surface,
    G: GlyphSource,
    IN: InputProvider,
    AU: AudioHost,
{
    pub fn new(surface: S, glyphs: G, input: IN, audio: AU, config: EngineConfig) -> Self {
        Self {
            surface,
            glyphs,
            input,
            audio,
            fonts: FontRegistry::default(),
            config,
            pool: PrinterPool::new(),
            disabled: false,
        }
    }

    pub fn with_fonts(mut self, fonts: FontRegistry) -> Self {
        self.fonts = fonts;
        self
    }

    /// Starts printing `text` at `(x, y)` in `region` with the font's
    /// default spacing and colors.
    ///
    /// Returns `None` when every slot is busy. Instant and preload jobs are
    /// rendered before returning and leave their slot inactive.
    #[allow(clippy::too_many_arguments)]
    pub fn add_printer(
        &mut self,
        region: RegionId,
        font: FontId,
        text: TextHandle<'a>,
        x: u16,
        y: u16,
        speed: PrintSpeed,
        callback: Option<PrinterCallback>,
    ) -> Option<PrinterId> {
        let template = TextPrinterTemplate::new(&self.fonts, region, font, text, x, y);
        self.add_printer_with_template(template, speed, callback)
    }

    /// [`Self::add_printer`] with case preserved regardless of
    /// configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn add_printer_fixed_case(
        &mut self,
        region: RegionId,
        font: FontId,
        text: TextHandle<'a>,
        x: u16,
        y: u16,
        speed: PrintSpeed,
        callback: Option<PrinterCallback>,
    ) -> Option<PrinterId> {
        self.add_printer(region, font, tag(text), x, y, speed, callback)
    }

    pub fn add_printer_with_template(
        &mut self,
        template: TextPrinterTemplate<'a>,
        speed: PrintSpeed,
        callback: Option<PrinterCallback>,
    ) -> Option<PrinterId> {
        if self.surface.region_size(template.region).is_none() {
            contract_violation!("text: add_printer unknown region={}", template.region.0);
            return None;
        }

        let Some(id) = self.pool.free_slot() else {
            debug!(
                "text: printer pool full capacity={} region={}",
                N, template.region.0
            );
            return None;
        };

        let fold = self.config.decap.enabled && !template.text.is_mirrored();
        let mut printer = TextPrinter::new(&self.fonts, template, speed, callback, fold);
        if speed.renders_at_add() {
            self.render_at_add(&mut printer);
        }

        debug!(
            "text: printer added id={} region={} font={:?} speed={:?} fold={}",
            id.0,
            template.region.0,
            template.font,
            speed,
            printer.folds()
        );
        self.pool.install(id, printer);
        self.disabled = false;
        Some(id)
    }

    pub fn is_active(&self, id: PrinterId) -> bool {
        self.pool.is_active(id)
    }

    /// Stops a printer immediately. Pixels already drawn stay.
    pub fn deactivate(&mut self, id: PrinterId) {
        if id.index() >= N {
            contract_violation!("text: deactivate unknown printer id={}", id.0);
            return;
        }
        self.pool.deactivate(id);
    }

    pub fn deactivate_all(&mut self) {
        self.pool.deactivate_all();
    }

    pub fn printer(&self, id: PrinterId) -> Option<&TextPrinter<'a>> {
        self.pool.get(id)
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Suspends (or resumes) stepping without deactivating printers. Adding
    /// a printer resumes.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

include!("resources.rs");
include!("runtime.rs");
