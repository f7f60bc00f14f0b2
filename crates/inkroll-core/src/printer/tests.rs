use heapless::Vec as BoundedVec;

use super::{test_support::*, *};
use crate::{
    audio::SE_SELECT,
    charmap::{CHAR_A, EOS, EXT_CTRL_CODE_BEGIN, encode},
    font::FontId,
};

const REGION: RegionId = RegionId(0);

const P: RenderResult = RenderResult::Print;
const U: RenderResult = RenderResult::Update;
const F: RenderResult = RenderResult::Finish;

const IDLE: AdvanceState = AdvanceState {
    pressed: false,
    held: false,
};
const PRESS: AdvanceState = AdvanceState {
    pressed: true,
    held: true,
};
const HOLD: AdvanceState = AdvanceState {
    pressed: false,
    held: true,
};

struct Harness {
    surface: RecordingSurface,
    glyphs: LoggingGlyphs,
    audio: RecordingAudio,
    fonts: FontRegistry,
    flags: TextFlags,
}

impl Harness {
    fn new() -> Self {
        Self {
            surface: RecordingSurface::new(&[(64, 32)]),
            glyphs: LoggingGlyphs::new(6),
            audio: RecordingAudio::default(),
            fonts: FontRegistry::default(),
            flags: TextFlags::default(),
        }
    }

    fn printer<'a>(&self, text: &'a [u8], font: FontId, speed: PrintSpeed, fold: bool) -> TextPrinter<'a> {
        self.printer_at(text, font, speed, fold, 0, 0)
    }

    fn printer_at<'a>(
        &self,
        text: &'a [u8],
        font: FontId,
        speed: PrintSpeed,
        fold: bool,
        x: u16,
        y: u16,
    ) -> TextPrinter<'a> {
        let template = TextPrinterTemplate::new(&self.fonts, REGION, font, TextHandle::source(text), x, y);
        TextPrinter::new(&self.fonts, template, speed, None, fold)
    }

    fn frame(&mut self, printer: &mut TextPrinter<'_>, advance: AdvanceState) -> RenderResult {
        let mut ctx = RenderContext::new(
            &mut self.surface,
            &self.glyphs,
            &mut self.audio,
            &self.fonts,
            self.flags,
            2,
            advance,
        );
        printer.run_frame(&mut ctx)
    }

    fn frames(&mut self, printer: &mut TextPrinter<'_>, inputs: &[AdvanceState]) -> std::vec::Vec<RenderResult> {
        inputs.iter().map(|&advance| self.frame(printer, advance)).collect()
    }

    fn idle_frames(&mut self, printer: &mut TextPrinter<'_>, count: usize) -> std::vec::Vec<RenderResult> {
        (0..count).map(|_| self.frame(printer, IDLE)).collect()
    }
}

fn text(source: &str) -> BoundedVec<u8, 64> {
    encode(source).unwrap()
}

#[test]
fn delay_draws_one_character_every_k_frames() {
    let mut h = Harness::new();
    let bytes = text("ABC");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(3), false);

    assert_eq!(h.idle_frames(&mut printer, 10), [P, U, U, P, U, U, P, U, U, F]);
    assert!(!printer.is_active());
    assert_eq!(h.surface.presents, 3);
}

#[test]
fn delay_one_draws_every_frame() {
    let mut h = Harness::new();
    let bytes = text("AB");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 3), [P, P, F]);
}

#[test]
fn press_latches_speed_up_and_hold_skips_delays() {
    let mut h = Harness::new();
    h.flags.can_speed_up_print = true;
    let bytes = text("ABC");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(5), false);

    assert_eq!(h.frames(&mut printer, &[IDLE, PRESS, HOLD, HOLD, HOLD]), [P, U, P, P, F]);
    assert!(printer.has_been_sped_up());
}

#[test]
fn press_does_not_speed_up_when_disallowed() {
    let mut h = Harness::new();
    let bytes = text("AB");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(3), false);

    assert_eq!(h.frames(&mut printer, &[IDLE, PRESS, HOLD, HOLD]), [P, U, U, P]);
    assert!(!printer.has_been_sped_up());
}

#[test]
fn on_advance_draws_one_character_per_press() {
    let mut h = Harness::new();
    let bytes = text("AB");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::OnAdvance, false);

    assert_eq!(h.frames(&mut printer, &[IDLE, PRESS, IDLE, PRESS, PRESS]), [U, P, U, P, F]);
}

#[test]
fn pause_until_press_waits_and_plays_select() {
    let mut h = Harness::new();
    let bytes = text("A{PAUSE_UNTIL_PRESS}B");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.frames(&mut printer, &[IDLE, IDLE, IDLE]), [P, U, U]);
    assert_eq!(printer.state(), RenderState::Wait);
    assert!(h.audio.se.is_empty());

    assert_eq!(h.frames(&mut printer, &[PRESS, IDLE, IDLE]), [U, P, F]);
    assert_eq!(h.audio.se, [SE_SELECT]);
}

#[test]
fn auto_scroll_wait_times_out() {
    let mut h = Harness::new();
    h.flags.auto_scroll = true;
    let bytes = text("{PAUSE_UNTIL_PRESS}A");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    h.frame(&mut printer, IDLE);
    assert_eq!(printer.state(), RenderState::Wait);
    h.idle_frames(&mut printer, 49);
    assert_eq!(printer.state(), RenderState::Wait);
    h.frame(&mut printer, IDLE);
    assert_eq!(printer.state(), RenderState::HandleChar);
    assert_eq!(h.idle_frames(&mut printer, 4), [U, U, U, P]);
    assert!(h.audio.se.is_empty());
}

#[test]
fn auto_scroll_paces_characters_at_fixed_rate() {
    let mut h = Harness::new();
    h.flags.auto_scroll = true;
    let bytes = text("AB");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(2), false);

    assert_eq!(h.idle_frames(&mut printer, 5), [P, U, U, U, P]);
}

#[test]
fn auto_scroll_paces_single_frame_speed_too() {
    let mut h = Harness::new();
    h.flags.auto_scroll = true;
    let bytes = text("ABC");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 9), [P, U, U, U, P, U, U, U, P]);
}

#[test]
fn auto_scroll_delays_characters_printed_on_advance() {
    let mut h = Harness::new();
    h.flags.auto_scroll = true;
    let bytes = text("AB");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::OnAdvance, false);

    assert_eq!(h.frames(&mut printer, &[PRESS, PRESS, IDLE, IDLE, PRESS]), [P, U, U, U, P]);
}

#[test]
fn pause_holds_for_payload_frames() {
    let mut h = Harness::new();
    let bytes = text("{PAUSE 3}A");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 6), [U, U, U, U, P, F]);
}

#[test]
fn prompt_clear_shows_arrow_then_erases_window() {
    let mut h = Harness::new();
    let bytes = text("A\\pB");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 3), [P, U, U]);
    assert_eq!(printer.state(), RenderState::Clear);
    assert_eq!(h.surface.back_pixel(REGION, 6, 6), 2);

    assert_eq!(h.frame(&mut printer, PRESS), U);
    assert_eq!(h.surface.back_pixel(REGION, 6, 6), 1);
    assert_eq!(h.surface.fills, 1);
    assert_eq!(h.audio.se, [SE_SELECT]);

    assert_eq!(h.frame(&mut printer, IDLE), P);
    assert_eq!(printer.template().current_x, 6);
    assert_eq!(printer.template().current_y, 0);
}

#[test]
fn down_arrow_redraws_every_eight_frames() {
    let mut h = Harness::new();
    let bytes = text("\\pA");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    h.frame(&mut printer, IDLE);
    h.idle_frames(&mut printer, 19);
    assert_eq!(h.surface.presents, 3);
}

#[test]
fn down_arrow_bobs_at_bottom_edge_of_coordinate_space() {
    let mut h = Harness::new();
    let bytes = text("\\pA");
    let mut printer = h.printer_at(&bytes, FontId::Normal, PrintSpeed::Delay(1), false, 0, u16::MAX);

    h.idle_frames(&mut printer, 20);
    assert_eq!(printer.state(), RenderState::Wait);
    assert_eq!(h.surface.presents, 3);
    assert_eq!(printer.template().current_y, u16::MAX);
}

#[test]
fn alternate_arrow_swaps_fill_and_shadow() {
    let mut h = Harness::new();
    h.flags.use_alternate_down_arrow = true;
    let bytes = text("\\pA");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    h.idle_frames(&mut printer, 2);
    assert_eq!(h.surface.back_pixel(REGION, 0, 6), 3);
    assert_eq!(h.surface.back_pixel(REGION, 7, 6), 2);
}

#[test]
fn prompt_scroll_scrolls_one_line_at_scroll_speed() {
    let mut h = Harness::new();
    let bytes = text("A\\lB");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 2), [P, U]);
    assert_eq!(printer.state(), RenderState::ScrollStart);
    assert_eq!(h.frame(&mut printer, PRESS), U);
    assert_eq!(printer.state(), RenderState::Scroll);
    assert_eq!(printer.template().current_x, 0);

    h.idle_frames(&mut printer, 8);
    assert_eq!(h.surface.scrolled, 16);
    assert_eq!(printer.state(), RenderState::Scroll);
    h.frame(&mut printer, IDLE);
    assert_eq!(printer.state(), RenderState::HandleChar);
    assert_eq!(h.idle_frames(&mut printer, 2), [P, F]);
}

#[test]
fn wait_se_blocks_while_effect_plays() {
    let mut h = Harness::new();
    h.audio.se_playing = true;
    let bytes = text("{WAIT_SE}A");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 3), [U, U, U]);
    assert_eq!(printer.state(), RenderState::WaitForSoundEffect);
    h.audio.se_playing = false;
    assert_eq!(h.idle_frames(&mut printer, 2), [U, P]);
}

#[test]
fn sound_and_music_codes_reach_audio_host() {
    let mut h = Harness::new();
    let bytes = text("{PLAY_SE 21}{PLAY_BGM 300}{PAUSE_MUSIC}A");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.frame(&mut printer, IDLE), P);
    assert_eq!(h.audio.se, [21]);
    assert_eq!(h.audio.bgm, [300]);
    assert!(h.audio.music_paused);
}

#[test]
fn keypad_icons_draw_in_generic_font_only() {
    let mut h = Harness::new();
    let bytes = text("{KEYPAD 3}A");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);
    h.idle_frames(&mut printer, 2);
    assert_eq!(h.surface.keypad_icons, [(3, 0, 0)]);
    assert_eq!(printer.template().current_x, 14);

    let mut h = Harness::new();
    let mut printer = h.printer(&bytes, FontId::Braille, PrintSpeed::Delay(1), false);
    assert_eq!(h.frame(&mut printer, IDLE), P);
    assert!(h.surface.keypad_icons.is_empty());
    assert_eq!(printer.template().current_x, 6);
}

#[test]
fn min_letter_spacing_pads_generic_glyphs_only() {
    let mut h = Harness::new();
    let bytes = text("{MIN_LETTER_SPACING 10}AB");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);
    h.idle_frames(&mut printer, 2);
    assert_eq!(printer.template().current_x, 20);

    let mut h = Harness::new();
    let mut printer = h.printer(&bytes, FontId::Braille, PrintSpeed::Delay(1), false);
    h.idle_frames(&mut printer, 2);
    assert_eq!(printer.template().current_x, 12);
}

#[test]
fn font_switch_changes_stepper_until_reset() {
    let mut h = Harness::new();
    let bytes = text("{FONT 6}{KEYPAD 1}{RESET_FONT}{KEYPAD 2}");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    h.idle_frames(&mut printer, 3);
    assert_eq!(printer.font(), FontId::Normal);
    assert_eq!(h.surface.keypad_icons, [(2, 0, 0)]);
}

#[test]
#[cfg_attr(debug_assertions, should_panic)]
fn invalid_font_in_string_is_a_contract_violation() {
    let mut h = Harness::new();
    let bytes = [EXT_CTRL_CODE_BEGIN, 0x06, 0x20, CHAR_A, EOS];
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.frame(&mut printer, IDLE), P);
    assert_eq!(printer.font(), FontId::Normal);
}

#[test]
fn truncated_payload_ends_the_job() {
    let mut h = Harness::new();
    let bytes = [CHAR_A, EXT_CTRL_CODE_BEGIN, 0x08];
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 2), [P, F]);
}

#[test]
fn missing_terminator_finishes_at_end_of_slice() {
    let mut h = Harness::new();
    let bytes = [CHAR_A];
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 2), [P, F]);
}

#[test]
fn unknown_extended_code_consumes_one_byte() {
    let mut h = Harness::new();
    let bytes = [EXT_CTRL_CODE_BEGIN, 0x7E, CHAR_A, EOS];
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 2), [P, F]);
    assert_eq!(h.glyphs.drawn(), [CHAR_A as u16]);
}

#[test]
fn printer_folds_while_decoding() {
    let mut h = Harness::new();
    let bytes = text("HELLO PC");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), true);
    h.idle_frames(&mut printer, 9);

    let expected: std::vec::Vec<u16> = text("hello PC")
        .iter()
        .take_while(|&&code| code != EOS)
        .map(|&code| code as u16)
        .collect();
    assert_eq!(h.glyphs.drawn(), expected);
    assert!(!printer.is_active());
}

#[test]
fn unfolded_and_japanese_text_keep_case() {
    let mut h = Harness::new();
    let bytes = text("HI");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);
    h.idle_frames(&mut printer, 3);
    assert_eq!(h.glyphs.drawn(), [bytes[0] as u16, bytes[1] as u16]);

    let mut h = Harness::new();
    let bytes = text("{JPN}HI");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), true);
    h.idle_frames(&mut printer, 3);
    assert_eq!(h.glyphs.drawn(), [bytes[2] as u16, bytes[3] as u16]);
}

#[test]
fn fixed_case_marker_disables_folding() {
    let h = Harness::new();
    let bytes = text("{FIXED_CASE}HELLO");
    let printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), true);
    assert!(!printer.folds());
}

#[test]
fn color_codes_recolor_following_glyphs() {
    let mut h = Harness::new();
    let bytes = text("{COLOR 5}A{COLOR_HIGHLIGHT_SHADOW 4 0 6}B");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);
    h.idle_frames(&mut printer, 2);

    assert_eq!(h.surface.back_pixel(REGION, 0, 0), 5);
    assert_eq!(h.surface.back_pixel(REGION, 6, 0), 4);
    assert_eq!(printer.template().colors, ColorTriple::new(4, 0, 6));
}

#[test]
fn clear_span_fills_background_unless_transparent() {
    let mut h = Harness::new();
    let bytes = text("{CLEAR 5}");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);
    assert_eq!(h.frame(&mut printer, IDLE), P);
    assert_eq!(h.surface.back_pixel(REGION, 4, 15), 1);
    assert_eq!(h.surface.back_pixel(REGION, 5, 0), 0);
    assert_eq!(printer.template().current_x, 5);

    let mut h = Harness::new();
    let bytes = text("{HIGHLIGHT 0}{CLEAR 5}");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);
    assert_eq!(h.frame(&mut printer, IDLE), P);
    assert_eq!(h.surface.back_pixel(REGION, 0, 0), 0);
    assert_eq!(printer.template().current_x, 5);
}

#[test]
fn clear_to_only_moves_forward() {
    let mut h = Harness::new();
    let bytes = text("A{CLEAR_TO 20}B");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);
    assert_eq!(h.idle_frames(&mut printer, 3), [P, P, P]);
    assert_eq!(printer.template().current_x, 26);

    let bytes = text("A{CLEAR_TO 2}B");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);
    assert_eq!(h.idle_frames(&mut printer, 3), [P, P, F]);
    assert_eq!(printer.template().current_x, 12);
}

#[test]
fn pen_moves_relative_to_origin() {
    let mut h = Harness::new();
    let bytes = text("{SHIFT_DOWN 10}{SKIP 3}A\\nB");
    let mut printer = h.printer_at(&bytes, FontId::Normal, PrintSpeed::Delay(1), false, 4, 2);

    h.frame(&mut printer, IDLE);
    assert_eq!(h.surface.back_pixel(REGION, 7, 12), 2);
    assert_eq!(h.surface.back_pixel(REGION, 6, 12), 0);

    h.frame(&mut printer, IDLE);
    assert_eq!(printer.template().current_x, 10);
    assert_eq!(printer.template().current_y, 28);
}

#[test]
fn skipped_and_symbol_codes() {
    let mut h = Harness::new();
    let bytes = text("{PLACEHOLDER 1}{DYNAMIC 2}{PALETTE 3}A{ESCAPE 5}{EXTRA 7}{FILL_WINDOW}");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Delay(1), false);

    assert_eq!(h.idle_frames(&mut printer, 4), [P, P, P, F]);
    assert_eq!(h.glyphs.drawn(), [CHAR_A as u16, 0x105, 0x107]);
    assert_eq!(h.surface.fills, 1);
}

#[test]
fn render_to_end_is_bounded() {
    let mut h = Harness::new();
    let bytes = text("A{PAUSE_UNTIL_PRESS}B");
    let mut printer = h.printer(&bytes, FontId::Normal, PrintSpeed::Instant, false);
    let mut ctx = RenderContext::new(
        &mut h.surface,
        &h.glyphs,
        &mut h.audio,
        &h.fonts,
        h.flags,
        2,
        IDLE,
    );
    ctx.set_presenting(false);

    assert!(!printer.render_to_end(&mut ctx, INSTANT_RENDER_STEP_LIMIT));
    assert!(!ctx.presented());
    assert_eq!(printer.state(), RenderState::Wait);
}
