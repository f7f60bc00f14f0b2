use inkroll_core::{
    audio::SilentAudio,
    charmap::{EncodeError, encode},
    config::{EngineConfig, TextCategory, TextFlags, TextSpeedOption},
    engine::{TextEngine, TickResult},
    font::FontId,
    input::MockInput,
    printer::{PrintSpeed, PrinterCallback, RenderResult, TextPrinterTemplate},
    surface::Surface,
    tagging::TextHandle,
};
use log::{LevelFilter, error, info};
use tilewin::{WindowSet, bytes_for};

use glyphs::Font5x7;

#[path = "demo/console.rs"]
mod console;
#[path = "demo/glyphs.rs"]
mod glyphs;

const WINDOW_WIDTH: u16 = 176;
const DIALOG_HEIGHT: u16 = 32;
const BANNER_HEIGHT: u16 = 12;
const WINDOW_BYTES: usize = bytes_for(WINDOW_WIDTH, DIALOG_HEIGHT);
const TEXT_BYTES: usize = 256;
const MAX_FRAMES: u32 = 900;
const PRESS_PERIOD: u16 = 40;
const WINDOW_BG: u8 = 1;

const BANNER: &str = "PETALBURG WOODS";
const NICKNAME: &str = "ZIGZAGOON";
const DIALOG: &str = "WELCOME TO THE POKéMON CENTER!\nWE HEAL YOUR POKéMON TO\\lFULL HEALTH.{PAUSE 30}\\pTHE PC IS OVER THERE.";

type Text = heapless::Vec<u8, TEXT_BYTES>;

fn on_printer(template: &TextPrinterTemplate<'_>, result: RenderResult) {
    if result == RenderResult::Finish {
        info!(
            "demo: printer finished region={} pen=({}, {})",
            template.region.0, template.current_x, template.current_y
        );
    }
}

fn encode_all(sources: [&str; 3]) -> Result<[Text; 3], EncodeError> {
    let [a, b, c] = sources;
    Ok([encode(a)?, encode(b)?, encode(c)?])
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let [banner, nickname, dialog] = match encode_all([BANNER, NICKNAME, DIALOG]) {
        Ok(texts) => texts,
        Err(err) => {
            error!("demo: encode failed err={:?}", err);
            return;
        }
    };

    let mut windows: WindowSet<2, WINDOW_BYTES> = WindowSet::new();
    let (Ok(banner_region), Ok(dialog_region)) = (
        windows.add_window(WINDOW_WIDTH, BANNER_HEIGHT),
        windows.add_window(WINDOW_WIDTH, DIALOG_HEIGHT),
    ) else {
        error!("demo: window setup failed");
        return;
    };
    windows.fill(banner_region, WINDOW_BG);
    windows.fill(dialog_region, WINDOW_BG);

    let config = EngineConfig::default()
        .with_flags(TextFlags {
            can_speed_up_print: true,
            ..TextFlags::default()
        });
    let config = EngineConfig {
        text_speed: TextSpeedOption::Fast,
        ..config
    };
    let mut engine: TextEngine<'_, _, _, _, _> = TextEngine::new(
        windows,
        Font5x7,
        MockInput::pressing_every(PRESS_PERIOD),
        SilentAudio::new(),
        config,
    );

    let banner = config
        .decap
        .gate(TextCategory::MapNames, TextHandle::source(&banner));
    let nickname = config
        .decap
        .gate(TextCategory::Nicknames, TextHandle::working(&nickname));
    let nickname_x = engine
        .string_width(FontId::Normal, banner.text(), None)
        .saturating_add(12) as u16;

    engine.add_printer(banner_region, FontId::Normal, banner, 2, 2, PrintSpeed::Instant, None);
    engine.add_printer(banner_region, FontId::Normal, nickname, nickname_x, 2, PrintSpeed::Instant, None);
    let Some(dialog_id) = engine.add_printer(
        dialog_region,
        FontId::Normal,
        TextHandle::source(&dialog),
        2,
        2,
        PrintSpeed::Delay(config.text_speed.delay()),
        Some(on_printer as PrinterCallback),
    ) else {
        error!("demo: no free printer slot");
        return;
    };

    let mut renders = 0u32;
    let mut frames = 0u32;
    while frames < MAX_FRAMES && engine.is_active(dialog_id) {
        if engine.tick() == TickResult::RenderRequested {
            renders += 1;
        }
        frames += 1;
    }
    info!("demo: run complete frames={} renders={}", frames, renders);

    let windows = engine.surface();
    for region in [banner_region, dialog_region] {
        if let Some(window) = windows.window(region) {
            println!("{}", console::render(window));
        }
    }
}
