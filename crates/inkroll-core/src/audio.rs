//! Sound effect and music hooks.

/// Effect played when a waiting printer is advanced by a press.
pub const SE_SELECT: u16 = 5;

pub trait AudioHost {
    fn play_se(&mut self, id: u16);

    fn play_bgm(&mut self, id: u16);

    /// Whether a sound effect is still playing.
    fn is_se_playing(&self) -> bool;

    fn pause_music(&mut self) {}

    fn resume_music(&mut self) {}
}

/// Audio host that plays nothing.
#[derive(Default, Debug, Clone, Copy)]
pub struct SilentAudio;

impl SilentAudio {
    pub const fn new() -> Self {
        Self
    }
}

impl AudioHost for SilentAudio {
    fn play_se(&mut self, _id: u16) {}

    fn play_bgm(&mut self, _id: u16) {}

    fn is_se_playing(&self) -> bool {
        false
    }
}
