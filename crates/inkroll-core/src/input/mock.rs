use super::{InputEvent, InputProvider};

/// Input source that presses advance on a fixed frame cadence, or never.
///
/// Each frame is one drain of [`InputProvider::poll_event`] until `None`.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockInput {
    period: Option<u16>,
    frame: u16,
    frame_open: bool,
}

impl MockInput {
    pub const fn new() -> Self {
        Self {
            period: None,
            frame: 0,
            frame_open: false,
        }
    }

    /// Presses once every `period` frames, starting at frame `period`.
    pub const fn pressing_every(period: u16) -> Self {
        Self {
            period: Some(period),
            ..Self::new()
        }
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        if self.frame_open {
            self.frame_open = false;
            return Ok(None);
        }

        self.frame = self.frame.wrapping_add(1);
        match self.period {
            Some(period) if period > 0 && self.frame % period == 0 => {
                self.frame_open = true;
                Ok(Some(InputEvent::AdvancePressed))
            }
            _ => Ok(None),
        }
    }
}
