//! Input abstraction layer.

pub mod mock;

pub use mock::MockInput;

/// Advance-button events consumed by waiting and pacing printers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// Newly pressed this frame.
    AdvancePressed,
    /// Still held from an earlier frame.
    AdvanceHeld,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}

/// Advance-button state for one frame.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AdvanceState {
    pub pressed: bool,
    pub held: bool,
}

impl AdvanceState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::AdvancePressed => {
                self.pressed = true;
                self.held = true;
            }
            InputEvent::AdvanceHeld => self.held = true,
        }
    }
}
