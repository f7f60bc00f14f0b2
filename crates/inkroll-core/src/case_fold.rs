//! Automatic decapitalization.
//!
//! Every uppercase letter is lowercased except inside a *protected run*: a
//! maximal run of uppercase-equivalent letters, flanked on both sides by
//! bigram separators (or the string boundary), whose length is even. Such a
//! run reads as one or more two-letter codes (`TM01`, ` PC `, `HP/PP`) and
//! is kept as written, two letters at a time.
//!
//! Strings that open with [`FIXED_CASE_MARKER`](crate::charmap::FIXED_CASE_MARKER)
//! are emitted verbatim without the marker.

use heapless::Vec;
use log::warn;

use crate::{
    char_class::{is_bigram_separator, is_upper, to_lower},
    charmap::{EOS, FIXED_CASE_MARKER, control_sequence_len, is_control, starts_fixed_case},
    config::{DecapConfig, TextCategory},
    tagging::TextHandle,
};

/// Streaming fold state.
///
/// Fed one decoded code at a time, with the not-yet-decoded source as
/// lookahead; whole-string [`fold`] and a printer decoding the same string
/// resolve identical codes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FoldCursor {
    last_char: Option<u8>,
    protected_left: u8,
}

impl FoldCursor {
    pub const fn new() -> Self {
        Self {
            last_char: None,
            protected_left: 0,
        }
    }

    /// Last code seen by the cursor, `None` at the start of the string.
    pub fn last_char(&self) -> Option<u8> {
        self.last_char
    }

    /// Resolves one printable code. `rest` is the source following it.
    pub fn fold_char(&mut self, code: u8, rest: &[u8]) -> u8 {
        let folded = if !is_upper(code) {
            self.protected_left = 0;
            code
        } else if self.protected_left > 0 {
            self.protected_left -= 1;
            code
        } else if self.left_flank_open() {
            match protected_run_tail(rest) {
                Some(tail) => {
                    self.protected_left = tail;
                    code
                }
                None => to_lower(code),
            }
        } else {
            to_lower(code)
        };

        self.last_char = Some(code);
        folded
    }

    /// Records a control code; it separates runs.
    pub fn note_control(&mut self, code: u8) {
        self.last_char = Some(code);
        self.protected_left = 0;
    }

    fn left_flank_open(&self) -> bool {
        self.last_char.is_none_or(is_bigram_separator)
    }
}

/// Letters after the current one that belong to its protected run, or
/// `None` when the run starting here is not protected.
fn protected_run_tail(rest: &[u8]) -> Option<u8> {
    let tail = rest.iter().take_while(|&&code| is_upper(code)).count();
    let run = tail + 1;
    let right_flank_open = rest.get(tail).is_none_or(|&code| is_bigram_separator(code));

    if run % 2 == 0 && right_flank_open {
        u8::try_from(tail).ok()
    } else {
        None
    }
}

/// Output of a fold into a bounded buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Folded<const N: usize> {
    pub text: Vec<u8, N>,
    /// Input did not fit; `text` ends at the last whole character.
    pub truncated: bool,
}

impl<const N: usize> Folded<N> {
    fn new() -> Self {
        Self {
            text: Vec::new(),
            truncated: false,
        }
    }

    fn push_sequence(&mut self, bytes: &[u8]) -> bool {
        if self.truncated || self.text.extend_from_slice(bytes).is_err() {
            if !self.truncated {
                warn!(
                    "decap: fold output truncated capacity={} written={}",
                    N,
                    self.text.len()
                );
            }
            self.truncated = true;
            return false;
        }
        true
    }

    fn copy_verbatim(&mut self, text: &[u8]) {
        let mut i = 0usize;
        while i < text.len() {
            let len = control_sequence_len(&text[i..]).max(1);
            if !self.push_sequence(&text[i..i + len]) || text[i] == EOS {
                break;
            }
            i += len;
        }
    }
}

/// Decapitalizes `text` up to and including its terminator.
pub fn fold<const N: usize>(text: &[u8]) -> Folded<N> {
    let mut out = Folded::new();

    if starts_fixed_case(text) {
        out.copy_verbatim(&text[FIXED_CASE_MARKER.len()..]);
        return out;
    }

    let mut cursor = FoldCursor::new();
    let mut i = 0usize;
    while i < text.len() {
        let code = text[i];

        if is_control(code) {
            let len = control_sequence_len(&text[i..]);
            cursor.note_control(code);
            if !out.push_sequence(&text[i..i + len]) || code == EOS {
                break;
            }
            i += len;
            continue;
        }

        let folded = cursor.fold_char(code, &text[i + 1..]);
        if !out.push_sequence(&[folded]) {
            break;
        }
        i += 1;
    }

    out
}

/// Folds `handle` as text of `category`.
///
/// Returns the text unchanged (minus a leading fixed-case marker) when
/// decapitalization is off for the category or the handle is tagged
/// preserve-case.
pub fn fold_handle<const N: usize>(
    handle: TextHandle<'_>,
    category: TextCategory,
    config: &DecapConfig,
) -> Folded<N> {
    if config.folds(category) && !handle.is_mirrored() {
        return fold(handle.text());
    }

    let text = handle.text();
    let mut out = Folded::new();
    if starts_fixed_case(text) {
        out.copy_verbatim(&text[FIXED_CASE_MARKER.len()..]);
    } else {
        out.copy_verbatim(text);
    }
    out
}
