#![cfg_attr(not(test), no_std)]

//! Cooperative text printers with on-the-fly decapitalization.
//!
//! Strings are sequences of 8-bit character codes (see [`charmap`]). A
//! [`engine::TextEngine`] owns a fixed pool of printers and advances each one
//! by one state-machine step per frame, drawing glyphs into a caller-owned
//! [`surface::Surface`].

/// Reports a caller contract violation.
///
/// Panics in debug builds; logs and lets the caller turn the request into a
/// no-op in release builds.
macro_rules! contract_violation {
    ($($arg:tt)*) => {{
        ::log::error!($($arg)*);
        debug_assert!(false, $($arg)*);
    }};
}

pub(crate) use contract_violation;

pub mod audio;
pub mod case_fold;
pub mod char_class;
pub mod charmap;
pub mod config;
pub mod engine;
pub mod font;
pub mod glyph;
pub mod input;
pub mod pool;
pub mod printer;
pub mod surface;
pub mod tagging;
