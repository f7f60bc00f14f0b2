//! Static per-code classification used by decapitalization.

use crate::charmap::{CHAR_0, CHAR_9, CHAR_A, CHAR_SLASH, CHAR_SPACE, CHAR_Z, FIRST_CONTROL_CODE};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CharClass {
    /// Treated as an uppercase letter when looking for runs.
    pub uppercase_equivalent: bool,
    /// May flank a protected bigram.
    pub bigram_separator: bool,
    /// Added (mod 256) to an uppercase letter to obtain its lowercase code.
    pub lowercase_delta: i16,
}

impl CharClass {
    const PLAIN: Self = Self {
        uppercase_equivalent: false,
        bigram_separator: false,
        lowercase_delta: 0,
    };

    const SEPARATOR: Self = Self {
        uppercase_equivalent: false,
        bigram_separator: true,
        lowercase_delta: 0,
    };

    const fn upper(lowercase_delta: i16) -> Self {
        Self {
            uppercase_equivalent: true,
            bigram_separator: false,
            lowercase_delta,
        }
    }
}

/// Accented capitals and their lowercase codes.
const ACCENTED_PAIRS: [(u8, u8); 22] = [
    (0x01, 0x16), // À à
    (0x02, 0x17), // Á á
    (0x03, 0x68), // Â â
    (0x04, 0x19), // Ç ç
    (0x05, 0x1A), // È è
    (0x06, 0x1B), // É é
    (0x07, 0x1C), // Ê ê
    (0x08, 0x1D), // Ë ë
    (0x09, 0x1E), // Ì ì
    (0x0B, 0x20), // Î î
    (0x0C, 0x21), // Ï ï
    (0x0D, 0x22), // Ò ò
    (0x0E, 0x23), // Ó ó
    (0x0F, 0x24), // Ô ô
    (0x10, 0x25), // Œ œ
    (0x11, 0x26), // Ù ù
    (0x12, 0x27), // Ú ú
    (0x13, 0x28), // Û û
    (0x14, 0x29), // Ñ ñ
    (0xF1, 0xF4), // Ä ä
    (0xF2, 0xF5), // Ö ö
    (0xF3, 0xF6), // Ü ü
];

/// Lowercase `é`, counted as uppercase so `POKéMON` stays one run.
const E_ACUTE: u8 = 0x1B;

const fn build_table() -> [CharClass; 256] {
    let mut table = [CharClass::PLAIN; 256];

    let mut code = CHAR_A;
    while code <= CHAR_Z {
        table[code as usize] = CharClass::upper(26);
        code += 1;
    }

    let mut i = 0;
    while i < ACCENTED_PAIRS.len() {
        let (upper, lower) = ACCENTED_PAIRS[i];
        table[upper as usize] = CharClass::upper(lower as i16 - upper as i16);
        i += 1;
    }

    table[E_ACUTE as usize] = CharClass::upper(0);

    table[CHAR_SPACE as usize] = CharClass::SEPARATOR;
    table[CHAR_SLASH as usize] = CharClass::SEPARATOR;

    let mut digit = CHAR_0;
    while digit <= CHAR_9 {
        table[digit as usize] = CharClass::SEPARATOR;
        digit += 1;
    }

    let mut control = FIRST_CONTROL_CODE as usize;
    while control < 256 {
        table[control] = CharClass::SEPARATOR;
        control += 1;
    }

    table
}

static CHAR_CLASSES: [CharClass; 256] = build_table();

pub fn class_of(code: u8) -> CharClass {
    CHAR_CLASSES[code as usize]
}

pub fn is_upper(code: u8) -> bool {
    CHAR_CLASSES[code as usize].uppercase_equivalent
}

pub fn is_bigram_separator(code: u8) -> bool {
    CHAR_CLASSES[code as usize].bigram_separator
}

/// Lowercase form of `code`; non-letters map to themselves.
pub fn to_lower(code: u8) -> u8 {
    let class = CHAR_CLASSES[code as usize];
    if !class.uppercase_equivalent {
        return code;
    }
    (code as i16 + class.lowercase_delta).rem_euclid(256) as u8
}
