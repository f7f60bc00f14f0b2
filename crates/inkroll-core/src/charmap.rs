//! Character codes, reserved control codes, and the authored-text encoder.
//!
//! Every string is a sequence of 8-bit codes terminated by [`EOS`] (or by the
//! end of the slice). Codes `0xF7..=0xFF` are reserved for control
//! sequences; [`EXT_CTRL_CODE_BEGIN`] introduces an extended control code
//! whose payload length is given by [`ext_ctrl_payload_len`].

use heapless::Vec;

pub const CHAR_SPACE: u8 = 0x00;
pub const CHAR_0: u8 = 0xA1;
pub const CHAR_9: u8 = 0xAA;
pub const CHAR_SLASH: u8 = 0xBA;
pub const CHAR_A: u8 = 0xBB;
pub const CHAR_Z: u8 = 0xD4;
#[allow(non_upper_case_globals)]
pub const CHAR_a: u8 = 0xD5;
#[allow(non_upper_case_globals)]
pub const CHAR_z: u8 = 0xEE;

pub const CHAR_DYNAMIC: u8 = 0xF7;
pub const CHAR_KEYPAD_ICON: u8 = 0xF8;
pub const CHAR_EXTRA_SYMBOL: u8 = 0xF9;
pub const CHAR_PROMPT_SCROLL: u8 = 0xFA;
pub const CHAR_PROMPT_CLEAR: u8 = 0xFB;
pub const EXT_CTRL_CODE_BEGIN: u8 = 0xFC;
pub const PLACEHOLDER_BEGIN: u8 = 0xFD;
pub const CHAR_NEWLINE: u8 = 0xFE;
pub const EOS: u8 = 0xFF;

/// First code of the reserved control range.
pub const FIRST_CONTROL_CODE: u8 = CHAR_DYNAMIC;

pub const EXT_CTRL_CODE_COLOR: u8 = 0x01;
pub const EXT_CTRL_CODE_HIGHLIGHT: u8 = 0x02;
pub const EXT_CTRL_CODE_SHADOW: u8 = 0x03;
pub const EXT_CTRL_CODE_COLOR_HIGHLIGHT_SHADOW: u8 = 0x04;
pub const EXT_CTRL_CODE_PALETTE: u8 = 0x05;
pub const EXT_CTRL_CODE_FONT: u8 = 0x06;
pub const EXT_CTRL_CODE_RESET_FONT: u8 = 0x07;
pub const EXT_CTRL_CODE_PAUSE: u8 = 0x08;
pub const EXT_CTRL_CODE_PAUSE_UNTIL_PRESS: u8 = 0x09;
pub const EXT_CTRL_CODE_WAIT_SE: u8 = 0x0A;
pub const EXT_CTRL_CODE_PLAY_BGM: u8 = 0x0B;
pub const EXT_CTRL_CODE_ESCAPE: u8 = 0x0C;
pub const EXT_CTRL_CODE_SHIFT_RIGHT: u8 = 0x0D;
pub const EXT_CTRL_CODE_SHIFT_DOWN: u8 = 0x0E;
pub const EXT_CTRL_CODE_FILL_WINDOW: u8 = 0x0F;
pub const EXT_CTRL_CODE_PLAY_SE: u8 = 0x10;
pub const EXT_CTRL_CODE_CLEAR: u8 = 0x11;
pub const EXT_CTRL_CODE_SKIP: u8 = 0x12;
pub const EXT_CTRL_CODE_CLEAR_TO: u8 = 0x13;
pub const EXT_CTRL_CODE_MIN_LETTER_SPACING: u8 = 0x14;
pub const EXT_CTRL_CODE_JPN: u8 = 0x15;
pub const EXT_CTRL_CODE_ENG: u8 = 0x16;
pub const EXT_CTRL_CODE_PAUSE_MUSIC: u8 = 0x17;
pub const EXT_CTRL_CODE_RESUME_MUSIC: u8 = 0x18;
pub const EXT_CTRL_CODE_FIXED_CASE: u8 = 0x19;

/// The fixed-case marker as it appears at the start of a string.
pub const FIXED_CASE_MARKER: [u8; 2] = [EXT_CTRL_CODE_BEGIN, EXT_CTRL_CODE_FIXED_CASE];

/// Payload bytes following an extended control code.
///
/// Unknown codes carry no payload, so a malformed sequence only ever skips
/// the code byte itself.
pub const fn ext_ctrl_payload_len(code: u8) -> usize {
    match code {
        EXT_CTRL_CODE_COLOR_HIGHLIGHT_SHADOW => 3,
        EXT_CTRL_CODE_PLAY_BGM | EXT_CTRL_CODE_PLAY_SE => 2,
        EXT_CTRL_CODE_COLOR
        | EXT_CTRL_CODE_HIGHLIGHT
        | EXT_CTRL_CODE_SHADOW
        | EXT_CTRL_CODE_PALETTE
        | EXT_CTRL_CODE_FONT
        | EXT_CTRL_CODE_PAUSE
        | EXT_CTRL_CODE_ESCAPE
        | EXT_CTRL_CODE_SHIFT_RIGHT
        | EXT_CTRL_CODE_SHIFT_DOWN
        | EXT_CTRL_CODE_CLEAR
        | EXT_CTRL_CODE_SKIP
        | EXT_CTRL_CODE_CLEAR_TO
        | EXT_CTRL_CODE_MIN_LETTER_SPACING => 1,
        _ => 0,
    }
}

pub const fn is_control(code: u8) -> bool {
    code >= FIRST_CONTROL_CODE
}

/// Length in bytes of the control sequence that starts at `text[0]`,
/// clamped to the slice.
///
/// Returns `1` for printable codes.
pub fn control_sequence_len(text: &[u8]) -> usize {
    let Some(&code) = text.first() else {
        return 0;
    };

    let len = match code {
        EXT_CTRL_CODE_BEGIN => match text.get(1) {
            Some(&ext) => 2 + ext_ctrl_payload_len(ext),
            None => 1,
        },
        CHAR_DYNAMIC | CHAR_KEYPAD_ICON | CHAR_EXTRA_SYMBOL | PLACEHOLDER_BEGIN => 2,
        _ => 1,
    };

    len.min(text.len())
}

/// Whether the string opens with [`FIXED_CASE_MARKER`].
pub fn starts_fixed_case(text: &[u8]) -> bool {
    text.starts_with(&FIXED_CASE_MARKER)
}

/// Printable code table shared by the encoder and [`decode_char`].
const CHARS: &[(char, u8)] = &[
    (' ', 0x00),
    ('À', 0x01),
    ('Á', 0x02),
    ('Â', 0x03),
    ('Ç', 0x04),
    ('È', 0x05),
    ('É', 0x06),
    ('Ê', 0x07),
    ('Ë', 0x08),
    ('Ì', 0x09),
    ('Î', 0x0B),
    ('Ï', 0x0C),
    ('Ò', 0x0D),
    ('Ó', 0x0E),
    ('Ô', 0x0F),
    ('Œ', 0x10),
    ('Ù', 0x11),
    ('Ú', 0x12),
    ('Û', 0x13),
    ('Ñ', 0x14),
    ('ß', 0x15),
    ('à', 0x16),
    ('á', 0x17),
    ('ç', 0x19),
    ('è', 0x1A),
    ('é', 0x1B),
    ('ê', 0x1C),
    ('ë', 0x1D),
    ('ì', 0x1E),
    ('î', 0x20),
    ('ï', 0x21),
    ('ò', 0x22),
    ('ó', 0x23),
    ('ô', 0x24),
    ('œ', 0x25),
    ('ù', 0x26),
    ('ú', 0x27),
    ('û', 0x28),
    ('ñ', 0x29),
    ('º', 0x2A),
    ('ª', 0x2B),
    ('&', 0x2D),
    ('+', 0x2E),
    ('=', 0x35),
    (';', 0x36),
    ('%', 0x5B),
    ('(', 0x5C),
    (')', 0x5D),
    ('â', 0x68),
    ('í', 0x6F),
    ('<', 0x85),
    ('>', 0x86),
    ('0', 0xA1),
    ('1', 0xA2),
    ('2', 0xA3),
    ('3', 0xA4),
    ('4', 0xA5),
    ('5', 0xA6),
    ('6', 0xA7),
    ('7', 0xA8),
    ('8', 0xA9),
    ('9', 0xAA),
    ('!', 0xAB),
    ('?', 0xAC),
    ('.', 0xAD),
    ('-', 0xAE),
    ('·', 0xAF),
    ('…', 0xB0),
    ('“', 0xB1),
    ('”', 0xB2),
    ('‘', 0xB3),
    ('’', 0xB4),
    ('\'', 0xB4),
    ('♂', 0xB5),
    ('♀', 0xB6),
    ('$', 0xB7),
    (',', 0xB8),
    ('×', 0xB9),
    ('/', 0xBA),
    ('▶', 0xEF),
    (':', 0xF0),
    ('Ä', 0xF1),
    ('Ö', 0xF2),
    ('Ü', 0xF3),
    ('ä', 0xF4),
    ('ö', 0xF5),
    ('ü', 0xF6),
];

/// Maps one printable character to its code.
pub fn encode_char(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(CHAR_A + (c as u8 - b'A')),
        'a'..='z' => Some(CHAR_a + (c as u8 - b'a')),
        _ => CHARS
            .iter()
            .find(|(candidate, _)| *candidate == c)
            .map(|(_, code)| *code),
    }
}

/// Maps a printable code back to a character.
pub fn decode_char(code: u8) -> Option<char> {
    match code {
        CHAR_A..=CHAR_Z => Some((b'A' + (code - CHAR_A)) as char),
        CHAR_a..=CHAR_z => Some((b'a' + (code - CHAR_a)) as char),
        _ => CHARS
            .iter()
            .find(|(_, candidate)| *candidate == code)
            .map(|(c, _)| *c),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodeError {
    /// A `{...}` token name is not a known control code.
    UnknownToken,
    /// A `{` without its closing `}`.
    UnterminatedToken,
    /// A token argument is missing, unparsable, or out of range.
    BadArgument,
    /// Character has no code in the table.
    UnknownChar(char),
    /// Output buffer too small (including the terminator).
    Overflow,
}

enum Token {
    Ext(u8),
    Single(u8),
}

fn token_by_name(name: &str) -> Option<(Token, usize)> {
    let token = match name {
        "COLOR" => (Token::Ext(EXT_CTRL_CODE_COLOR), 1),
        "HIGHLIGHT" => (Token::Ext(EXT_CTRL_CODE_HIGHLIGHT), 1),
        "SHADOW" => (Token::Ext(EXT_CTRL_CODE_SHADOW), 1),
        "COLOR_HIGHLIGHT_SHADOW" => (Token::Ext(EXT_CTRL_CODE_COLOR_HIGHLIGHT_SHADOW), 3),
        "PALETTE" => (Token::Ext(EXT_CTRL_CODE_PALETTE), 1),
        "FONT" => (Token::Ext(EXT_CTRL_CODE_FONT), 1),
        "RESET_FONT" => (Token::Ext(EXT_CTRL_CODE_RESET_FONT), 0),
        "PAUSE" => (Token::Ext(EXT_CTRL_CODE_PAUSE), 1),
        "PAUSE_UNTIL_PRESS" => (Token::Ext(EXT_CTRL_CODE_PAUSE_UNTIL_PRESS), 0),
        "WAIT_SE" => (Token::Ext(EXT_CTRL_CODE_WAIT_SE), 0),
        "PLAY_BGM" => (Token::Ext(EXT_CTRL_CODE_PLAY_BGM), 1),
        "ESCAPE" => (Token::Ext(EXT_CTRL_CODE_ESCAPE), 1),
        "SHIFT_RIGHT" => (Token::Ext(EXT_CTRL_CODE_SHIFT_RIGHT), 1),
        "SHIFT_DOWN" => (Token::Ext(EXT_CTRL_CODE_SHIFT_DOWN), 1),
        "FILL_WINDOW" => (Token::Ext(EXT_CTRL_CODE_FILL_WINDOW), 0),
        "PLAY_SE" => (Token::Ext(EXT_CTRL_CODE_PLAY_SE), 1),
        "CLEAR" => (Token::Ext(EXT_CTRL_CODE_CLEAR), 1),
        "SKIP" => (Token::Ext(EXT_CTRL_CODE_SKIP), 1),
        "CLEAR_TO" => (Token::Ext(EXT_CTRL_CODE_CLEAR_TO), 1),
        "MIN_LETTER_SPACING" => (Token::Ext(EXT_CTRL_CODE_MIN_LETTER_SPACING), 1),
        "JPN" => (Token::Ext(EXT_CTRL_CODE_JPN), 0),
        "ENG" => (Token::Ext(EXT_CTRL_CODE_ENG), 0),
        "PAUSE_MUSIC" => (Token::Ext(EXT_CTRL_CODE_PAUSE_MUSIC), 0),
        "RESUME_MUSIC" => (Token::Ext(EXT_CTRL_CODE_RESUME_MUSIC), 0),
        "FIXED_CASE" => (Token::Ext(EXT_CTRL_CODE_FIXED_CASE), 0),
        "PROMPT_CLEAR" => (Token::Single(CHAR_PROMPT_CLEAR), 0),
        "PROMPT_SCROLL" => (Token::Single(CHAR_PROMPT_SCROLL), 0),
        "KEYPAD" => (Token::Single(CHAR_KEYPAD_ICON), 1),
        "EXTRA" => (Token::Single(CHAR_EXTRA_SYMBOL), 1),
        "DYNAMIC" => (Token::Single(CHAR_DYNAMIC), 1),
        "PLACEHOLDER" => (Token::Single(PLACEHOLDER_BEGIN), 1),
        _ => return None,
    };
    Some(token)
}

fn parse_number(arg: &str) -> Result<u16, EncodeError> {
    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => arg.parse::<u16>(),
    };
    parsed.map_err(|_| EncodeError::BadArgument)
}

fn push<const N: usize>(out: &mut Vec<u8, N>, byte: u8) -> Result<(), EncodeError> {
    out.push(byte).map_err(|_| EncodeError::Overflow)
}

fn encode_token<const N: usize>(body: &str, out: &mut Vec<u8, N>) -> Result<(), EncodeError> {
    let mut parts = body.split_whitespace();
    let name = parts.next().ok_or(EncodeError::UnknownToken)?;
    let (token, arity) = token_by_name(name).ok_or(EncodeError::UnknownToken)?;

    match token {
        Token::Ext(code) => {
            push(out, EXT_CTRL_CODE_BEGIN)?;
            push(out, code)?;
        }
        Token::Single(code) => push(out, code)?,
    }

    let wide = matches!(token, Token::Ext(EXT_CTRL_CODE_PLAY_BGM | EXT_CTRL_CODE_PLAY_SE));
    for _ in 0..arity {
        let value = parse_number(parts.next().ok_or(EncodeError::BadArgument)?)?;
        if wide {
            let [lo, hi] = value.to_le_bytes();
            push(out, lo)?;
            push(out, hi)?;
        } else {
            let byte = u8::try_from(value).map_err(|_| EncodeError::BadArgument)?;
            push(out, byte)?;
        }
    }

    if parts.next().is_some() {
        return Err(EncodeError::BadArgument);
    }
    Ok(())
}

/// Encodes authored text into character codes, terminated by [`EOS`].
///
/// `{NAME args}` emits a control sequence (`{PAUSE 30}`, `{PLAY_SE 0x15}`,
/// `{FIXED_CASE}`); `\n` is a newline, `\p` a prompt-then-clear and `\l` a
/// prompt-then-scroll.
pub fn encode<const N: usize>(text: &str) -> Result<Vec<u8, N>, EncodeError> {
    let mut out = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '{' => {
                let end = rest.find('}').ok_or(EncodeError::UnterminatedToken)?;
                encode_token(&rest[..end], &mut out)?;
                rest = &rest[end + 1..];
            }
            '\n' => push(&mut out, CHAR_NEWLINE)?,
            '\\' => {
                let code = match rest.chars().next() {
                    Some('n') => CHAR_NEWLINE,
                    Some('p') => CHAR_PROMPT_CLEAR,
                    Some('l') => CHAR_PROMPT_SCROLL,
                    _ => return Err(EncodeError::UnknownChar('\\')),
                };
                rest = &rest[1..];
                push(&mut out, code)?;
            }
            _ => push(&mut out, encode_char(c).ok_or(EncodeError::UnknownChar(c))?)?,
        }
    }

    push(&mut out, EOS)?;
    Ok(out)
}

/// Renders printable codes back to text, skipping control sequences and
/// stopping at [`EOS`]. Unknown printable codes become `?`.
pub fn decode<const N: usize>(text: &[u8]) -> heapless::String<N> {
    let mut out = heapless::String::new();
    let mut i = 0usize;

    while i < text.len() {
        let code = text[i];
        if code == EOS {
            break;
        }
        if code == CHAR_NEWLINE {
            let _ = out.push('\n');
            i += 1;
            continue;
        }
        if is_control(code) {
            i += control_sequence_len(&text[i..]).max(1);
            continue;
        }
        if out.push(decode_char(code).unwrap_or('?')).is_err() {
            break;
        }
        i += 1;
    }

    out
}
