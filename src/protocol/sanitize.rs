//! Escape sequence stripping
//!
//! Text fields travel inside a terminal escape sequence, so any escape
//! sequence embedded in them is removed before encoding. Recognised forms:
//! CSI (`ESC [` or `0x9b`), string sequences OSC/DCS/APC/PM/SOS (terminated
//! by BEL or ST) and plain two byte `ESC x` escapes, with or without
//! intermediate bytes.

use std::borrow::Cow;

const ESC: char = '\x1b';
const BEL: char = '\x07';
const C1_CSI: char = '\u{9b}';
const C1_ST: char = '\u{9c}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Escape,
    EscapeIntermediate,
    Csi,
    StringBody,
    StringEscape,
}

fn starts_string(ch: char) -> bool {
    matches!(ch, ']' | 'P' | '_' | '^' | 'X')
}

fn is_c1_string(ch: char) -> bool {
    matches!(ch, '\u{90}' | '\u{98}' | '\u{9d}' | '\u{9e}' | '\u{9f}')
}

/// Remove terminal escape sequences, borrowing when there is nothing to strip
pub fn strip_escape_codes(text: &str) -> Cow<'_, str> {
    if !text
        .chars()
        .any(|ch| ch == ESC || ch == C1_CSI || ch == C1_ST || is_c1_string(ch))
    {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Normal;

    for ch in text.chars() {
        state = match state {
            State::Normal => match ch {
                ESC => State::Escape,
                C1_CSI => State::Csi,
                C1_ST => State::Normal,
                c if is_c1_string(c) => State::StringBody,
                c => {
                    out.push(c);
                    State::Normal
                }
            },
            State::Escape => match ch {
                '[' => State::Csi,
                c if starts_string(c) => State::StringBody,
                '\x20'..='\x2f' => State::EscapeIntermediate,
                _ => State::Normal,
            },
            State::EscapeIntermediate => match ch {
                '\x20'..='\x2f' => State::EscapeIntermediate,
                _ => State::Normal,
            },
            State::Csi => match ch {
                '\x20'..='\x3f' => State::Csi,
                _ => State::Normal,
            },
            State::StringBody => match ch {
                BEL | C1_ST => State::Normal,
                ESC => State::StringEscape,
                _ => State::StringBody,
            },
            State::StringEscape => match ch {
                '\\' => State::Normal,
                ESC => State::StringEscape,
                _ => State::StringBody,
            },
        };
    }

    Cow::Owned(out)
}
