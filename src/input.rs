// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Decoding of the raw terminal byte stream into key and mouse events.
//!
//! Remote clients send whatever their terminal emits: printable UTF-8, C0 control bytes for
//! ctrl chords, CSI/SS3 escape sequences for arrows and paging, and SGR (1006) mouse reports.
//! Escape sequences can be split across channel packets, so the decoder keeps incomplete
//! tails until the next chunk (or an explicit [`InputDecoder::flush`]).

use std::fmt;

/// Longest CSI sequence we are willing to buffer before treating it as garbage.
const MAX_CSI_LEN: usize = 32;

const ESC: u8 = 0x1b;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    /// `ESC` followed by a printable char, as sent for Alt/Meta chords.
    Alt(char),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
    BackTab,
    Enter,
    Backspace,
    Esc,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(' ') => f.write_str("space"),
            Self::Char(ch) => write!(f, "{ch}"),
            Self::Ctrl(ch) => write!(f, "ctrl+{ch}"),
            Self::Alt(ch) => write!(f, "alt+{ch}"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::PageUp => f.write_str("pgup"),
            Self::PageDown => f.write_str("pgdown"),
            Self::Home => f.write_str("home"),
            Self::End => f.write_str("end"),
            Self::Tab => f.write_str("tab"),
            Self::BackTab => f.write_str("backtab"),
            Self::Enter => f.write_str("enter"),
            Self::Backspace => f.write_str("backspace"),
            Self::Esc => f.write_str("esc"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    /// No button held (plain motion reports).
    None,
}

impl MouseButton {
    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
            Self::WheelUp => "wheelup",
            Self::WheelDown => "wheeldown",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Press,
    Release,
    Drag,
}

impl MouseAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Release => "release",
            Self::Drag => "drag",
        }
    }
}

/// A mouse report with 0-based cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub column: u16,
    pub row: u16,
    pub button: MouseButton,
    pub action: MouseAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Key(Key),
    Mouse(MouseEvent),
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key {key}"),
            Self::Mouse(mouse) => write!(
                f,
                "mouse {},{},{},{}",
                mouse.column,
                mouse.row,
                mouse.button.as_str(),
                mouse.action.as_str()
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Event(InputEvent, usize),
    Skip(usize),
    Incomplete,
}

/// Incremental decoder; one per connection.
#[derive(Debug, Default)]
pub struct InputDecoder {
    pending: Vec<u8>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when an incomplete sequence is waiting for more bytes.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<InputEvent> {
        self.pending.extend_from_slice(bytes);
        let mut events = Vec::new();
        let mut pos = 0;
        while pos < self.pending.len() {
            match parse_one(&self.pending[pos..]) {
                Parsed::Event(event, used) => {
                    events.push(event);
                    pos += used;
                }
                Parsed::Skip(used) => pos += used,
                Parsed::Incomplete => break,
            }
        }
        self.pending.drain(..pos);
        events
    }

    /// Resolves whatever is still buffered.
    ///
    /// A lone `ESC` becomes [`Key::Esc`]; any other partial sequence becomes `Esc` followed by
    /// its remaining bytes decoded as plain input.
    pub fn flush(&mut self) -> Vec<InputEvent> {
        let pending = std::mem::take(&mut self.pending);
        let Some((&first, rest)) = pending.split_first() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let rest = if first == ESC {
            events.push(InputEvent::Key(Key::Esc));
            rest
        } else {
            &pending[..]
        };

        let mut pos = 0;
        while pos < rest.len() {
            match parse_one(&rest[pos..]) {
                Parsed::Event(event, used) => {
                    events.push(event);
                    pos += used;
                }
                Parsed::Skip(used) => pos += used,
                Parsed::Incomplete => pos += 1,
            }
        }
        events
    }
}

fn parse_one(buf: &[u8]) -> Parsed {
    let Some(&first) = buf.first() else {
        return Parsed::Incomplete;
    };

    match first {
        ESC => parse_escape(buf),
        b'\t' => key(Key::Tab, 1),
        b'\r' | b'\n' => key(Key::Enter, 1),
        0x7f | 0x08 => key(Key::Backspace, 1),
        0x00 => key(Key::Ctrl(' '), 1),
        0x01..=0x1a => key(Key::Ctrl(char::from(b'a' + first - 1)), 1),
        0x1c..=0x1f => Parsed::Skip(1),
        _ => parse_utf8(buf),
    }
}

fn key(key: Key, used: usize) -> Parsed {
    Parsed::Event(InputEvent::Key(key), used)
}

fn parse_escape(buf: &[u8]) -> Parsed {
    match buf.get(1) {
        None => Parsed::Incomplete,
        Some(b'[') => parse_csi(buf),
        Some(b'O') => match buf.get(2) {
            None => Parsed::Incomplete,
            Some(&final_byte) => match cursor_key(final_byte) {
                Some(k) => key(k, 3),
                None => Parsed::Skip(3),
            },
        },
        Some(_) => parse_meta(buf),
    }
}

/// `ESC <key>`: a printable key becomes [`Key::Alt`]; meta-modified sequences such as
/// `ESC ESC [ A` are consumed whole and dropped.
fn parse_meta(buf: &[u8]) -> Parsed {
    match parse_one(&buf[1..]) {
        Parsed::Event(InputEvent::Key(Key::Char(ch)), used) => key(Key::Alt(ch), used + 1),
        Parsed::Event(_, used) | Parsed::Skip(used) => Parsed::Skip(used + 1),
        Parsed::Incomplete => Parsed::Incomplete,
    }
}

fn cursor_key(final_byte: u8) -> Option<Key> {
    match final_byte {
        b'A' => Some(Key::Up),
        b'B' => Some(Key::Down),
        b'C' => Some(Key::Right),
        b'D' => Some(Key::Left),
        b'H' => Some(Key::Home),
        b'F' => Some(Key::End),
        _ => None,
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    let body = &buf[2..];
    let Some(final_idx) = body.iter().position(|byte| (0x40..=0x7e).contains(byte)) else {
        if buf.len() > MAX_CSI_LEN {
            return Parsed::Skip(buf.len());
        }
        return Parsed::Incomplete;
    };

    let used = 2 + final_idx + 1;
    let params = &body[..final_idx];
    let final_byte = body[final_idx];

    if let Some(sgr) = params.strip_prefix(b"<") {
        return match parse_sgr_mouse(sgr, final_byte) {
            Some(mouse) => Parsed::Event(InputEvent::Mouse(mouse), used),
            None => Parsed::Skip(used),
        };
    }

    let parsed = match final_byte {
        b'~' => match params {
            b"1" | b"7" => Some(Key::Home),
            b"4" | b"8" => Some(Key::End),
            b"5" => Some(Key::PageUp),
            b"6" => Some(Key::PageDown),
            _ => None,
        },
        b'Z' => Some(Key::BackTab),
        other => cursor_key(other),
    };

    match parsed {
        Some(k) => key(k, used),
        None => Parsed::Skip(used),
    }
}

fn parse_sgr_mouse(params: &[u8], final_byte: u8) -> Option<MouseEvent> {
    let released = match final_byte {
        b'M' => false,
        b'm' => true,
        _ => return None,
    };

    let text = std::str::from_utf8(params).ok()?;
    let mut fields = text.split(';').map(str::parse::<u16>);
    let code = fields.next()?.ok()?;
    let column = fields.next()?.ok()?;
    let row = fields.next()?.ok()?;
    if fields.next().is_some() {
        return None;
    }

    let motion = code & 32 != 0;
    let button = if code & 64 != 0 {
        match code & 0b11 {
            0 => MouseButton::WheelUp,
            1 => MouseButton::WheelDown,
            _ => return None,
        }
    } else {
        match code & 0b11 {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::None,
        }
    };

    let action = if released {
        MouseAction::Release
    } else if motion {
        MouseAction::Drag
    } else {
        MouseAction::Press
    };

    Some(MouseEvent {
        column: column.saturating_sub(1),
        row: row.saturating_sub(1),
        button,
        action,
    })
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let width = match buf[0] {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Parsed::Skip(1),
    };
    if buf.len() < width {
        return Parsed::Incomplete;
    }
    match std::str::from_utf8(&buf[..width]).ok().and_then(|s| s.chars().next()) {
        Some(ch) => key(Key::Char(ch), width),
        None => Parsed::Skip(1),
    }
}
