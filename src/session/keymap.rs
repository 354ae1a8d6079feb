// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Event, Step, ZoneMap};
use crate::input::{InputEvent, Key, MouseAction, MouseButton};

/// Everything a key press can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    PrevCampus,
    NextCampus,
    PrevDay,
    NextDay,
    Today,
    ScrollDown,
    ScrollUp,
    Refresh,
}

impl Command {
    pub fn event(self) -> Event {
        match self {
            Self::Quit => Event::Quit,
            Self::PrevCampus => Event::NavigateCampus(Step::Back),
            Self::NextCampus => Event::NavigateCampus(Step::Forward),
            Self::PrevDay => Event::NavigateDate(Step::Back),
            Self::NextDay => Event::NavigateDate(Step::Forward),
            Self::Today => Event::JumpToToday,
            Self::ScrollDown => Event::ScrollDown,
            Self::ScrollUp => Event::ScrollUp,
            Self::Refresh => Event::Refresh,
        }
    }
}

pub const KEY_BINDINGS: &[(Key, Command)] = &[
    (Key::Char('q'), Command::Quit),
    (Key::Ctrl('c'), Command::Quit),
    (Key::Esc, Command::Quit),
    (Key::Up, Command::PrevCampus),
    (Key::Char('k'), Command::PrevCampus),
    (Key::Down, Command::NextCampus),
    (Key::Char('j'), Command::NextCampus),
    (Key::Tab, Command::NextCampus),
    (Key::Left, Command::PrevDay),
    (Key::Char('h'), Command::PrevDay),
    (Key::Right, Command::NextDay),
    (Key::Char('l'), Command::NextDay),
    (Key::Char('t'), Command::Today),
    (Key::PageDown, Command::ScrollDown),
    (Key::Char('J'), Command::ScrollDown),
    (Key::PageUp, Command::ScrollUp),
    (Key::Char('K'), Command::ScrollUp),
    (Key::Char('r'), Command::Refresh),
];

pub fn command_for_key(key: Key) -> Option<Command> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, command)| *command)
}

/// Translates one decoded input event, resolving left clicks against the last frame's zones.
pub fn event_for_input(input: &InputEvent, zones: &ZoneMap) -> Option<Event> {
    match input {
        InputEvent::Key(key) => command_for_key(*key).map(Command::event),
        InputEvent::Mouse(mouse) => match (mouse.button, mouse.action) {
            (MouseButton::WheelDown, MouseAction::Press) => Some(Event::ScrollDown),
            (MouseButton::WheelUp, MouseAction::Press) => Some(Event::ScrollUp),
            (MouseButton::Left, MouseAction::Press) => zones
                .hit(mouse.column, mouse.row)
                .map(|zone| Event::ClickZone(zone.to_owned())),
            _ => None,
        },
    }
}
