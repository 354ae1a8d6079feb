// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-connection navigation state and the event router.
//!
//! [`route`] is the pure transition `(state, event) -> (state, effect)`. [`Session`] wraps it
//! together with the connection's [`MenuIndex`], which is rebuilt whenever a dataset arrives.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::clock::{shift_days, Clock};
use crate::menu::{MenuIndex, MenuResult};
use crate::model::{CampusTable, Restaurant};
use crate::scroll::SCROLL_STEP;

mod keymap;
mod zones;

pub use keymap::{command_for_key, event_for_input, Command, KEY_BINDINGS};
pub use zones::ZoneMap;

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn is_too_small(self) -> bool {
        self.width < MIN_WIDTH || self.height < MIN_HEIGHT
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub campus_index: usize,
    pub selected_date: NaiveDate,
    /// Requested offset; clamped against the rendered line count by [`Session::settle_scroll`].
    pub scroll_offset: usize,
    pub loading: bool,
    pub viewport: Viewport,
    /// Message of the last failed fetch, cleared once data loads.
    pub fetch_error: Option<String>,
}

impl SessionState {
    pub fn new(today: NaiveDate, viewport: Viewport) -> Self {
        Self {
            campus_index: 0,
            selected_date: today,
            scroll_offset: 0,
            loading: true,
            viewport,
            fetch_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase_in(self.viewport)
    }

    /// The phase as it would be drawn into `viewport`.
    pub fn phase_in(&self, viewport: Viewport) -> Phase {
        if viewport.is_too_small() {
            Phase::TerminalTooSmall
        } else if self.loading {
            Phase::Loading
        } else {
            Phase::Ready
        }
    }
}

/// What the renderer shows, derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    TerminalTooSmall,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Back,
    Forward,
}

impl Step {
    pub const fn delta(self) -> i64 {
        match self {
            Self::Back => -1,
            Self::Forward => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DataLoaded(Vec<Restaurant>),
    DataFailed(String),
    Resize { width: u16, height: u16 },
    NavigateCampus(Step),
    NavigateDate(Step),
    JumpToToday,
    ScrollDown,
    ScrollUp,
    /// A click on the sidebar entry of the named campus.
    ClickZone(String),
    Refresh,
    Quit,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DataLoaded(_) => "data_loaded",
            Self::DataFailed(_) => "data_failed",
            Self::Resize { .. } => "resize",
            Self::NavigateCampus(_) => "navigate_campus",
            Self::NavigateDate(_) => "navigate_date",
            Self::JumpToToday => "jump_to_today",
            Self::ScrollDown => "scroll_down",
            Self::ScrollUp => "scroll_up",
            Self::ClickZone(_) => "click_zone",
            Self::Refresh => "refresh",
            Self::Quit => "quit",
        }
    }
}

/// Side effect requested by a transition; carried out by the connection task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    Quit,
    Fetch,
}

pub struct RouteContext<'a> {
    pub campuses: &'a CampusTable,
    pub clock: &'a Clock,
}

pub fn route(mut state: SessionState, event: &Event, ctx: &RouteContext<'_>) -> (SessionState, Effect) {
    let mut effect = Effect::None;
    match event {
        Event::DataLoaded(_) => {
            state.loading = false;
            state.fetch_error = None;
        }
        Event::DataFailed(message) => {
            state.loading = false;
            state.fetch_error = Some(message.clone());
        }
        Event::Resize { width, height } => {
            state.viewport = Viewport::new(*width, *height);
        }
        Event::NavigateCampus(step) => {
            state.campus_index = wrap_campus(state.campus_index, *step, ctx.campuses.len());
            state.scroll_offset = 0;
        }
        Event::NavigateDate(step) => {
            state.selected_date = shift_days(state.selected_date, step.delta());
            state.scroll_offset = 0;
        }
        Event::JumpToToday => {
            state.selected_date = ctx.clock.today();
            state.scroll_offset = 0;
        }
        Event::ScrollDown => {
            state.scroll_offset = state.scroll_offset.saturating_add(SCROLL_STEP);
        }
        Event::ScrollUp => {
            state.scroll_offset = state.scroll_offset.saturating_sub(SCROLL_STEP);
        }
        Event::ClickZone(campus) => {
            if let Some(idx) = ctx.campuses.position(campus) {
                if idx != state.campus_index {
                    state.campus_index = idx;
                    state.scroll_offset = 0;
                }
            }
        }
        Event::Refresh => {
            // One fetch in flight per session.
            if !state.loading {
                state.loading = true;
                effect = Effect::Fetch;
            }
        }
        Event::Quit => effect = Effect::Quit,
    }
    (state, effect)
}

fn wrap_campus(current: usize, step: Step, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let current = current % total;
    match step {
        Step::Forward => (current + 1) % total,
        Step::Back => (current + total - 1) % total,
    }
}

/// One connection's state, dataset index, and collaborators.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    campuses: Arc<CampusTable>,
    clock: Clock,
    index: MenuIndex,
}

impl Session {
    pub fn new(campuses: Arc<CampusTable>, clock: Clock, viewport: Viewport) -> Self {
        let state = SessionState::new(clock.today(), viewport);
        let index = MenuIndex::empty(&campuses);
        Self { state, campuses, clock, index }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn campuses(&self) -> &CampusTable {
        &self.campuses
    }

    pub fn campus_name(&self) -> &str {
        self.campuses.name(self.state.campus_index).unwrap_or_default()
    }

    /// Menus for the selected campus and date.
    pub fn menu_result(&self) -> MenuResult {
        self.index.lookup(self.campus_name(), self.state.selected_date)
    }

    pub fn handle(&mut self, event: Event) -> Effect {
        debug!(event = event.name(), "routing session event");
        match &event {
            Event::DataLoaded(restaurants) => {
                self.index = MenuIndex::build(&self.campuses, restaurants);
            }
            Event::DataFailed(_) => {
                self.index = MenuIndex::empty(&self.campuses);
            }
            _ => {}
        }

        let ctx = RouteContext { campuses: &self.campuses, clock: &self.clock };
        let (state, effect) = route(self.state.clone(), &event, &ctx);
        self.state = state;
        effect
    }

    /// Stores the offset the last render actually used.
    pub fn settle_scroll(&mut self, offset: usize) {
        self.state.scroll_offset = offset;
    }
}
