// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Renders one session into a ratatui buffer: campus sidebar, scrolled menu pane, and key
//! footer. Rendering never mutates the session; the caller feeds the returned scroll window
//! back through [`Session::settle_scroll`] and keeps the zone map for click resolution.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::clock::format_header_date;
use crate::menu::{MenuResult, MenuSection};
use crate::model::CampusTable;
use crate::scroll::ScrollWindow;
use crate::session::{Phase, Session, SessionState, Viewport, ZoneMap};

use self::text::{text_len, truncate_with_ellipsis};

mod text;
mod theme;

pub use self::text::buffer_text;
pub use self::theme::{Theme, ThemeError, PALETTE_ENV};

include!("chrome.rs");

pub const TOO_SMALL_MESSAGE: &str = "Terminal too small";
pub const LOADING_MESSAGE: &str = "Loading menus…";
pub const NOT_FOUND_MESSAGE: &str = "No menu available for this date.";
pub const FETCH_FAILED_PREFIX: &str = "Could not load menus: ";
const NO_ITEMS_MESSAGE: &str = "no items";

/// What one render pass leaves behind for input handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    pub zones: ZoneMap,
    /// The clamped content window; `None` unless the menu pane was drawn.
    pub scroll: Option<ScrollWindow>,
}

/// The full dashboard for one state and lookup result.
pub struct Dashboard<'a> {
    state: &'a SessionState,
    campuses: &'a CampusTable,
    menus: &'a MenuResult,
    theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        state: &'a SessionState,
        campuses: &'a CampusTable,
        menus: &'a MenuResult,
        theme: &'a Theme,
    ) -> Self {
        Self { state, campuses, menus, theme }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) -> RenderOutcome {
        buf.set_style(area, self.theme.base_style());
        match self.state.phase_in(Viewport::new(area.width, area.height)) {
            Phase::TerminalTooSmall => {
                render_centered_message(area, buf, TOO_SMALL_MESSAGE, self.theme);
                RenderOutcome::default()
            }
            Phase::Loading => {
                render_centered_message(area, buf, LOADING_MESSAGE, self.theme);
                RenderOutcome::default()
            }
            Phase::Ready => self.render_ready(area, buf),
        }
    }

    fn render_ready(&self, area: Rect, buf: &mut Buffer) -> RenderOutcome {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let main_area = layout[0];
        let footer_area = layout[1];

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(sidebar_width(self.campuses, main_area.width)),
                Constraint::Min(0),
            ])
            .split(main_area);

        let zones = self.render_sidebar(panes[0], buf);
        let scroll = self.render_content(panes[1], buf);
        Paragraph::new(footer_line(self.theme)).render(footer_area, buf);

        RenderOutcome { zones, scroll: Some(scroll) }
    }

    fn render_sidebar(&self, area: Rect, buf: &mut Buffer) -> ZoneMap {
        let block = panel_block(view_title("Campus", None), false, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut zones = ZoneMap::new();
        for (idx, name) in self.campuses.names().enumerate() {
            let Ok(offset) = u16::try_from(idx) else {
                break;
            };
            if offset >= inner.height {
                break;
            }
            let row = Rect::new(inner.x, inner.y + offset, inner.width, 1);
            let selected = idx == self.state.campus_index;
            let (marker, style) = if selected {
                ("▸ ", self.theme.selection_style())
            } else {
                ("  ", self.theme.base_style())
            };
            let label = truncate_with_ellipsis(&format!("{marker}{name}"), usize::from(row.width));
            Paragraph::new(Line::styled(label, style)).render(row, buf);
            zones.insert(name, row);
        }
        zones
    }

    fn render_content(&self, area: Rect, buf: &mut Buffer) -> ScrollWindow {
        let campus = self.campuses.name(self.state.campus_index).unwrap_or_default();
        let date = format_header_date(self.state.selected_date);
        let mut block = panel_block(view_title(campus, Some(&date)), true, self.theme);
        let inner = block.inner(area);

        let lines = content_lines(self.state, self.menus, self.theme, usize::from(inner.width));
        let window = ScrollWindow::new(
            self.state.scroll_offset,
            lines.len(),
            usize::from(inner.height),
        );
        if window.overflows() {
            let range = window.visible();
            block = block.title_bottom(
                Line::styled(
                    format!(" {}-{}/{} ", range.start + 1, range.end, window.total_lines),
                    self.theme.dim_style(),
                )
                .right_aligned(),
            );
        }
        block.render(area, buf);

        let visible = lines[window.visible()].to_vec();
        Paragraph::new(visible).render(inner, buf);
        window
    }
}

/// Renders `session` into the frame and reports zones and the clamped scroll window.
pub fn draw(frame: &mut Frame<'_>, session: &Session, theme: &Theme) -> RenderOutcome {
    let menus = session.menu_result();
    let dashboard = Dashboard::new(session.state(), session.campuses(), &menus, theme);
    let area = frame.area();
    dashboard.render(area, frame.buffer_mut())
}

fn render_centered_message(area: Rect, buf: &mut Buffer, message: &str, theme: &Theme) {
    let text = truncate_with_ellipsis(message, usize::from(area.width));
    let rect = centered_line_rect(area, text_len(&text));
    if rect.is_empty() {
        return;
    }
    buf.set_stringn(rect.x, rect.y, &text, usize::from(rect.width), theme.base_style());
}

/// The scrollable menu text for the selected campus and date.
pub fn content_lines(
    state: &SessionState,
    menus: &MenuResult,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::<Line<'static>>::new();

    if let Some(error) = &state.fetch_error {
        let notice = format!("{FETCH_FAILED_PREFIX}{error}");
        lines.push(Line::styled(truncate_with_ellipsis(&notice, width), theme.error_style()));
        lines.push(Line::default());
    }

    match menus {
        MenuResult::NotFound => {
            lines.push(Line::styled(NOT_FOUND_MESSAGE, theme.base_style()));
        }
        MenuResult::Found(sections) => {
            for (idx, section) in sections.iter().enumerate() {
                if idx > 0 {
                    lines.push(Line::default());
                }
                push_section_lines(&mut lines, section, theme, width);
            }
        }
    }

    lines
}

fn push_section_lines(
    lines: &mut Vec<Line<'static>>,
    section: &MenuSection,
    theme: &Theme,
    width: usize,
) {
    let title = truncate_with_ellipsis(&section.restaurant, width);
    let mut header = vec![Span::styled(title, theme.restaurant_style())];
    if let Some(hours) = &section.hours {
        let room = width.saturating_sub(text_len(&section.restaurant) + 2);
        if room > 0 {
            header.push(Span::raw("  "));
            header.push(Span::styled(truncate_with_ellipsis(hours, room), theme.dim_style()));
        }
    }
    lines.push(Line::from(header));

    if !section.message.is_empty() {
        lines.push(Line::styled(
            truncate_with_ellipsis(&section.message, width),
            theme.dim_style(),
        ));
    } else if section.items.is_empty() {
        lines.push(Line::styled(NO_ITEMS_MESSAGE, theme.dim_style()));
    }

    for item in &section.items {
        let category = item.category();
        let name = truncate_with_ellipsis(item.name.trim(), width.saturating_sub(2));
        lines.push(Line::from(vec![
            Span::styled(category.marker(), theme.marker_style(category)),
            Span::raw(" "),
            Span::styled(name, theme.base_style()),
        ]));
    }
}

#[cfg(test)]
mod tests;
