// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use rstest::rstest;

use super::{
    buffer_text, content_lines, draw, footer_label_ucfirst, sidebar_width, Dashboard,
    RenderOutcome, Theme, LOADING_MESSAGE, NOT_FOUND_MESSAGE, TOO_SMALL_MESSAGE,
};
use crate::clock::Clock;
use crate::menu::{MenuIndex, MenuResult};
use crate::model::fixtures::{date, item, two_campus_dataset};
use crate::model::{CampusTable, Menu, Restaurant};
use crate::session::{Event, Session, SessionState, Step, Viewport};

fn today() -> NaiveDate {
    date(2024, 10, 14)
}

fn ready_state(campus_index: usize, viewport: Viewport) -> SessionState {
    SessionState { campus_index, loading: false, ..SessionState::new(today(), viewport) }
}

fn render(state: &SessionState, menus: &MenuResult) -> (Buffer, RenderOutcome) {
    let table = CampusTable::builtin();
    let theme = Theme::default();
    let area = Rect::new(0, 0, state.viewport.width, state.viewport.height);
    let mut buf = Buffer::empty(area);
    let outcome = Dashboard::new(state, &table, menus, &theme).render(area, &mut buf);
    (buf, outcome)
}

fn kumpula_today() -> MenuResult {
    MenuIndex::build(&CampusTable::builtin(), &two_campus_dataset(today())).lookup("Kumpula", today())
}

#[rstest]
#[case(true)]
#[case(false)]
fn too_small_viewport_shows_only_the_guard(#[case] loading: bool) {
    let state = SessionState {
        loading,
        ..ready_state(1, Viewport::new(20, 5))
    };
    let (buf, outcome) = render(&state, &kumpula_today());
    assert_eq!(buffer_text(&buf).trim(), TOO_SMALL_MESSAGE);
    assert!(outcome.zones.is_empty());
    assert_eq!(outcome.scroll, None);
}

#[test]
fn guard_message_is_truncated_on_tiny_screens() {
    let state = ready_state(0, Viewport::new(5, 1));
    let (buf, _) = render(&state, &MenuResult::NotFound);
    assert_eq!(buffer_text(&buf), "Term…");
}

#[test]
fn loading_shows_a_single_centered_message() {
    let state = SessionState { loading: true, ..ready_state(0, Viewport::new(60, 12)) };
    let (buf, outcome) = render(&state, &MenuResult::NotFound);
    let text = buffer_text(&buf);
    assert_eq!(text.trim(), LOADING_MESSAGE);
    let row = text.lines().position(|line| !line.is_empty()).expect("message row");
    assert_eq!(row, 6);
    assert!(outcome.zones.is_empty());
}

#[test]
fn ready_view_lists_campuses_menus_and_footer() {
    let state = ready_state(1, Viewport::new(80, 20));
    let (buf, outcome) = render(&state, &kumpula_today());
    let text = buffer_text(&buf);

    for campus in CampusTable::builtin().names() {
        assert!(text.contains(campus), "missing {campus} in\n{text}");
    }
    assert!(text.contains("▸ Kumpula"));
    assert!(text.contains("Kumpula · ma 14.10.2024"));
    assert!(text.contains("Physicum"));
    assert!(text.contains("Exactum  10:30-15:00"));
    assert!(text.contains("Quit:q"));

    let lounas = text.find("● Lounas").expect("Lounas");
    let vegan = text.find("♣ Vegaanilounas").expect("Vegaanilounas");
    assert!(lounas < vegan);

    assert_eq!(outcome.zones.len(), 5);
    let scroll = outcome.scroll.expect("scroll window");
    assert_eq!(scroll.offset, 0);
}

#[test]
fn sidebar_zones_cover_each_campus_row() {
    let state = ready_state(0, Viewport::new(80, 20));
    let (_, outcome) = render(&state, &MenuResult::NotFound);
    let keskusta = outcome.zones.get("Keskusta").expect("zone");
    let kumpula = outcome.zones.get("Kumpula").expect("zone");
    assert_eq!(keskusta.y + 1, kumpula.y);
    assert_eq!(outcome.zones.hit(keskusta.x + 1, kumpula.y), Some("Kumpula"));
    assert_eq!(outcome.zones.hit(79, kumpula.y), None);
}

#[test]
fn not_found_renders_the_literal_message() {
    let state = ready_state(1, Viewport::new(80, 20));
    let (buf, _) = render(&state, &MenuResult::NotFound);
    let text = buffer_text(&buf);
    assert!(text.contains(NOT_FOUND_MESSAGE));
    assert!(!text.contains("Physicum"));
}

#[test]
fn fetch_failure_is_noted_above_not_found() {
    let state = SessionState {
        fetch_error: Some("status 502".to_owned()),
        ..ready_state(0, Viewport::new(80, 20))
    };
    let lines = content_lines(&state, &MenuResult::NotFound, &Theme::default(), 60);
    assert_eq!(lines[0].to_string(), "Could not load menus: status 502");
    assert_eq!(lines.last().map(|line| line.to_string()), Some(NOT_FOUND_MESSAGE.to_owned()));
}

#[test]
fn empty_sections_show_message_or_placeholder() {
    let quiet = Restaurant::new("Chemicum").with_menu(Menu::new("Ma 14.10.", Vec::new()));
    let result = MenuIndex::build(&CampusTable::builtin(), &[quiet]).lookup("Kumpula", today());
    let state = ready_state(1, Viewport::new(80, 20));
    let lines = content_lines(&state, &result, &Theme::default(), 60)
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>();
    assert_eq!(lines, ["Chemicum", "no items"]);
}

#[test]
fn long_menus_are_clamped_to_the_last_page() {
    let items = (0..40).map(|n| item(&format!("Ruoka {n:02}"), "meal")).collect();
    let restaurant = Restaurant::new("Exactum").with_menu(Menu::new("Ma 14.10.", items));
    let result = MenuIndex::build(&CampusTable::builtin(), &[restaurant]).lookup("Kumpula", today());

    let state = SessionState { scroll_offset: 500, ..ready_state(1, Viewport::new(80, 20)) };
    let (buf, outcome) = render(&state, &result);
    let scroll = outcome.scroll.expect("scroll window");
    // 20 rows minus footer and two border rows.
    assert_eq!(scroll.viewport_height, 17);
    assert_eq!(scroll.total_lines, 41);
    assert_eq!(scroll.offset, 41 - 17);
    assert!(scroll.at_end());

    let text = buffer_text(&buf);
    assert!(text.contains("Ruoka 39"));
    assert!(!text.contains("Ruoka 00"));
    assert!(text.contains("25-41/41"));
}

#[test]
fn rendering_is_deterministic() {
    let state = ready_state(1, Viewport::new(72, 16));
    let menus = kumpula_today();
    let (first, first_outcome) = render(&state, &menus);
    let (second, second_outcome) = render(&state, &menus);
    assert_eq!(first, second);
    assert_eq!(first_outcome, second_outcome);
}

#[test]
fn draw_through_test_backend_feeds_scroll_back() {
    let mut session =
        Session::new(Arc::new(CampusTable::builtin()), Clock::fixed(today()), Viewport::new(60, 12));
    session.handle(Event::NavigateCampus(Step::Forward));
    session.handle(Event::DataLoaded(two_campus_dataset(today())));
    for _ in 0..20 {
        session.handle(Event::ScrollDown);
    }

    let theme = Theme::default();
    let mut terminal = Terminal::new(TestBackend::new(60, 12)).expect("terminal");
    let mut outcome = RenderOutcome::default();
    terminal
        .draw(|frame| outcome = draw(frame, &session, &theme))
        .expect("draw");

    let scroll = outcome.scroll.expect("scroll window");
    session.settle_scroll(scroll.offset);
    assert_eq!(session.state().scroll_offset, scroll.offset);
    assert!(scroll.at_end());
    assert!(buffer_text(terminal.backend().buffer()).contains("Mystery"));
}

#[test]
fn sidebar_width_respects_bounds() {
    let table = CampusTable::builtin();
    assert_eq!(sidebar_width(&table, 120), 14);
    assert_eq!(sidebar_width(&table, 40), 13);
}

#[test]
fn footer_labels_are_capitalized() {
    assert_eq!(footer_label_ucfirst("REFRESH"), "Refresh");
    assert_eq!(footer_label_ucfirst(""), "");
}
