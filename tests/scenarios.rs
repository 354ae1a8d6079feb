// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use ratatui::{backend::TestBackend, Terminal};
use rstest::{fixture, rstest};

use unari::clock::Clock;
use unari::fetch::{Fetcher, FileSource};
use unari::input::InputDecoder;
use unari::model::CampusTable;
use unari::session::{event_for_input, Effect, Event, Session, Viewport};
use unari::tui::{
    buffer_text, draw, RenderOutcome, Theme, LOADING_MESSAGE, NOT_FOUND_MESSAGE,
    TOO_SMALL_MESSAGE,
};

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("unicafe_sample.json")
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 14).expect("valid date")
}

async fn loaded_session(viewport: Viewport) -> Session {
    let fetcher = Fetcher::new(Arc::new(FileSource::new(sample_path())), None);
    let mut session =
        Session::new(Arc::new(CampusTable::builtin()), Clock::fixed(monday()), viewport);
    let event = fetcher.load_event().await;
    assert!(matches!(event, Event::DataLoaded(_)), "fixture must decode: {event:?}");
    assert_eq!(session.handle(event), Effect::None);
    session
}

fn render(session: &mut Session) -> (String, RenderOutcome) {
    let viewport = session.state().viewport;
    let mut terminal =
        Terminal::new(TestBackend::new(viewport.width, viewport.height)).expect("terminal");
    let mut outcome = RenderOutcome::default();
    terminal
        .draw(|frame| outcome = draw(frame, session, &Theme::default()))
        .expect("draw");
    if let Some(scroll) = outcome.scroll {
        session.settle_scroll(scroll.offset);
    }
    (buffer_text(terminal.backend().buffer()), outcome)
}

/// Feeds raw client bytes the way an SSH channel delivers them.
fn type_keys(session: &mut Session, outcome: &RenderOutcome, bytes: &[u8]) -> Vec<Effect> {
    let mut decoder = InputDecoder::new();
    let mut inputs = decoder.feed(bytes);
    inputs.extend(decoder.flush());
    inputs
        .iter()
        .filter_map(|input| event_for_input(input, &outcome.zones))
        .map(|event| session.handle(event))
        .collect()
}

#[fixture]
fn viewport() -> Viewport {
    Viewport::new(80, 20)
}

#[rstest]
#[tokio::test]
async fn kumpula_today_lists_physicum_meals_in_category_order(viewport: Viewport) {
    let mut session = loaded_session(viewport).await;
    let (_, outcome) = render(&mut session);
    type_keys(&mut session, &outcome, b"j");
    assert_eq!(session.campus_name(), "Kumpula");

    let (text, _) = render(&mut session);
    assert!(text.contains("Kumpula · ma 14.10.2024"), "{text}");
    let header = text.find("Physicum  10:30-14:00").expect("Physicum header");
    let lounas = text.find("● Lounas").expect("Lounas");
    let vegan = text.find("♣ Vegaanilounas").expect("Vegaanilounas");
    assert!(header < lounas && lounas < vegan);
}

#[rstest]
#[tokio::test]
async fn kumpula_tomorrow_has_no_menu(viewport: Viewport) {
    let mut session = loaded_session(viewport).await;
    let (_, outcome) = render(&mut session);
    type_keys(&mut session, &outcome, b"j\x1b[C");
    assert_eq!(session.state().selected_date, monday().succ_opt().expect("tomorrow"));

    let (text, _) = render(&mut session);
    assert!(text.contains(NOT_FOUND_MESSAGE));
    assert!(!text.contains("Physicum"));
}

#[rstest]
#[case(false)]
#[case(true)]
#[tokio::test]
async fn tiny_terminal_only_shows_the_guard(#[case] loaded: bool) {
    let viewport = Viewport::new(20, 5);
    let mut session = if loaded {
        loaded_session(viewport).await
    } else {
        Session::new(Arc::new(CampusTable::builtin()), Clock::fixed(monday()), viewport)
    };
    assert_eq!(session.state().loading, !loaded);

    let (text, outcome) = render(&mut session);
    assert_eq!(text.trim(), TOO_SMALL_MESSAGE);
    assert!(outcome.zones.is_empty());
}

#[rstest]
#[tokio::test]
async fn growing_the_terminal_leaves_the_guard(viewport: Viewport) {
    let mut session =
        Session::new(Arc::new(CampusTable::builtin()), Clock::fixed(monday()), Viewport::new(30, 8));
    assert_eq!(render(&mut session).0.trim(), TOO_SMALL_MESSAGE);

    session.handle(Event::Resize { width: viewport.width, height: viewport.height });
    assert_eq!(render(&mut session).0.trim(), LOADING_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn keskusta_sorts_olivia_and_hides_unlisted_restaurants(viewport: Viewport) {
    let mut session = loaded_session(viewport).await;
    let (text, _) = render(&mut session);
    assert!(text.contains("Olivia  11:00-15:00"));
    let soup = text.find("♣ Kasvissosekeitto").expect("soup");
    let dessert = text.find("★ Mustikkakiisseli").expect("dessert");
    assert!(soup < dessert);
    assert!(!text.contains("Lörtsy"));
}

#[rstest]
#[tokio::test]
async fn clicking_a_campus_switches_the_view(viewport: Viewport) {
    let mut session = loaded_session(viewport).await;
    let (_, outcome) = render(&mut session);
    let kumpula = outcome.zones.get("Kumpula").expect("Kumpula zone");

    // SGR mouse reports are 1-based.
    let (column, row) = (kumpula.x + 2, kumpula.y + 1);
    let click = format!("\x1b[<0;{column};{row}M\x1b[<0;{column};{row}m");
    type_keys(&mut session, &outcome, click.as_bytes());
    assert_eq!(session.campus_name(), "Kumpula");
}

#[rstest]
#[tokio::test]
async fn refresh_and_quit_surface_as_effects(viewport: Viewport) {
    let mut session = loaded_session(viewport).await;
    let (_, outcome) = render(&mut session);
    assert_eq!(type_keys(&mut session, &outcome, b"r"), [Effect::Fetch]);
    assert!(session.state().loading);
    assert_eq!(type_keys(&mut session, &outcome, b"q"), [Effect::Quit]);
}

#[tokio::test]
async fn missing_menu_file_reports_a_failure_instead_of_data() {
    let fetcher = Fetcher::new(Arc::new(FileSource::new("/nonexistent/unari.json")), None);
    let mut session =
        Session::new(Arc::new(CampusTable::builtin()), Clock::fixed(monday()), Viewport::new(80, 20));
    session.handle(fetcher.load_event().await);
    assert!(!session.state().loading);

    let (text, _) = render(&mut session);
    assert!(text.contains("Could not load menus: failed to read menus"));
    assert!(text.contains(NOT_FOUND_MESSAGE));
}
