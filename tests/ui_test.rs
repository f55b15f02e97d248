//! UI rendering tests for flixtui
//!
//! Renders every screen into a ratatui `TestBackend` and checks what a
//! user would see.
//!
//! ## Test Cases
//! - test_layout_responsive: Renders at 80x24 (min) and 200x50 (large)
//! - test_<screen>_render: Key text for each screen and state
//! - test_theme_background: Light and dark palettes reach the buffer

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use flixtui::app::{App, AppEvent, AppSettings, AppState, InputMode};
use flixtui::models::{CastMember, Catalog, MediaDetail, MediaItem, MediaType};
use flixtui::ui::{self, hints, theme::ThemeMode, Theme};

// =============================================================================
// Helpers
// =============================================================================

fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("test terminal")
}

fn app_with(theme: Theme) -> App {
    App::new(AppSettings::default(), theme, Arc::new(Catalog::builtin()))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Render once and return the screen as text, one line per row
fn draw(app: &App, width: u16, height: u16) -> String {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| ui::render(frame, app))
        .expect("render");
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn item(id: u64, title: &str, media_type: MediaType) -> MediaItem {
    MediaItem {
        id,
        title: title.to_string(),
        poster_path: None,
        backdrop_path: Some("/backdrop.jpg".to_string()),
        media_type,
        release_date: Some("2024-02-27".to_string()),
        overview: "Paul Atreides unites with the Fremen.".to_string(),
        adult: false,
    }
}

fn sample_detail() -> MediaDetail {
    MediaDetail {
        item: item(27205, "Inception", MediaType::Movie),
        runtime: Some(148),
        number_of_seasons: None,
        genres: vec!["Action".to_string()],
        created_by: Vec::new(),
        cast: vec![CastMember {
            name: "Leonardo DiCaprio".to_string(),
            character: Some("Cobb".to_string()),
        }],
        similar: vec![item(157336, "Interstellar", MediaType::Movie)],
    }
}

fn home_app() -> App {
    let mut app = app_with(Theme::default());
    app.handle_key(key(KeyCode::Enter));
    app
}

fn home_id(app: &App) -> u64 {
    app.current().map(|s| s.id()).expect("a mounted screen")
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_layout_responsive_minimum_size() {
    let app = home_app();
    let text = draw(&app, 80, 24);
    assert!(text.contains("FLIXTUI"));
    assert!(text.contains("Home"));
    assert!(text.contains("Explore"));
}

#[test]
fn test_layout_responsive_large_size() {
    let mut app = home_app();
    let id = home_id(&app);
    app.apply(AppEvent::Trending {
        screen: id,
        items: (0..12)
            .map(|i| item(i, &format!("Title {}", i), MediaType::Movie))
            .collect(),
    });
    app.apply(AppEvent::TopRated { screen: id, items: vec![] });

    let text = draw(&app, 200, 50);
    assert!(text.contains("Trending Now"));
    assert!(text.contains("Title 5"));
    assert!(text.contains("Nothing to show"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let app = home_app();
    draw(&app, 10, 4);
}

// =============================================================================
// Screens
// =============================================================================

#[test]
fn test_profiles_render() {
    let app = app_with(Theme::default());
    let text = draw(&app, 80, 24);
    assert!(text.contains("Who's watching?"));
    assert!(text.contains("Drashti"));
    assert!(text.contains("Kavya"));
}

#[test]
fn test_home_loading_then_hero() {
    let mut app = home_app();
    assert!(draw(&app, 80, 24).contains("Loading..."));

    let id = home_id(&app);
    app.apply(AppEvent::Trending {
        screen: id,
        items: vec![item(1, "Dune Part Two", MediaType::Movie)],
    });
    let text = draw(&app, 80, 24);
    assert!(text.contains("Dune Part Two"));
    assert!(text.contains("Play"));
    // Top rated still loading
    assert!(text.contains("Loading..."));
}

#[test]
fn test_status_bar_shows_profile_and_hints() {
    let app = home_app();
    let text = draw(&app, 120, 24);
    let status = text.lines().last().unwrap_or_default();
    assert!(status.contains("Drashti"));
    assert!(status.contains("quit"));
}

#[test]
fn test_new_hot_render() {
    let mut app = home_app();
    app.open_tab(AppState::NewHot);
    let text = draw(&app, 100, 30);
    assert!(text.contains("Coming Soon"));
    assert!(text.contains("The Night Agent"));
}

#[test]
fn test_search_render_sections_and_no_results() {
    let mut app = home_app();
    app.handle_key(key(KeyCode::Char('/')));
    let text = draw(&app, 80, 40);
    assert!(text.contains("GAMES"));
    assert!(text.contains("SHOWS & MOVIES"));
    assert!(text.contains("Hades"));

    let t0 = Instant::now();
    for c in "zzz".chars() {
        app.handle_key_at(key(KeyCode::Char(c)), t0);
    }
    assert!(draw(&app, 80, 24).contains("Searching..."));

    app.on_tick(t0 + std::time::Duration::from_millis(500));
    assert!(draw(&app, 80, 24).contains("No results for \"zzz\""));
}

#[test]
fn test_explore_render_top_searches() {
    let mut app = home_app();
    let id = app.open_tab(AppState::Explore).expect("explore mounts");
    app.apply(AppEvent::Trending {
        screen: id,
        items: vec![item(7, "Shogun", MediaType::Tv)],
    });
    let text = draw(&app, 80, 24);
    assert!(text.contains("TOP SEARCHES"));
    assert!(text.contains("Shogun"));
    assert!(text.contains("[TV]"));
}

#[test]
fn test_detail_render_states() {
    let mut app = home_app();
    let id = app.open_detail("27205", MediaType::Movie);
    assert!(draw(&app, 80, 24).contains("Loading..."));

    app.apply(AppEvent::Details {
        screen: id,
        detail: Some(sample_detail()),
    });
    let text = draw(&app, 100, 30);
    assert!(text.contains("Inception"));
    assert!(text.contains("2h 28m"));
    assert!(text.contains("Leonardo DiCaprio"));
    assert!(text.contains("Episodes are only listed for shows"));

    app.handle_key(key(KeyCode::Right));
    assert!(draw(&app, 100, 30).contains("Interstellar"));
}

#[test]
fn test_detail_failure_render() {
    let mut app = home_app();
    let id = app.open_detail("404", MediaType::Movie);
    app.apply(AppEvent::Details { screen: id, detail: None });
    assert!(draw(&app, 80, 24).contains("Could not load details."));
}

#[test]
fn test_play_render_launching() {
    let mut app = home_app();
    app.open_play("Hades", "Action");
    assert!(draw(&app, 80, 24).contains("Hades"));

    app.handle_key(key(KeyCode::Enter));
    assert!(draw(&app, 80, 24).contains("Launching..."));
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_theme_background_reaches_buffer() {
    for mode in [ThemeMode::Dark, ThemeMode::Light] {
        let theme = Theme::from_mode(mode, None);
        let app = app_with(theme);
        let mut terminal = test_terminal(80, 24);
        terminal
            .draw(|frame| ui::render(frame, &app))
            .expect("render");

        // Left edge of the content area, outside the profile picker
        let cell = &terminal.backend().buffer().content()[12 * 80];
        assert_eq!(cell.bg, theme.palette.background, "{:?}", mode);
    }
}

#[test]
fn test_toggle_theme_changes_render() {
    let mut app = home_app();
    let dark = draw(&app, 80, 24);
    app.handle_key(key(KeyCode::Char('t')));
    assert!(!app.theme.is_dark());
    // Same text, different colors
    assert_eq!(draw(&app, 80, 24), dark);
}

#[test]
fn test_hints_follow_input_mode() {
    let editing = hints(Some(AppState::Search), InputMode::Editing);
    assert!(editing.iter().any(|(_, desc)| *desc == "submit"));

    let detail = hints(Some(AppState::Detail), InputMode::Normal);
    assert!(detail.iter().any(|(key, _)| *key == "m"));
}
