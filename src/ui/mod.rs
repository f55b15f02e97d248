//! Terminal UI
//!
//! Pure rendering: every function takes the app state and a `Theme` value
//! and draws into a ratatui frame. Keyboard-first navigation throughout.

pub mod browser;
pub mod detail;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, AppState, InputMode, Screen, TABS};

/// Main render function - dispatches to view-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.background()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);
}

/// Logo plus root tabs
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(Span::styled("FLIXTUI", theme.logo())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border()),
        );
    frame.render_widget(logo, header_chunks[0]);

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(t.label())).collect();
    let selected = app
        .state()
        .and_then(|s| TABS.iter().position(|t| *t == s));

    let mut tabs = Tabs::new(titles)
        .style(theme.tab_inactive())
        .highlight_style(theme.tab_active())
        .divider(Span::styled("│", theme.border()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border()),
        );
    if let Some(i) = selected {
        tabs = tabs.select(i);
    }
    frame.render_widget(tabs, header_chunks[1]);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::Editing;
    match app.current() {
        Some(Screen::Profiles(s)) => browser::render_profiles(frame, area, s, theme),
        Some(Screen::Home(s)) => browser::render_home(frame, area, s, theme, app.tick),
        Some(Screen::NewHot(s)) => browser::render_new_hot(frame, area, s, theme),
        Some(Screen::Explore(s)) => search::render_explore(frame, area, s, theme, editing),
        Some(Screen::Search(s)) => search::render_search(frame, area, s, theme, editing, app.tick),
        Some(Screen::Detail(s)) => detail::render_detail(frame, area, s, theme, &app.images),
        Some(Screen::Play(s)) => detail::render_play(frame, area, s, theme),
        None => {}
    }
}

/// Keybinding hints for the current screen
pub fn hints(state: Option<AppState>, input_mode: InputMode) -> Vec<(&'static str, &'static str)> {
    if input_mode == InputMode::Editing {
        return vec![("type", "search"), ("↵", "submit"), ("esc", "done")];
    }
    match state {
        Some(AppState::Profiles) => vec![("↑↓", "choose"), ("↵", "select"), ("q", "quit")],
        Some(AppState::Home) => vec![
            ("←→", "browse"),
            ("↑↓", "row"),
            ("↵", "details"),
            ("/", "search"),
            ("tab", "next"),
            ("t", "theme"),
            ("q", "quit"),
        ],
        Some(AppState::NewHot) => vec![("←→", "category"), ("↑↓", "move"), ("tab", "next"), ("q", "quit")],
        Some(AppState::Explore) => vec![("/", "type"), ("↑↓", "move"), ("↵", "details"), ("tab", "next")],
        Some(AppState::Search) => vec![("/", "type"), ("↑↓", "move"), ("↵", "open"), ("esc", "back")],
        Some(AppState::Detail) => vec![
            ("←→", "tab"),
            ("m", "mute"),
            ("+", "my list"),
            ("r", "rate"),
            ("esc", "back"),
        ],
        Some(AppState::Play) => vec![("↵", "launch"), ("esc", "back")],
        None => vec![("q", "quit")],
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = Vec::new();

    if let Some(profile) = &app.profile {
        spans.push(Span::styled(format!(" {} ", profile), theme.accent()));
        spans.push(Span::styled("│", theme.border()));
    }

    for (key, desc) in hints(app.state(), app.input_mode) {
        spans.push(Span::styled(format!(" {} ", key), theme.keybind()));
        spans.push(Span::styled(desc.to_string(), theme.keybind_desc()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.status_bar()), area);
}

/// Centered rect of the given percentage size
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
