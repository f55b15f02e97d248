//! Search views
//!
//! Local catalog search with games and shows sections, and the remote
//! explore list. Both share the same input box.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::screens::{ExploreScreen, ExploreView, ListState, SearchScreen};
use crate::ui::browser::render_item_list;
use crate::ui::Theme;

/// Search input field with cursor
pub fn render_input(frame: &mut Frame, area: Rect, query: &str, placeholder: &str, editing: bool, theme: &Theme) {
    let border_style = if editing { theme.border_focused() } else { theme.border() };

    let content = if query.is_empty() && !editing {
        Line::from(Span::styled(placeholder.to_string(), theme.dimmed()))
    } else {
        let mut spans = vec![
            Span::styled("🔍 ", theme.accent()),
            Span::styled(query.to_string(), theme.input()),
        ];
        if editing {
            spans.push(Span::styled("█", theme.accent()));
        }
        Line::from(spans)
    };

    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(" SEARCH ", theme.title())),
    );
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, area: Rect, text: String, style: Style) {
    let widget = Paragraph::new(text).style(style).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

// =============================================================================
// Local search
// =============================================================================

pub fn render_search(
    frame: &mut Frame,
    area: Rect,
    screen: &SearchScreen,
    theme: &Theme,
    editing: bool,
    tick: u64,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let state = screen.state();
    render_input(
        frame,
        chunks[0],
        &state.raw_query,
        "Search games, shows, movies...",
        editing,
        theme,
    );

    if state.is_loading {
        render_message(frame, chunks[1], "Searching...".to_string(), theme.shimmer(tick));
        return;
    }
    if screen.show_no_results() {
        render_message(
            frame,
            chunks[1],
            format!("No results for \"{}\"", state.raw_query),
            theme.dimmed(),
        );
        return;
    }

    let games = &screen.results.games;
    let shows = &screen.results.shows;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((games.len() as u16 + 2).min(chunks[1].height / 2).max(3)),
            Constraint::Min(3),
        ])
        .split(chunks[1]);

    // The flat selection spans games first, then shows
    let selected = screen.list.selected;
    let in_games = screen.is_game(selected);
    let games_list = ListState {
        selected: if in_games { selected } else { 0 },
        offset: 0,
        len: games.len(),
    };
    let shows_list = ListState {
        selected: selected.saturating_sub(games.len()),
        offset: 0,
        len: shows.len(),
    };

    render_item_list(frame, sections[0], games, &games_list, "GAMES", in_games, theme);
    render_item_list(frame, sections[1], shows, &shows_list, "SHOWS & MOVIES", !in_games, theme);
}

// =============================================================================
// Explore
// =============================================================================

pub fn render_explore(frame: &mut Frame, area: Rect, screen: &ExploreScreen, theme: &Theme, editing: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_input(
        frame,
        chunks[0],
        screen.query(),
        "Press / to search TMDB",
        editing,
        theme,
    );

    if screen.is_loading() {
        render_message(frame, chunks[1], "Loading...".to_string(), theme.loading());
        return;
    }

    let title = match screen.view {
        ExploreView::TopSearches => "TOP SEARCHES",
        ExploreView::Results => "RESULTS",
    };
    if screen.view == ExploreView::Results && screen.results.is_empty() {
        render_message(
            frame,
            chunks[1],
            format!("No results for \"{}\"", screen.query()),
            theme.dimmed(),
        );
        return;
    }

    render_item_list(frame, chunks[1], &screen.results, &screen.list, title, !editing, theme);
}
