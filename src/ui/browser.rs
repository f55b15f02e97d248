//! Browsing views
//!
//! Profile picker, the home hero with its two rows, and New & Hot.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::models::{CatalogEntry, MediaItem, MediaType};
use crate::screens::{HomeRow, HomeScreen, ListState, NewHotScreen, NewHotTab, ProfilesScreen};
use crate::ui::{centered_rect, Theme};

/// Width of one card in a home row
const CARD_WIDTH: u16 = 22;

/// Trait for items that can be displayed in a browser list
pub trait BrowserItem {
    fn title(&self) -> &str;
    fn year(&self) -> Option<u16>;
    /// Short uppercase badge, e.g. "MOVIE"
    fn tag(&self) -> String;
    fn extra_info(&self) -> Option<String>;
}

impl BrowserItem for MediaItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<u16> {
        MediaItem::year(self)
    }

    fn tag(&self) -> String {
        match self.media_type {
            MediaType::Movie => "MOVIE".to_string(),
            MediaType::Tv => "TV".to_string(),
        }
    }

    fn extra_info(&self) -> Option<String> {
        Some(self.age_rating().to_string())
    }
}

impl BrowserItem for CatalogEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<u16> {
        None
    }

    fn tag(&self) -> String {
        self.kind.to_uppercase()
    }

    fn extra_info(&self) -> Option<String> {
        None
    }
}

/// First index to draw so the selection stays visible
pub fn viewport(list: &ListState, visible: usize) -> usize {
    let mut view = list.clone();
    view.scroll_into_view(visible);
    view.offset
}

/// One line: ▸ Title (Year) [TAG] extra
pub fn item_line<T: BrowserItem>(item: &T, is_selected: bool, theme: &Theme) -> Line<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let year_str = item.year().map(|y| format!(" ({})", y)).unwrap_or_default();

    let mut spans = vec![
        Span::styled(
            marker.to_string(),
            if is_selected { theme.accent() } else { theme.dimmed() },
        ),
        Span::styled(
            item.title().to_string(),
            if is_selected { theme.list_item_selected() } else { theme.text() },
        ),
        Span::styled(year_str, theme.dimmed()),
        Span::raw(" "),
        Span::styled(format!("[{}]", item.tag()), theme.keybind()),
    ];
    if let Some(extra) = item.extra_info() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(extra, theme.dimmed()));
    }
    Line::from(spans)
}

/// Bordered, scrolled list of browser items
pub fn render_item_list<T: BrowserItem>(
    frame: &mut Frame,
    area: Rect,
    items: &[T],
    list: &ListState,
    title: &str,
    focused: bool,
    theme: &Theme,
) {
    let border_style = if focused { theme.border_focused() } else { theme.border() };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    if items.is_empty() {
        let empty = Paragraph::new("No content to display")
            .style(theme.dimmed())
            .alignment(Alignment::Center)
            .block(block.title(Span::styled(format!(" {} ", title), theme.title())));
        frame.render_widget(empty, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let offset = viewport(list, visible);
    let lines: Vec<ListItem> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, item)| ListItem::new(item_line(item, focused && i == list.selected, theme)))
        .collect();

    let heading = format!(" {} ({}/{}) ", title, list.selected + 1, items.len());
    let widget = List::new(lines)
        .block(block.title(Span::styled(heading, theme.title())))
        .style(theme.text());
    frame.render_widget(widget, area);
}

// =============================================================================
// Profiles
// =============================================================================

pub fn render_profiles(frame: &mut Frame, area: Rect, screen: &ProfilesScreen, theme: &Theme) {
    let popup = centered_rect(40, 60, area);

    let mut lines = vec![
        Line::from(Span::styled("Who's watching?", theme.title())),
        Line::from(""),
    ];
    for (i, name) in screen.profiles.iter().enumerate() {
        let style = if i == screen.list.selected {
            theme.list_item_selected()
        } else {
            theme.text()
        };
        lines.push(Line::from(Span::styled(format!("  {}  ", name), style)));
    }

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focused()),
    );
    frame.render_widget(widget, popup);
}

// =============================================================================
// Home
// =============================================================================

pub fn render_home(frame: &mut Frame, area: Rect, screen: &HomeScreen, theme: &Theme, tick: u64) {
    if screen.trending.is_none() && screen.top_rated.is_none() {
        let loading = Paragraph::new("Loading...")
            .style(theme.loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, centered_rect(50, 20, area));
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Hero
            Constraint::Length(6), // Trending
            Constraint::Length(6), // Top rated
            Constraint::Min(0),
        ])
        .split(area);

    render_hero(frame, chunks[0], screen.hero(), theme);
    render_row(frame, chunks[1], screen, HomeRow::Trending, theme, tick);
    render_row(frame, chunks[2], screen, HomeRow::TopRated, theme, tick);
}

fn render_hero(frame: &mut Frame, area: Rect, hero: Option<&MediaItem>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());

    let lines = match hero {
        Some(item) => vec![
            Line::from(vec![
                Span::styled(item.title.clone(), theme.logo()),
                Span::raw("  "),
                Span::styled(item.age_rating(), theme.dimmed()),
            ]),
            Line::from(Span::styled(item.overview.clone(), theme.text())),
            Line::from(vec![
                Span::styled(" ▶ Play ", theme.tab_active()),
                Span::raw(" "),
                Span::styled(" + My List ", theme.tab_inactive()),
            ]),
        ],
        None => vec![Line::from(Span::styled("Nothing trending right now", theme.dimmed()))],
    };

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(widget, area);
}

fn row_title(row: HomeRow) -> &'static str {
    match row {
        HomeRow::Trending => "Trending Now",
        HomeRow::TopRated => "Top Rated",
    }
}

fn render_row(
    frame: &mut Frame,
    area: Rect,
    screen: &HomeScreen,
    row: HomeRow,
    theme: &Theme,
    tick: u64,
) {
    let focused = screen.row == row;
    let title_style = if focused { theme.shimmer(tick) } else { theme.title() };
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(if focused { theme.border_focused() } else { theme.border() })
        .title(Span::styled(format!(" {} ", row_title(row)), title_style));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let loaded = match row {
        HomeRow::Trending => screen.trending.is_some(),
        HomeRow::TopRated => screen.top_rated.is_some(),
    };
    let items = screen.row_items(row);
    if !loaded || items.is_empty() {
        let text = if loaded { "Nothing to show" } else { "Loading..." };
        let style = if loaded { theme.dimmed() } else { theme.loading() };
        frame.render_widget(Paragraph::new(text).style(style), inner);
        return;
    }

    let list = screen.row_list(row);
    let visible = (inner.width / CARD_WIDTH).max(1) as usize;
    let offset = viewport(list, visible);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CARD_WIDTH); visible])
        .split(inner);

    for (slot, (i, item)) in items.iter().enumerate().skip(offset).take(visible).enumerate() {
        let selected = focused && i == list.selected;
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                item.title.clone(),
                if selected { theme.selected() } else { theme.text() },
            )),
            Line::from(Span::styled(
                item.year().map(|y| y.to_string()).unwrap_or_default(),
                theme.dimmed(),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if selected { theme.border_focused() } else { theme.border() }),
        );
        frame.render_widget(card, cards[slot]);
    }
}

// =============================================================================
// New & Hot
// =============================================================================

pub fn render_new_hot(frame: &mut Frame, area: Rect, screen: &NewHotScreen, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let titles: Vec<Line> = NewHotTab::ALL.iter().map(|t| Line::from(t.label())).collect();
    let selected = NewHotTab::ALL
        .iter()
        .position(|t| *t == screen.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme.tab_inactive())
        .highlight_style(theme.tab_active());
    frame.render_widget(tabs, chunks[0]);

    let rows = screen.rows();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());

    if rows.is_empty() {
        let empty = Paragraph::new("Nothing here yet")
            .style(theme.dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    // Each entry takes a title line, a sub line and a blank separator
    let visible = (chunks[1].height.saturating_sub(2) / 3).max(1) as usize;
    let offset = viewport(&screen.list, visible);
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, row)| {
            let is_selected = i == screen.list.selected;
            let mut title = vec![Span::styled(
                row.title.clone(),
                if is_selected { theme.list_item_selected() } else { theme.title() },
            )];
            if !row.rated.is_empty() {
                title.push(Span::raw("  "));
                title.push(Span::styled(row.rated.clone(), theme.dimmed()));
            }
            let mut sub = vec![Span::styled(row.sub_text.clone(), theme.accent())];
            if !row.description.is_empty() {
                sub.push(Span::raw("  "));
                sub.push(Span::styled(row.description.clone(), theme.text()));
            }
            ListItem::new(vec![Line::from(title), Line::from(sub), Line::from("")])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), chunks[1]);
}
