//! Detail and play views

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
};

use crate::api::ImageUrls;
use crate::models::MediaDetail;
use crate::screens::{DetailScreen, DetailTab, Loadable, PlayScreen};
use crate::ui::browser::render_item_list;
use crate::ui::{centered_rect, Theme};

/// How many cast names the header lists
const CAST_SHOWN: usize = 3;

pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    screen: &DetailScreen,
    theme: &Theme,
    images: &ImageUrls,
) {
    match &screen.detail {
        Loadable::Loading => {
            let loading = Paragraph::new("Loading...")
                .style(theme.loading())
                .alignment(Alignment::Center);
            frame.render_widget(loading, centered_rect(50, 20, area));
        }
        Loadable::Failed => {
            let lines = vec![
                Line::from(Span::styled("Could not load details.", theme.error())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("esc", theme.keybind()),
                    Span::styled(" go back", theme.keybind_desc()),
                ]),
            ];
            let widget = Paragraph::new(lines).alignment(Alignment::Center);
            frame.render_widget(widget, centered_rect(60, 30, area));
        }
        Loadable::Ready(detail) => render_ready(frame, area, screen, detail, theme, images),
    }
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    screen: &DetailScreen,
    detail: &MediaDetail,
    theme: &Theme,
    images: &ImageUrls,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Header
            Constraint::Length(1),  // Tabs
            Constraint::Min(1),     // Tab content
        ])
        .split(area);

    frame.render_widget(header(screen, detail, theme, images), chunks[0]);

    let tabs = Tabs::new(vec![Line::from("Episodes"), Line::from("More Like This")])
        .select(match screen.tab {
            DetailTab::Episodes => 0,
            DetailTab::MoreLikeThis => 1,
        })
        .style(theme.tab_inactive())
        .highlight_style(theme.tab_active());
    frame.render_widget(tabs, chunks[1]);

    match screen.tab {
        DetailTab::Episodes => {
            let lines: Vec<Line> = if detail.is_tv() {
                let seasons = detail.number_of_seasons.unwrap_or(0);
                (1..=seasons)
                    .map(|n| Line::from(Span::styled(format!("Season {}", n), theme.text())))
                    .collect()
            } else {
                vec![Line::from(Span::styled(
                    "Episodes are only listed for shows",
                    theme.dimmed(),
                ))]
            };
            let widget = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme.border()),
            );
            frame.render_widget(widget, chunks[2]);
        }
        DetailTab::MoreLikeThis => render_item_list(
            frame,
            chunks[2],
            &detail.similar,
            &screen.similar_list,
            "MORE LIKE THIS",
            true,
            theme,
        ),
    }
}

fn toggle<'a>(key: &'a str, on: bool, on_label: &'a str, off_label: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!("[{}] ", key), theme.keybind()),
        if on {
            Span::styled(on_label, theme.success())
        } else {
            Span::styled(off_label, theme.dimmed())
        },
        Span::raw("   "),
    ]
}

fn header<'a>(
    screen: &DetailScreen,
    detail: &'a MediaDetail,
    theme: &Theme,
    images: &ImageUrls,
) -> Paragraph<'a> {
    let mut meta = Vec::new();
    if let Some(year) = detail.year() {
        meta.push(Span::styled(year.to_string(), theme.text()));
        meta.push(Span::raw("  "));
    }
    meta.push(Span::styled(detail.age_rating(), theme.accent()));
    let duration = detail.duration_text();
    if !duration.is_empty() {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(duration, theme.text()));
    }
    if !detail.genres.is_empty() {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(detail.genres.join(", "), theme.dimmed()));
    }

    let mut toggles = toggle("m", screen.muted, "Muted", "Sound on", theme);
    toggles.extend(toggle("+", screen.in_my_list, "In My List", "My List", theme));
    toggles.extend(toggle("r", screen.rated, "Rated", "Rate", theme));

    let mut lines = vec![
        Line::from(Span::styled(detail.item.title.clone(), theme.logo())),
        Line::from(meta),
        Line::from(toggles),
        Line::from(Span::styled(detail.item.overview.clone(), theme.text())),
    ];

    let cast = detail.top_cast(CAST_SHOWN);
    if !cast.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Cast: ", theme.dimmed()),
            Span::styled(cast.join(", "), theme.text()),
        ]));
    }
    if !detail.created_by.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Creators: ", theme.dimmed()),
            Span::styled(detail.created_by.join(", "), theme.text()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        images.original(
            detail
                .item
                .backdrop_path
                .as_deref()
                .or(detail.item.poster_path.as_deref()),
        ),
        theme.dimmed(),
    )));

    Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focused()),
    )
}

pub fn render_play(frame: &mut Frame, area: Rect, screen: &PlayScreen, theme: &Theme) {
    let popup = centered_rect(50, 40, area);

    let status = if screen.launching {
        Line::from(Span::styled("Launching...", theme.loading()))
    } else {
        Line::from(vec![
            Span::styled("↵", theme.keybind()),
            Span::styled(" play", theme.keybind_desc()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(screen.title.clone(), theme.logo())),
        Line::from(Span::styled(screen.kind.clone(), theme.dimmed())),
        Line::from(""),
        status,
    ];

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focused()),
    );
    frame.render_widget(widget, popup);
}
