//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Nothing in this module changes
//! feed state; it only reads the latest snapshot.
//!
//! ## For contributors
//!
//! * Layout, top to bottom: category tabs or search bar, an optional
//!   loading/error banner, the article list, and a one-line status bar.
//! * The article detail is a centered popup drawn last, over everything.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::App;
use crate::category::Category;
use crate::feed::Query;
use crate::source::Article;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let banner_height = if app.feed.loading || app.feed.error.is_some() {
        1
    } else {
        0
    };

    let [header_area, banner_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(banner_height),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    if app.feed.search_bar_visible {
        draw_search_bar(app, frame, header_area);
    } else {
        draw_category_tabs(app, frame, header_area);
    }
    draw_banner(app, frame, banner_area);
    draw_article_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);

    if let Some(article) = &app.feed.selected_article {
        draw_article_detail(article, frame);
    }
}

fn draw_category_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let tabs = Tabs::new(Category::ALL.iter().map(|c| c.label()))
        .select(app.displayed_category().index())
        .block(Block::default().title(" Headlines ").borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_search_bar(app: &App, frame: &mut Frame, area: Rect) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::styled(&app.search_input, Style::default().fg(Color::White)),
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().title(" Search ").borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// One line above the list: a spinner-ish notice while loading, otherwise
/// the last error with a retry hint.
fn draw_banner(app: &App, frame: &mut Frame, area: Rect) {
    let line = if app.feed.loading {
        Line::from(Span::styled(" Loading…", Style::default().fg(Color::Yellow)))
    } else if let Some(error) = &app.feed.error {
        // Plain `r` is typed into the search box.
        let hint = if app.feed.search_bar_visible {
            "Ctrl-R: retry"
        } else {
            "r: retry"
        };
        Line::from(vec![
            Span::styled(format!(" {error}"), Style::default().fg(Color::Red)),
            Span::raw("  "),
            Span::styled(
                hint,
                Style::default().fg(Color::Black).bg(Color::Red),
            ),
        ])
    } else {
        return;
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_article_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let title = match &app.feed.active_query {
        Query::Category(category) => format!(" {category} "),
        Query::Search(text) => format!(" Search: {text} "),
    };

    let list_items: Vec<ListItem> = app
        .feed
        .articles
        .iter()
        .map(|article| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<16}", format_published(article.published_at.as_deref())),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(&article.title, Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", article.source_label()),
                    Style::default().fg(Color::Cyan),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let hints = if app.feed.selected_article.is_some() {
        "Esc: back"
    } else if app.feed.search_bar_visible {
        "Enter: search  Tab: open  ↑/↓: scroll  Esc: close"
    } else {
        "←/→: category  ↑/↓: scroll  Enter: open  /: search  q: quit"
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{} articles", app.feed.articles.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::raw(hints),
    ]));
    frame.render_widget(status, area);
}

fn draw_article_detail(article: &Article, frame: &mut Frame) {
    let area = centered(frame.area(), 80, 70);

    let mut byline = vec![Span::styled(
        article.source_label().to_string(),
        Style::default().fg(Color::Cyan),
    )];
    if let Some(author) = &article.author {
        byline.push(Span::raw(format!(" · {author}")));
    }
    if article.published_at.is_some() {
        byline.push(Span::styled(
            format!(" · {}", format_published(article.published_at.as_deref())),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![
        Line::from(Span::styled(
            article.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(byline),
        Line::default(),
    ];
    for text in [&article.description, &article.content].into_iter().flatten() {
        lines.push(Line::from(text.as_str()));
        lines.push(Line::default());
    }
    if let Some(image) = &article.url_to_image {
        lines.push(Line::from(Span::styled(
            format!("Image: {image}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(vec![
        Span::raw("Full story: "),
        Span::styled(
            article.url.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]));

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Article ").borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// A rectangle of the given percentage size centered in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// `YYYY-MM-DD HH:MM` for RFC 3339 timestamps, the raw text otherwise.
fn format_published(published: Option<&str>) -> String {
    match published {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|d| d.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "no date".into(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
