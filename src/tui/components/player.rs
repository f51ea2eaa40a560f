use crossterm::event::KeyCode;
use ratatui::{
    layout::Alignment,
    prelude::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use ratatui_image::picker::Picker;

use crate::app::{actions, App};
use crate::model;

use super::details::{render_cached_image, thumbnail_height};
use super::theme::{THEME_ACCENT, THEME_BORDER, THEME_FG, THEME_HIGHLIGHT, THEME_MUTED};

/// The watch page's main pane. The video itself plays in the browser or
/// mpv; here we show its poster frame and what it links to.
pub fn render_player(f: &mut ratatui::Frame, app: &mut App, area: Rect, picker: &mut Picker) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME_HIGHLIGHT))
        .title(" Player ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(id) = app.page.watch_id().map(str::to_string) else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(thumbnail_height(inner.width).max(inner.height / 2)),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let poster = model::default_thumbnail(&id);
    if !render_cached_image(f, app, picker, &poster, layout[0]) {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                " ▶ ",
                Style::default().fg(Color::Black).bg(THEME_HIGHLIGHT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Loading player...", Style::default().fg(THEME_MUTED))),
        ])
        .alignment(Alignment::Center);
        f.render_widget(placeholder, layout[0]);
    }

    let label = Style::default().fg(THEME_ACCENT).add_modifier(Modifier::BOLD);
    let title = app
        .page
        .watch_title
        .clone()
        .unwrap_or_else(|| "Loading...".to_string());

    let mut text = vec![
        Line::from(Span::styled(title, Style::default().fg(THEME_FG).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Embed: ", label),
            Span::styled(model::embed_url(&id), Style::default().fg(THEME_MUTED)),
        ]),
    ];
    if let Some(query) = &app.page.watch_query {
        text.push(Line::from(vec![
            Span::styled("Related to: ", label),
            Span::styled(query.clone(), Style::default().fg(THEME_FG).add_modifier(Modifier::ITALIC)),
        ]));
    }
    text.push(Line::from(""));

    let mut hints = Vec::new();
    for action in actions::get_available_actions(app) {
        hints.push(Span::styled(
            match action.key {
                KeyCode::Char(c) => c.to_string(),
                other => format!("{:?}", other),
            },
            Style::default().fg(THEME_HIGHLIGHT).add_modifier(Modifier::BOLD),
        ));
        hints.push(Span::raw(format!(": {}  ", action.name)));
    }
    text.push(Line::from(hints));

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), layout[2]);
}
