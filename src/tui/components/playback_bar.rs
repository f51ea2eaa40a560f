use ratatui::{
    prelude::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::theme::{THEME_ACCENT, THEME_FG, THEME_HIGHLIGHT};
use super::widgets::truncate_str;
use crate::app::App;

/// Shown while an external mpv window is running.
pub fn render_playback_bar(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let title = app.playback_title.as_deref().unwrap_or("Unknown");
    let available_width = area.width.saturating_sub(24) as usize;

    let p = Paragraph::new(Line::from(vec![
        Span::styled(
            " PLAYING ",
            Style::default()
                .fg(Color::Black)
                .bg(THEME_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            truncate_str(title, available_width),
            Style::default().fg(THEME_FG).add_modifier(Modifier::ITALIC),
        ),
        Span::raw(" | "),
        Span::styled(
            "x",
            Style::default()
                .fg(THEME_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": Stop"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME_ACCENT)),
    );
    f.render_widget(p, area);
}
