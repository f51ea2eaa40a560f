use ratatui::{
    prelude::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::theme::{THEME_ACCENT, THEME_BORDER};
use crate::app::{App, InputMode};
use crate::model::Route;

pub fn key_hints(app: &App) -> &'static str {
    match app.input_mode {
        InputMode::Editing => "Esc: Normal Mode | Enter: Search",
        InputMode::Normal => match app.page.route {
            Route::Home => "q: Quit | /: Search | Arrows/hjkl: Nav | Enter: Watch | r: Reload",
            Route::Search { .. } => "q: Quit | /: Search | Arrows/hjkl: Nav | Enter: Watch | Esc: Back | g: Trending",
            Route::Watch { .. } => "q: Quit | j/k: Nav | Enter: Watch next | o/p/t/y: Play | Esc: Back | g: Trending",
        },
    }
}

pub fn render_status_bar(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let mode_str = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Editing => "EDITING",
    };

    let status_msg = app.status_message.as_deref().unwrap_or("");
    let text = if status_msg.is_empty() {
        format!(" [{}] {} ", mode_str, key_hints(app))
    } else {
        format!(" [{}] {} | {} ", mode_str, key_hints(app), status_msg)
    };

    let p = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME_BORDER)),
        )
        .style(Style::default().fg(THEME_ACCENT));
    f.render_widget(p, area);
}
