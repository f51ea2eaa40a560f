use ratatui::{
    layout::Alignment,
    prelude::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::model::Video;

use super::skeleton::{self, GRID_SKELETONS};
use super::theme::{THEME_ACCENT, THEME_BORDER, THEME_FG, THEME_HIGHLIGHT, THEME_MUTED};
use super::widgets::{centered_rect, get_width, truncate_str, wrap_lines};

pub const CARD_HEIGHT: u16 = 6;

pub fn columns_for_width(width: u16) -> usize {
    match width {
        0..60 => 1,
        60..100 => 2,
        100..140 => 3,
        _ => 4,
    }
}

/// First grid row to draw so `selected_row` stays visible.
pub fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return selected_row;
    }
    (selected_row + 1).saturating_sub(visible_rows)
}

pub fn render_video_grid(f: &mut ratatui::Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME_BORDER))
        .title(app.page.route.title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = columns_for_width(inner.width);
    app.grid_columns = columns;

    let count = if app.page.show_skeletons() {
        GRID_SKELETONS
    } else {
        app.page.videos.len()
    };

    if count == 0 {
        let msg = Paragraph::new("No videos to show.")
            .style(Style::default().fg(THEME_MUTED))
            .alignment(Alignment::Center);
        f.render_widget(msg, centered_rect(60, 20, inner));
        return;
    }

    let card_width = inner.width / columns as u16;
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = app.page.selected.unwrap_or(0) / columns;
    let first_row = first_visible_row(selected_row, visible_rows);

    for slot in 0..count {
        let row = slot / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let col = (slot % columns) as u16;
        let card = Rect {
            x: inner.x + col * card_width,
            y: inner.y + (row - first_row) as u16 * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT,
        }
        .intersection(inner);
        if card.height < 3 {
            continue;
        }

        if app.page.show_skeletons() {
            skeleton::render_skeleton_card(f, card, app.tick_count);
        } else if let Some(video) = app.page.videos.get(slot) {
            render_card(f, video, card, app.page.selected == Some(slot));
        }
    }
}

fn render_card(f: &mut ratatui::Frame, video: &Video, area: Rect, selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if selected { THEME_HIGHLIGHT } else { THEME_BORDER }));
    let inner = block.inner(area);
    let w = inner.width as usize;

    let badge = format!(" {} ", video.duration);
    let mut lines = vec![Line::from(vec![
        Span::raw(" ".repeat(w.saturating_sub(get_width(&badge)))),
        Span::styled(
            badge,
            Style::default().fg(Color::Black).bg(THEME_FG).add_modifier(Modifier::BOLD),
        ),
    ])];

    let title_style = if selected {
        Style::default().fg(THEME_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(THEME_FG).add_modifier(Modifier::BOLD)
    };
    let mut title = wrap_lines(&video.title, w, 2);
    title.resize(2, String::new());
    lines.extend(title.into_iter().map(|l| Line::from(Span::styled(l, title_style))));

    let avatar = format!("({})", video.channel_initial());
    let channel = truncate_str(&video.channel, w.saturating_sub(get_width(&avatar) + 1));
    lines.push(Line::from(vec![
        Span::styled(avatar, Style::default().fg(THEME_HIGHLIGHT).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(channel, Style::default().fg(THEME_MUTED)),
    ]));

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner);
}
