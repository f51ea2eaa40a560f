use ratatui::{
    prelude::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use ratatui_image::picker::Picker;

use crate::app::App;

use super::theme::{THEME_ACCENT, THEME_BORDER, THEME_FG, THEME_HIGHLIGHT, THEME_MUTED};

/// Draws the decoded image for `url` if it has arrived. Returns whether
/// anything was drawn.
pub fn render_cached_image(
    f: &mut ratatui::Frame,
    app: &mut App,
    picker: &mut Picker,
    url: &str,
    area: Rect,
) -> bool {
    if url.is_empty() || area.width == 0 || area.height == 0 {
        return false;
    }
    match app.image_cache.get(url) {
        Some(img) => {
            let mut protocol = picker.new_resize_protocol(img.clone());
            let image = ratatui_image::StatefulImage::new();
            f.render_stateful_widget(image, area, &mut protocol);
            true
        }
        None => false,
    }
}

/// Image height in cells for a 16:9 thumbnail drawn `width` cells wide.
pub fn thumbnail_height(width: u16) -> u16 {
    // cells are about twice as tall as they are wide
    ((width as f64 * 9.0 / 16.0) * 0.5).round().clamp(2.0, 18.0) as u16
}

pub fn render_details(f: &mut ratatui::Frame, app: &mut App, area: Rect, picker: &mut Picker) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME_BORDER))
        .title(" Details ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(video) = app.page.selected_video().cloned() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(thumbnail_height(inner.width)),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    if !render_cached_image(f, app, picker, &video.thumbnail_url, layout[0]) {
        let waiting = Paragraph::new("Loading thumbnail...").style(Style::default().fg(THEME_MUTED));
        f.render_widget(waiting, layout[0]);
    }

    // Channel row: icon image when there is one, initial otherwise
    let channel_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(layout[2]);
    if !render_cached_image(f, app, picker, &video.channel_icon, channel_row[0]) {
        let initial = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", video.channel_initial()),
            Style::default().fg(THEME_FG).bg(THEME_HIGHLIGHT).add_modifier(Modifier::BOLD),
        )));
        f.render_widget(initial, channel_row[0]);
    }
    let channel = Paragraph::new(Line::from(Span::styled(
        video.channel.clone(),
        Style::default().fg(THEME_ACCENT).add_modifier(Modifier::BOLD),
    )));
    f.render_widget(channel, channel_row[1]);

    let label = Style::default().fg(THEME_ACCENT).add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(Span::styled(
            video.title.clone(),
            Style::default().fg(THEME_FG).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Duration: ", label),
            Span::styled(video.duration.clone(), Style::default().fg(THEME_FG)),
        ]),
        Line::from(vec![
            Span::styled("Link: ", label),
            Span::styled(video.watch_url(), Style::default().fg(THEME_MUTED)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: watch  o: browser  p: mpv  t: terminal  y: copy",
            Style::default().fg(THEME_MUTED),
        )),
    ];
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), layout[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_height_is_bounded() {
        assert_eq!(thumbnail_height(0), 2);
        assert_eq!(thumbnail_height(32), 9);
        assert_eq!(thumbnail_height(200), 18);
    }
}
