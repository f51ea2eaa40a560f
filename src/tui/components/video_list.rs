use ratatui::{
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
};

use crate::app::App;
use crate::model::Video;

use super::skeleton::{self, LIST_SKELETONS};
use super::theme::{THEME_ACCENT, THEME_BORDER, THEME_FG, THEME_HIGHLIGHT, THEME_MUTED};
use super::widgets::{get_width, truncate_str};

const ICON_MARKER: &str = "◉ ";

/// Channel line of a row. The icon marker only shows when the channel has
/// an icon.
fn row_meta(video: &Video, width: usize) -> Line<'static> {
    let mut meta = Vec::new();
    if video.has_channel_icon() {
        meta.push(Span::styled(ICON_MARKER, Style::default().fg(THEME_HIGHLIGHT)));
    }
    meta.push(Span::styled(
        truncate_str(&video.channel, width.saturating_sub(2)),
        Style::default().fg(THEME_MUTED),
    ));
    Line::from(meta)
}

pub fn video_row(video: &Video, width: usize) -> ListItem<'static> {
    let duration = format!("[{}] ", video.duration);
    let title = truncate_str(&video.title, width.saturating_sub(get_width(&duration)));

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(duration, Style::default().fg(THEME_ACCENT)),
            Span::styled(title, Style::default().fg(THEME_FG).add_modifier(Modifier::BOLD)),
        ]),
        row_meta(video, width),
    ])
}

pub fn render_video_list(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME_BORDER))
        .title(app.page.route.title());
    // border plus highlight symbol
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = if app.page.show_skeletons() {
        (0..LIST_SKELETONS)
            .map(|_| skeleton::skeleton_row(width, app.tick_count))
            .collect()
    } else if app.page.videos.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No videos to show.",
            Style::default().fg(THEME_MUTED),
        )))]
    } else {
        app.page.videos.iter().map(|v| video_row(v, width)).collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(Span::styled("┃ ", Style::default().fg(THEME_HIGHLIGHT)));

    let mut state = ListState::default().with_selected(if app.page.show_skeletons() {
        None
    } else {
        app.page.selected
    });
    f.render_stateful_widget(list, area, &mut state);
}
