use ratatui::{
    prelude::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, ListItem, Paragraph},
};

use super::theme::{THEME_BORDER, THEME_SKELETON, THEME_SKELETON_LIT};

/// Placeholders shown on the trending and results grids.
pub const GRID_SKELETONS: usize = 12;
/// Placeholders shown in the watch page's suggestion list.
pub const LIST_SKELETONS: usize = 8;

fn pulse(tick: u64) -> Style {
    // four ticks per phase, roughly a second at the main loop's rate
    let lit = (tick / 4) % 2 == 1;
    Style::default().bg(if lit { THEME_SKELETON_LIT } else { THEME_SKELETON })
}

fn bar(width: usize, tick: u64) -> Span<'static> {
    Span::styled(" ".repeat(width), pulse(tick))
}

pub fn render_skeleton_card(f: &mut ratatui::Frame, area: Rect, tick: u64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME_BORDER));
    let inner = block.inner(area);
    let w = inner.width as usize;

    let lines = vec![
        Line::from(vec![Span::raw(" ".repeat(w.saturating_sub(6))), bar(5, tick)]),
        Line::from(bar(w.saturating_sub(1), tick)),
        Line::from(bar(w * 2 / 3, tick)),
        Line::from(vec![bar(2, tick), Span::raw(" "), bar(w / 3, tick)]),
    ];

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner);
}

pub fn skeleton_row(width: usize, tick: u64) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![bar(5, tick), Span::raw(" "), bar(width.saturating_sub(8), tick)]),
        Line::from(bar(width / 3, tick)),
    ])
}
