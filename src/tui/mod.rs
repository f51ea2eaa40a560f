pub mod components;

use crate::app::App;
use crate::model::Route;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};
use ratatui_image::picker::Picker;

use components::details::render_details;
use components::playback_bar::render_playback_bar;
use components::player::render_player;
use components::search_bar::render_search_bar;
use components::status_bar::render_status_bar;
use components::theme::THEME_BG;
use components::video_grid::render_video_grid;
use components::video_list::render_video_list;

pub fn ui(f: &mut Frame, app: &mut App, picker: &mut Picker) {
    let mut constraints = vec![
        Constraint::Length(3), // Search bar
        Constraint::Min(1),    // Main content
    ];

    if app.playback_title.is_some() {
        constraints.push(Constraint::Length(3)); // Playback info
    }

    constraints.push(Constraint::Length(3)); // Status bar

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1) // Outer margin
        .constraints(constraints)
        .split(f.area());

    // Render Background
    f.render_widget(Block::default().style(Style::default().bg(THEME_BG)), f.area());

    render_search_bar(f, app, main_layout[0]);
    render_main_area(f, app, main_layout[1], picker);

    let mut current_idx = 2;
    if app.playback_title.is_some() {
        render_playback_bar(f, app, main_layout[current_idx]);
        current_idx += 1;
    }

    render_status_bar(f, app, main_layout[current_idx]);
}

fn render_main_area(f: &mut Frame, app: &mut App, area: Rect, picker: &mut Picker) {
    match app.page.route {
        Route::Home | Route::Search { .. } => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
                .split(area);
            render_video_grid(f, app, chunks[0]);
            render_details(f, app, chunks[1], picker);
        }
        Route::Watch { .. } => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(area);
            render_player(f, app, chunks[0], picker);
            render_video_list(f, app, chunks[1]);
        }
    }
}
