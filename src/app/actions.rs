use super::{Action, App, AppAction, FetchRequest, InputMode, Page};
use crate::model::{self, Route};
use crossterm::event::KeyCode;

/// Opens `route` as a fresh page and remembers where we came from.
pub fn navigate(app: &mut App, route: Route) {
    // generation 0 is the placeholder page before the first load
    if app.page.generation > 0 {
        app.history.push(app.page.route.clone());
    }
    open(app, route);
}

pub fn back(app: &mut App) {
    match app.history.pop() {
        Some(route) => open(app, route),
        None => app.status_message = Some("Nothing to go back to.".to_string()),
    }
}

pub fn go_home(app: &mut App) {
    if app.page.route != Route::Home {
        navigate(app, Route::Home);
    }
}

pub fn reload(app: &mut App) {
    let generation = next_generation(app);
    app.page.reload(generation);
    send_fetch(app);
    app.status_message = Some("Reloading...".to_string());
}

pub fn submit_search(app: &mut App) {
    app.input_mode = InputMode::Normal;
    // blank input is ignored
    if let Some(route) = Route::search(&app.search_query) {
        navigate(app, route);
    }
}

pub fn open_selected(app: &mut App) {
    let route = app.page.selected_video().and_then(|v| Route::watch(&v.id));
    if let Some(route) = route {
        navigate(app, route);
    }
}

/// The video player actions apply to: the one being watched, or the
/// selected card anywhere else.
pub fn target_video(app: &App) -> Option<(String, String)> {
    if let Some(id) = app.page.watch_id() {
        let title = app.page.watch_title.clone().unwrap_or_else(|| id.to_string());
        return Some((id.to_string(), title));
    }
    app.page
        .selected_video()
        .map(|v| (v.id.clone(), v.title.clone()))
}

pub fn get_available_actions(app: &App) -> Vec<Action> {
    if target_video(app).is_none() {
        return Vec::new();
    }
    vec![
        Action::new(KeyCode::Char('o'), "Browser", AppAction::OpenInBrowser),
        Action::new(KeyCode::Char('p'), "mpv", AppAction::WatchExternal),
        Action::new(KeyCode::Char('t'), "Terminal", AppAction::WatchInTerminal),
        Action::new(KeyCode::Char('y'), "Copy link", AppAction::CopyLink),
    ]
}

pub fn queue_action(app: &mut App, action: AppAction) {
    let Some((id, title)) = target_video(app) else {
        return;
    };
    let url = match action {
        AppAction::OpenInBrowser => model::embed_url(&id),
        AppAction::WatchExternal | AppAction::WatchInTerminal | AppAction::CopyLink => {
            model::watch_url(&id)
        }
    };
    app.pending_action = Some((action, url, title));
}

pub fn stop_playback(app: &mut App) {
    if let Some(mut child) = app.playback_process.take() {
        let _ = child.start_kill();
        app.status_message = Some("Stopped.".to_string());
    }
    app.playback_title = None;
}

pub fn request_image(app: &mut App, url: &str) {
    if url.is_empty() || app.image_cache.contains(url) || app.requested_images.contains(url) {
        return;
    }
    app.requested_images.insert(url.to_string());
    let _ = app.image_tx.send(url.to_string());
}

/// Queues thumbnails and channel icons for everything on the page.
pub fn request_page_images(app: &mut App) {
    let urls: Vec<String> = app
        .page
        .videos
        .iter()
        .flat_map(|v| [v.thumbnail_url.clone(), v.channel_icon.clone()])
        .collect();
    for url in urls {
        request_image(app, &url);
    }
}

fn open(app: &mut App, route: Route) {
    let generation = next_generation(app);
    app.page = Page::new(route.clone(), generation);

    match &route {
        Route::Search { keyword } => {
            app.search_query = keyword.clone();
            app.cursor_position = keyword.chars().count();
        }
        Route::Watch { id } => {
            let thumb = model::default_thumbnail(id);
            request_image(app, &thumb);
        }
        Route::Home => {}
    }

    log::info!("Navigating to {}", route);
    app.status_message = Some("Loading...".to_string());
    send_fetch(app);
}

fn next_generation(app: &mut App) -> u64 {
    app.next_generation += 1;
    app.next_generation
}

fn send_fetch(app: &mut App) {
    let req = FetchRequest {
        generation: app.page.generation,
        route: app.page.route.clone(),
    };
    if app.fetch_tx.send(req).is_err() {
        log::error!("Fetch worker is gone; {} will not load", app.page.route);
        app.page.loading = false;
    }
}
