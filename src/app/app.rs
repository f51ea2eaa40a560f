use crate::model::Route;
use crate::sys::feeds::Discovery;
use crate::sys::image as sys_image;
use crossterm::event::KeyEvent;
use image::DynamicImage;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{actions, handlers, updates};
use super::{AppAction, FetchOutcome, FetchRequest, InputMode, Page};

const IMAGE_CACHE_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    // Search
    pub search_query: String,
    pub cursor_position: usize,
    // Current view
    pub page: Page,
    pub history: Vec<Route>,
    pub next_generation: u64,
    pub grid_columns: usize,
    pub tick_count: u64,
    // Async Communication
    pub fetch_tx: UnboundedSender<FetchRequest>,
    pub fetch_rx: UnboundedReceiver<FetchOutcome>,
    // Messages/Status
    pub status_message: Option<String>,
    // Actions
    pub pending_action: Option<(AppAction, String, String)>, // (Action, URL, Title)
    // Images
    pub image_tx: UnboundedSender<String>, // URL
    pub image_rx: UnboundedReceiver<(String, DynamicImage)>,
    pub image_cache: LruCache<String, DynamicImage>,
    pub requested_images: HashSet<String>,
    // Playback
    pub mpv_path: String,
    pub playback_process: Option<tokio::process::Child>,
    pub playback_title: Option<String>,
}

impl App {
    pub fn new(discovery: Discovery, http: reqwest::Client, mpv_path: String, initial: Route) -> Self {
        let (fetch_tx, mut fetch_req_rx) = mpsc::unbounded_channel::<FetchRequest>();
        let (fetch_res_tx, fetch_rx) = mpsc::unbounded_channel();

        // Each navigation gets its own task; stale ones are filtered on arrival
        tokio::spawn(async move {
            while let Some(req) = fetch_req_rx.recv().await {
                let discovery = discovery.clone();
                let tx = fetch_res_tx.clone();
                tokio::spawn(async move {
                    let result = discovery.load(&req.route).await.map_err(|e| {
                        log::error!("Failed to load {}: {:#}", req.route, e);
                        e.to_string()
                    });
                    let _ = tx.send(FetchOutcome {
                        generation: req.generation,
                        result,
                    });
                });
            }
        });

        let (image_tx, mut image_cmd_rx) = mpsc::unbounded_channel::<String>();
        let (image_res_tx, image_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(url) = image_cmd_rx.recv().await {
                let http = http.clone();
                let tx = image_res_tx.clone();
                tokio::spawn(async move {
                    match sys_image::download_image(&http, &url).await {
                        Ok(img) => {
                            let _ = tx.send((url, img));
                        }
                        Err(e) => log::warn!("Image unavailable {}: {:#}", url, e),
                    }
                });
            }
        });

        let mut app = Self::with_channels(fetch_tx, fetch_rx, image_tx, image_rx, mpv_path);
        actions::navigate(&mut app, initial);
        app
    }

    pub(crate) fn with_channels(
        fetch_tx: UnboundedSender<FetchRequest>,
        fetch_rx: UnboundedReceiver<FetchOutcome>,
        image_tx: UnboundedSender<String>,
        image_rx: UnboundedReceiver<(String, DynamicImage)>,
        mpv_path: String,
    ) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            cursor_position: 0,
            page: Page::new(Route::Home, 0),
            history: Vec::new(),
            next_generation: 0,
            grid_columns: 1,
            tick_count: 0,
            fetch_tx,
            fetch_rx,
            status_message: None,
            pending_action: None,
            image_tx,
            image_rx,
            image_cache: LruCache::new(IMAGE_CACHE_SIZE),
            requested_images: HashSet::new(),
            mpv_path,
            playback_process: None,
            playback_title: None,
        }
    }

    pub fn on_tick(&mut self) {
        updates::on_tick(self);
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        handlers::handle_key_event(self, key);
    }

    pub fn handle_paste(&mut self, text: String) {
        handlers::handle_paste(self, text);
    }

    pub fn stop_playback(&mut self) {
        actions::stop_playback(self);
    }
}

/// Channel ends the background workers would normally own.
#[cfg(test)]
pub(crate) struct Workers {
    pub fetch_requests: UnboundedReceiver<FetchRequest>,
    pub outcomes: UnboundedSender<FetchOutcome>,
    pub image_requests: UnboundedReceiver<String>,
    pub images: UnboundedSender<(String, DynamicImage)>,
}

#[cfg(test)]
impl Workers {
    pub fn drain_fetches(&mut self) -> Vec<FetchRequest> {
        let mut out = Vec::new();
        while let Ok(req) = self.fetch_requests.try_recv() {
            out.push(req);
        }
        out
    }

    pub fn drain_images(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(url) = self.image_requests.try_recv() {
            out.push(url);
        }
        out
    }
}

#[cfg(test)]
pub(crate) fn test_app(initial: Route) -> (App, Workers) {
    let (fetch_tx, fetch_requests) = mpsc::unbounded_channel();
    let (outcomes, fetch_rx) = mpsc::unbounded_channel();
    let (image_tx, image_requests) = mpsc::unbounded_channel();
    let (images, image_rx) = mpsc::unbounded_channel();

    let mut app = App::with_channels(fetch_tx, fetch_rx, image_tx, image_rx, "mpv".into());
    actions::navigate(&mut app, initial);
    (
        app,
        Workers {
            fetch_requests,
            outcomes,
            image_requests,
            images,
        },
    )
}
