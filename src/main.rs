mod app;
mod cli;
mod model;
mod sys;
mod tui;

use anyhow::{Context, Result};
use app::{App, AppAction};
use clap::Parser;
use cli::{Cli, Command};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use ratatui_image::picker::Picker;
use std::net::SocketAddr;
use std::process::exit;
use std::sync::Arc;
use std::{
    io,
    time::{Duration, Instant},
};
use sys::config::{Config, GEMINI_KEY_VAR, YOUTUBE_KEY_VAR};
use sys::feeds::Discovery;
use sys::gemini::{GeminiClient, QueryGenerator, RemoteSuggester};
use sys::server::ServerState;
use sys::yt::YouTubeClient;

fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("tubescope/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

fn query_generator(config: &Config, http: &reqwest::Client) -> Arc<dyn QueryGenerator> {
    if let Some(endpoint) = &config.suggest_endpoint {
        log::info!("Using suggestion endpoint {}", endpoint);
        return Arc::new(RemoteSuggester::new(http.clone(), endpoint.clone()));
    }
    let key = config.gemini_key().unwrap_or_else(|| {
        log::warn!("{} is not set; related videos will be unavailable", GEMINI_KEY_VAR);
        String::new()
    });
    Arc::new(GeminiClient::new(
        http.clone(),
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
        key,
    ))
}

async fn run_server(config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Err(e) = sys::logging::init_logger(config.log_path(), config.logging.enabled, true) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let Some(key) = config.gemini_key() else {
        eprintln!("CRITICAL: {} is not set.", GEMINI_KEY_VAR);
        exit(1);
    };

    let host = host.unwrap_or_else(|| config.server_host.clone());
    let port = port.unwrap_or(config.server_port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let http = http_client()?;
    let generator: Arc<dyn QueryGenerator> = Arc::new(GeminiClient::new(
        http,
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
        key,
    ));
    sys::server::serve(addr, ServerState { generator }).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();

    if cli.write_config {
        let path = config.save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if let Some(Command::Serve { host, port }) = cli.command {
        return run_server(config, host, port).await;
    }

    if let Err(e) = sys::logging::init_logger(config.log_path(), config.logging.enabled, false) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let Some(youtube_key) = config.youtube_key() else {
        eprintln!("CRITICAL: {} is not set.", YOUTUBE_KEY_VAR);
        eprintln!("Tubescope needs a YouTube Data API key to list videos.");
        exit(1);
    };

    let http = http_client()?;
    let api = Arc::new(YouTubeClient::new(
        http.clone(),
        config.youtube_api_base.clone(),
        youtube_key,
    ));
    let discovery = Discovery::new(api, query_generator(&config, &http), config.feed_settings());
    let initial_route = cli.initial_route();
    log::info!("Starting Tubescope at {}", initial_route);

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ask the terminal for its graphics protocol; fall back to half-blocks
    let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 16)));

    let mut app = App::new(discovery, http, config.mpv_path.clone(), initial_route);

    // Main Loop
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| tui::ui(f, &mut app, &mut picker))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
                Event::Paste(text) => app.handle_paste(text),
                _ => {}
            }
        }

        // Handle pending actions (Playback)
        if let Some((action, url, title)) = app.pending_action.take() {
            match action {
                AppAction::OpenInBrowser => {
                    app.status_message = Some(match sys::process::open_in_browser(&url) {
                        Ok(()) => "Opened in browser.".to_string(),
                        Err(e) => {
                            log::error!("{:#}", e);
                            "Could not open the browser.".to_string()
                        }
                    });
                }
                AppAction::CopyLink => {
                    app.status_message = Some(match sys::process::copy_to_clipboard(&url) {
                        Ok(()) => "Link copied.".to_string(),
                        Err(e) => {
                            log::error!("{:#}", e);
                            "Could not copy the link.".to_string()
                        }
                    });
                }
                AppAction::WatchExternal => {
                    // Kill previous playback if any
                    app.stop_playback();
                    match sys::process::play_video(&app.mpv_path, &url, false) {
                        Ok(child) => {
                            app.playback_process = Some(child);
                            app.playback_title = Some(title);
                            app.status_message = Some("Playing externally...".to_string());
                        }
                        Err(e) => {
                            log::error!("{:#}", e);
                            app.status_message = Some(format!("Error playing video: {}", e));
                        }
                    }
                }
                AppAction::WatchInTerminal => {
                    app.stop_playback();

                    // Suspend TUI while mpv owns the terminal
                    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
                    disable_raw_mode()?;
                    terminal.show_cursor()?;

                    match sys::process::play_video(&app.mpv_path, &url, true) {
                        Ok(mut child) => {
                            let _ = child.wait().await;
                        }
                        Err(e) => {
                            log::error!("{:#}", e);
                            app.status_message = Some(format!("Error playing video: {}", e));
                        }
                    }

                    // Resume TUI
                    enable_raw_mode()?;
                    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
                    terminal.hide_cursor()?;
                    terminal.clear()?;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        if !app.running {
            break;
        }
    }

    // Restore Terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;
    app.stop_playback();

    Ok(())
}
