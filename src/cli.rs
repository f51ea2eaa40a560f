use clap::{Parser, Subcommand};

use crate::model::Route;

#[derive(Parser, Debug)]
#[command(name = "Tubescope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(args_conflicts_with_subcommands = true)]
#[command(help_template = "NAME:
   {name} - Terminal video discovery

USAGE:
   tubescope [query | /watch/<id> | /search/<keyword>] [global options]
   tubescope serve [--host <HOST>] [--port <PORT>]

VERSION:
   {version}

DESCRIPTION:
   {name} lists trending videos, searches by keyword, and opens a watch view
   with AI-picked related videos. Videos open in your browser or in mpv.

   Controls:
     • /  search, Enter to submit
     • Arrows or h/j/k/l to move, Enter to watch
     • Esc to go back, g for trending, r to reload
     • o: browser  p: mpv  t: mpv in terminal  y: copy link
     • q to quit

   Keys are read from YOUTUBE_API_KEY and GEMINI_API_KEY.

GLOBAL OPTIONS:
{options}
{subcommands}")]
pub struct Cli {
    /// Search query, or a route path such as /watch/<id>
    pub target: Option<String>,

    /// Open the watch view for this video id
    #[arg(short = 'w', long = "watch", value_name = "ID")]
    pub watch: Option<String>,

    /// Write the current configuration (defaults included) to the config file and exit
    #[arg(long = "write-config")]
    pub write_config: bool,

    /// print the version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub show_version: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the suggestion-query endpoint over HTTP
    Serve {
        /// Interface to bind (defaults to server_host from the config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (defaults to server_port from the config)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Route the TUI opens on. Unusable input falls back to the trending page.
    pub fn initial_route(&self) -> Route {
        if let Some(id) = &self.watch {
            return Route::watch(id).unwrap_or(Route::Home);
        }
        match self.target.as_deref() {
            Some(t) if t.trim_start().starts_with('/') => {
                Route::from_path(t).unwrap_or(Route::Home)
            }
            Some(t) => Route::search(t).unwrap_or(Route::Home),
            None => Route::Home,
        }
    }
}
