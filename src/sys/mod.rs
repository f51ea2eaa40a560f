pub mod config;
pub mod feeds;
pub mod gemini;
pub mod image;
pub mod logging;
pub mod process;
pub mod server;
pub mod yt;
