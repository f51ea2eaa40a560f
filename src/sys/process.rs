use std::process::Stdio;
use anyhow::{Context, Result};
use tokio::process::{Child, Command};

/// Launches mpv on a watch URL. In-terminal playback inherits stdio so the
/// caller must suspend the TUI first.
pub fn play_video(mpv: &str, url: &str, in_terminal: bool) -> Result<Child> {
    let mut cmd = Command::new(mpv);
    cmd.arg(url);

    if in_terminal {
        cmd.arg("--vo=tct");
        cmd.stdin(Stdio::inherit())
           .stdout(Stdio::inherit())
           .stderr(Stdio::inherit());
    } else {
        cmd.arg("--force-window=immediate");
        cmd.stdin(Stdio::null())
           .stdout(Stdio::null())
           .stderr(Stdio::null());
    }

    cmd.kill_on_drop(in_terminal)
        .spawn()
        .with_context(|| format!("Failed to start '{}'. Is it installed and in your PATH?", mpv))
}

pub fn open_in_browser(url: &str) -> Result<()> {
    webbrowser::open(url).with_context(|| format!("Failed to open browser for {}", url))
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write to clipboard")
}
