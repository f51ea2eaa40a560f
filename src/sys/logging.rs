use std::path::PathBuf;
use anyhow::Result;
use fern::colors::{Color, ColoredLevelConfig};

/// File logging for the TUI; `to_stdout` additionally chains stdout (server mode).
pub fn init_logger(path: PathBuf, enabled: bool, to_stdout: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::White)
        .trace(Color::BrightBlack);

    let level = if enabled {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Off
    };

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}]   {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                colors.color(record.level()),
                message
            ))
        })
        .level(level)
        // hyper and friends are chatty at info
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(fern::log_file(path)?);

    if to_stdout {
        dispatch = dispatch.chain(std::io::stdout());
    }

    dispatch.apply()?;
    Ok(())
}
