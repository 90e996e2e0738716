//! Logger setup and event forwarding.

use colored::Colorize;
use env_logger::Builder;
use log::Level;
use std::io::Write;

use crate::events::Event;

/// Least severe event level still logged while a progress bar owns the terminal line.
pub const PROGRESS_EVENT_LEVEL: Level = Level::Warn;

pub fn setup_logging(verbose: bool) {
    use log::LevelFilter;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // try_init: library callers and tests may have installed a logger already.
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // Default: only warnings from dependencies
        .filter_module(env!("CARGO_CRATE_NAME"), level) // Our crate: use requested level
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        Level::Error => "ERROR".red(),
                        _ => unreachable!(),
                    };
                    let path = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, path, record.args())
                }
                _ => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .try_init();
}

/// Whether `event` is logged. With a progress bar on screen, per-file info and debug
/// lines would tear the bar, so only warnings and errors pass.
pub fn event_passes(event: &Event, progress_shown: bool) -> bool {
    !progress_shown || event.level() <= PROGRESS_EVENT_LEVEL
}

/// Forward a pipeline event to the log, subject to [`event_passes`].
pub fn log_event(event: &Event, progress_shown: bool) {
    if event_passes(event, progress_shown) {
        event.log();
    }
}
