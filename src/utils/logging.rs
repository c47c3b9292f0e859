use tracing::Level;

use crate::config::LogSettings;

/// Maps a textual level to a tracing `Level`, falling back to `INFO`.
pub fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Initialize tracing for an application embedding the CCS client.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .try_init();
}

pub fn init_from_settings(settings: &LogSettings) {
    init(&settings.level);
}
