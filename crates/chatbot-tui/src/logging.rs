use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("chatbot").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Logging for the full-screen UI. The terminal belongs to ratatui, so
/// everything goes to a daily rolling file instead of stderr.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_tui() -> WorkerGuard {
    let log_dir = log_dir();
    let file_appender = tracing_appender::rolling::daily(&log_dir, "chatbot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(file_layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    guard
}

/// Logging for one-shot commands: plain lines on stderr.
pub fn init_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
}
