use std::time::Duration;
use reqwest::StatusCode;
use thiserror::Error;

/// Why a chat request did not produce a reply.
///
/// The user sees the same localized message for every variant; the variants
/// only exist so the log says what actually went wrong.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("could not reach chat server: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("chat request timed out after {0:?}")]
    Timeout(Duration),

    #[error("chat server returned status {0}")]
    Status(StatusCode),

    #[error("malformed chat response: {0}")]
    Malformed(String),

    #[error("chat request task failed: {0}")]
    Task(String),
}
