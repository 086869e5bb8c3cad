//! Error types for the stats bot

use thiserror::Error;

/// Errors raised while posting to the chat channel
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Messaging API returned status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Messaging API rejected the message: {0}")]
    Api(String),
}

/// Errors surfaced to the triggers
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No report enabled, nothing to send")]
    EmptyReport,
}

impl BotError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for bot operations
pub type BotResult<T> = Result<T, BotError>;
