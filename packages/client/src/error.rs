//! Error types for the score client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Could not establish the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The connection was established and then lost
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// The server sent something that is not a score room event
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A line typed by the user could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
