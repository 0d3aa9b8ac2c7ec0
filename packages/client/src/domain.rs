//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement the reconnection policy
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// A peer that does not speak the score room protocol will not start doing
/// so after a reconnect.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Protocol(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Failed attempt count after `error`.
///
/// Losing an established connection starts a fresh series of attempts.
pub fn next_attempt_count(error: &ClientError, current_attempt: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        _ => current_attempt + 1,
    }
}
