//! Client execution logic with reconnection support.

use std::time::Duration;

use tokio::sync::mpsc;

use super::{
    domain::{next_attempt_count, should_attempt_reconnect},
    error::ClientError,
    session::run_client_session,
    store::ScoreStore,
    ui::spawn_line_reader,
};

/// Client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the server
    pub url: String,
    /// Room to join on start
    pub room: Option<String>,
    /// Participant name to join with on start
    pub name: Option<String>,
    pub max_reconnect_attempts: u32,
    pub reconnect_interval: Duration,
}

/// Run the score client with reconnection logic
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    let mut store = ScoreStore::new(outbound_tx);

    if let (Some(room), Some(name)) = (&config.room, &config.name) {
        store.join(room.clone(), name.clone());
    }

    spawn_line_reader(input_tx);

    let mut failed_attempts = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            config.url,
            failed_attempts + 1,
            config.max_reconnect_attempts
        );

        let error =
            match run_client_session(&config.url, &mut store, &mut outbound_rx, &mut input_rx)
                .await
            {
                Ok(()) => {
                    tracing::info!("Client session ended normally");
                    return Ok(());
                }
                Err(e) => e,
            };

        tracing::warn!("{}", error);
        failed_attempts = next_attempt_count(&error, failed_attempts);

        if !should_attempt_reconnect(&error, failed_attempts, config.max_reconnect_attempts) {
            tracing::error!(
                "Giving up after {} failed attempt(s). Exiting.",
                failed_attempts
            );
            return Err(error);
        }

        // The server dropped our membership with the connection
        if matches!(error, ClientError::ConnectionLost(_)) {
            store.rejoin();
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            config.reconnect_interval.as_secs(),
            failed_attempts + 1,
            config.max_reconnect_attempts
        );

        tokio::time::sleep(config.reconnect_interval).await;
    }
}
