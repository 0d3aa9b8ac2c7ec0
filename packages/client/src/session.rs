//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use scoreroom_shared::protocol::{ClientEvent, ServerEvent};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::Command,
    error::ClientError,
    store::{
        Notice, ScoreStore,
        selector::{select_member_names, select_room_name, select_score_by_name},
    },
};

use super::{formatter::ScoreFormatter, ui::redisplay_prompt};

/// Run one WebSocket session until the user quits or the connection drops.
///
/// Returns `Ok(())` when the user asked to exit.
pub async fn run_client_session(
    url: &str,
    store: &mut ScoreStore,
    outbound_rx: &mut mpsc::UnboundedReceiver<ClientEvent>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to score room server!");
    println!("\nType /help for the list of commands. Press Ctrl+C to exit.\n");
    redisplay_prompt();

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let event = serde_json::from_str::<ServerEvent>(text.as_str())
                        .map_err(|e| ClientError::Protocol(e.to_string()))?;
                    match store.handle_server_event(event) {
                        Notice::ScoresChanged(_) => print_scores(store),
                        Notice::Failed(message) => {
                            print!("{}", ScoreFormatter::format_error(&message));
                            redisplay_prompt();
                        }
                        Notice::Unchanged => {}
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost("closed by server".to_string()));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost(e.to_string()));
                }
            },
            event = outbound_rx.recv() => {
                let Some(event) = event else {
                    return Ok(());
                };
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize event: {}", e);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::text(json)).await {
                    tracing::warn!("Failed to send event: {}", e);
                    return Err(ClientError::ConnectionLost(e.to_string()));
                }
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    let _ = write.close().await;
                    return Ok(());
                };
                if handle_line(store, &line) {
                    let _ = write.close().await;
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one line typed by the user. Returns `true` on `/quit`.
fn handle_line(store: &mut ScoreStore, line: &str) -> bool {
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            print!("{}", ScoreFormatter::format_error(&e.to_string()));
            redisplay_prompt();
            return false;
        }
    };

    match command {
        Command::Join { room, name } => {
            store.join(room, name);
        }
        Command::Add { name } => {
            store.add_participant(name);
        }
        Command::Score { name, edit } => {
            let scores = store.computed_scores();
            let current_science = select_score_by_name(&scores, &name).map(|s| s.science);
            store.update_score(name, edit.to_update(current_science));
        }
        Command::Leave => {
            store.leave();
        }
        Command::Show => print_scores(store),
        Command::Help => {
            println!("{}", ScoreFormatter::format_help());
            redisplay_prompt();
        }
        Command::Quit => return true,
    }
    false
}

fn print_scores(store: &mut ScoreStore) {
    let scores = store.computed_scores();
    let state = store.state();
    let formatted = ScoreFormatter::format_table(
        select_room_name(state),
        &select_member_names(state),
        &scores,
        store.my_name(),
    );
    print!("{}", formatted);
    redisplay_prompt();
}
