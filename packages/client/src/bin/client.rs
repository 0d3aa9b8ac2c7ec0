//! Score room CLI client with reconnection support.
//!
//! Connects to a score room server, optionally joins a room on start, and
//! prints the computed score table every time the room changes.
//! Automatically reconnects on disconnection and rejoins the last room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin scoreroom-client -- --room table1 --name Alice
//! cargo run --bin scoreroom-client -- -u ws://127.0.0.1:3000/ws
//! ```

use std::time::Duration;

use clap::Parser;
use scoreroom_client::{ClientConfig, run_client};
use scoreroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "scoreroom-client")]
#[command(about = "CLI client for the score room server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Room to join on start (requires --name)
    #[arg(short = 'r', long, requires = "name")]
    room: Option<String>,

    /// Participant name to join with on start (requires --room)
    #[arg(short = 'n', long, requires = "room")]
    name: Option<String>,

    /// Give up after this many failed connection attempts in a row
    #[arg(long, default_value_t = 5)]
    max_reconnect_attempts: u32,

    /// Seconds to wait between connection attempts
    #[arg(long, default_value_t = 5)]
    reconnect_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger("scoreroom_client", env!("CARGO_BIN_NAME"), "info");

    let config = ClientConfig {
        url: args.url,
        room: args.room,
        name: args.name,
        max_reconnect_attempts: args.max_reconnect_attempts,
        reconnect_interval: Duration::from_secs(args.reconnect_interval_secs),
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
