//! Score room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin scoreroom-server
//! cargo run --bin scoreroom-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use scoreroom_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryMembershipRepository, InMemoryRoomRepository},
    },
    ui::{AppState, Server},
};
use scoreroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "scoreroom-server")]
#[command(about = "Room-scoped score synchronization server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "SCOREROOM_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "SCOREROOM_PORT", default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "SCOREROOM_LOG_LEVEL", default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger("scoreroom_server", env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases (AppState)
    // 4. Server
    let room_repository = Arc::new(InMemoryRoomRepository::new(Arc::new(SystemClock)));
    let membership_repository = Arc::new(InMemoryMembershipRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    let state = AppState::new(room_repository, membership_repository, message_pusher);

    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
