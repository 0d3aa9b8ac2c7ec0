//! UI 層
//!
//! - `gateway`: クライアントイベントをユースケースに振り分け、ack を組み立てる
//! - `handler`: axum のハンドラー（WebSocket / HTTP）
//! - `server`: ルーティングとサーバーの起動

pub mod gateway;
mod handler;
mod server;
mod signal;
pub mod state;

pub use gateway::SessionGateway;
pub use server::Server;
pub use state::AppState;
