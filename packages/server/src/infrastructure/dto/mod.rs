//! Data Transfer Objects (DTOs) for the score room server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs (shared with the client)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;

pub use scoreroom_shared::protocol as websocket;
