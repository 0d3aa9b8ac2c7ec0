//! Shared building blocks for the Scoreroom server and client.
//!
//! - `logger`: tracing subscriber setup for the binaries
//! - `time`: clock abstraction and timestamp formatting
//! - `protocol`: WebSocket wire format exchanged between client and server

pub mod logger;
pub mod protocol;
pub mod time;
