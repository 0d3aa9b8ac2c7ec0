//! Room-scoped score synchronization server.
//!
//! Clients join a named room over WebSocket, edit the shared score sheet, and
//! receive the full room snapshot after every change.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
