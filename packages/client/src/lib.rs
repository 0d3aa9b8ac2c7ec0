//! CLI client for the score room server.
//!
//! Keeps a live mirror of one room's scores and prints the computed score
//! table whenever the server pushes a new snapshot.

pub mod command;
pub mod error;
pub mod store;

mod domain;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ClientConfig, run_client};
