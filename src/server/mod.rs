//! HTTP server
//!
//! Builds the router over the storage core and runs the accept loop.

pub mod core;

pub use core::{AppState, Server};
