//! HTTP API layer
//!
//! Handlers and response envelopes wrapping the storage core.

pub mod handlers;
pub mod responses;
