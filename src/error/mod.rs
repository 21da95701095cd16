//! Error handling
//!
//! Defines error types for the storage core.

pub mod types;

pub use types::*;
