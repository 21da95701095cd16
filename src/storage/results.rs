//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::path::PathBuf;
use tokio::fs::File;

/// Result of a store operation
#[derive(Debug)]
pub struct StoreResult {
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Result of opening a file for retrieval
///
/// The file is consumed as a single-pass byte stream by the caller.
#[derive(Debug)]
pub struct RetrieveResult {
    pub file: File,
    pub size: u64,
}
