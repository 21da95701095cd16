//! File system storage management
//!
//! The sandboxing core: path resolution confined to a storage root, and
//! the file operations that act on resolved paths.

pub mod operations;
pub mod resolver;
pub mod results;

pub use resolver::PathResolver;
