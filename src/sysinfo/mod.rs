//! Disk and platform introspection
//!
//! Informational lookups only; nothing here touches caller-supplied
//! paths, so there is no traversal or mutation risk.

use serde::Serialize;
use std::io;
use std::path::Path;

/// Disk capacity and platform identification for the storage root's mount.
#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub platform: &'static str,
    pub arch: &'static str,
    pub total_space_bytes: u64,
    pub free_space_bytes: u64,
    pub storage_root: String,
}

/// Gathers capacity figures for the filesystem holding `root`.
pub fn gather(root: &Path) -> io::Result<SystemInfo> {
    let stats = fs2::statvfs(root)?;

    Ok(SystemInfo {
        platform: std::env::consts::OS,
        arch: std::env::consts::ARCH,
        total_space_bytes: stats.total_space(),
        free_space_bytes: stats.free_space(),
        storage_root: root.display().to_string(),
    })
}
