//! Path resolution and sandboxing
//!
//! Turns untrusted relative paths into verified absolute paths inside the
//! storage root.

use log::warn;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Resolves untrusted relative paths against a fixed storage root.
///
/// The root is canonicalized once at construction; `resolve` is pure
/// string and path work after that, so one resolver can be shared freely
/// between request tasks.
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Creates a resolver rooted at `root`, creating the directory first
    /// if it does not exist yet.
    pub fn new(root: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(root)?;
        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    /// The canonicalized storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves an untrusted relative path to an absolute path inside the
    /// storage root.
    ///
    /// The check is lexical: `.` and `..` segments are resolved without
    /// touching the filesystem, so symlinks under the root are not
    /// followed here. An empty input denotes the root itself. A leading
    /// separator is ignored; the input is always interpreted relative to
    /// the root.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, StorageError> {
        // Backslashes count as separators so mixed-separator input cannot
        // sneak a `..` segment past the checks below.
        let cleaned = raw.replace('\\', "/");

        // Any leading run of `..` segments is a traversal attempt, no
        // matter where it would land after normalization.
        if strip_leading_parents(&cleaned).len() != cleaned.len() {
            warn!("Rejected traversal attempt: {raw}");
            return Err(StorageError::PathTraversal(raw.to_string()));
        }

        let Some(relative) = normalize_lexically(&cleaned) else {
            warn!("Rejected traversal attempt: {raw}");
            return Err(StorageError::PathTraversal(raw.to_string()));
        };

        if relative.as_os_str().is_empty() {
            return Ok(self.root.clone());
        }

        let candidate = self.root.join(relative);

        // starts_with compares whole components, so a sibling directory
        // like `store-evil` next to a root named `store` never passes.
        if candidate.starts_with(&self.root) {
            Ok(candidate)
        } else {
            warn!("Rejected traversal attempt: {raw}");
            Err(StorageError::PathTraversal(raw.to_string()))
        }
    }
}

/// Consumes any leading run of `..` segments and returns the remainder.
fn strip_leading_parents(mut path: &str) -> &str {
    loop {
        if let Some(rest) = path.strip_prefix("../") {
            path = rest;
        } else if path == ".." {
            return "";
        } else {
            return path;
        }
    }
}

/// Lexical `.`/`..` normalization with no filesystem access.
///
/// Returns `None` when a `..` segment would climb above the starting
/// point. Empty and `.` segments are dropped, which also discards any
/// leading separator.
fn normalize_lexically(path: &str) -> Option<PathBuf> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathResolver) {
        let dir = TempDir::new().unwrap();
        let resolver = PathResolver::new(&dir.path().join("store")).unwrap();
        (dir, resolver)
    }

    fn assert_rejected(resolver: &PathResolver, raw: &str) {
        match resolver.resolve(raw) {
            Err(StorageError::PathTraversal(_)) => {}
            other => panic!("expected traversal rejection for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn leading_parent_segments_are_rejected() {
        let (_dir, resolver) = setup();
        for raw in [
            "..",
            "../",
            "../etc/passwd",
            "../../etc/passwd",
            "../../../../../../etc/passwd",
            "..\\etc\\passwd",
            "..\\..\\windows\\system32",
            "../..\\mixed/separators",
        ] {
            assert_rejected(&resolver, raw);
        }
    }

    #[test]
    fn interior_climb_above_root_is_rejected() {
        let (_dir, resolver) = setup();
        assert_rejected(&resolver, "a/../../etc/passwd");
        assert_rejected(&resolver, "reports/../../../secret");
        assert_rejected(&resolver, "a\\..\\..\\b");
    }

    #[test]
    fn interior_parent_segments_within_bounds_resolve() {
        let (_dir, resolver) = setup();
        let resolved = resolver.resolve("a/b/../c.txt").unwrap();
        assert_eq!(resolved, resolver.root().join("a/c.txt"));
    }

    #[test]
    fn empty_and_dot_resolve_to_root() {
        let (_dir, resolver) = setup();
        assert_eq!(resolver.resolve("").unwrap(), resolver.root());
        assert_eq!(resolver.resolve(".").unwrap(), resolver.root());
        assert_eq!(resolver.resolve("./").unwrap(), resolver.root());
    }

    #[test]
    fn relative_paths_resolve_under_root() {
        let (_dir, resolver) = setup();
        let resolved = resolver.resolve("reports/q1.csv").unwrap();
        assert_eq!(resolved, resolver.root().join("reports/q1.csv"));
        assert!(resolved.starts_with(resolver.root()));
    }

    #[test]
    fn mixed_separators_resolve_consistently() {
        let (_dir, resolver) = setup();
        let resolved = resolver.resolve("dir\\sub/file.txt").unwrap();
        assert_eq!(resolved, resolver.root().join("dir/sub/file.txt"));
    }

    #[test]
    fn leading_separator_is_interpreted_relative_to_root() {
        let (_dir, resolver) = setup();
        let resolved = resolver.resolve("/etc/passwd").unwrap();
        assert_eq!(resolved, resolver.root().join("etc/passwd"));
    }

    #[test]
    fn sibling_directory_with_root_prefix_is_unreachable() {
        let (dir, resolver) = setup();
        std::fs::create_dir_all(dir.path().join("store-evil")).unwrap();

        for raw in [
            "../store-evil/loot.txt",
            "..\\store-evil\\loot.txt",
            "x/../../store-evil/loot.txt",
        ] {
            assert_rejected(&resolver, raw);
        }

        // A name that merely shares the prefix stays inside the root.
        let resolved = resolver.resolve("store-evil/loot.txt").unwrap();
        assert!(resolved.starts_with(resolver.root()));
    }
}
