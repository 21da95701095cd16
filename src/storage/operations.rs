//! Storage operations
//!
//! Filesystem reads and mutations over resolver-verified paths. Callers
//! must only pass paths produced by `PathResolver::resolve`; no traversal
//! checking happens here.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use log::{error, info};
use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;
use crate::storage::results::{RetrieveResult, StoreResult};

/// Writes a byte stream to `path`, replacing any existing file.
///
/// Missing parent directories are created first. The file is written in
/// place rather than through a temporary file, so an interrupted upload
/// can leave a partial file behind; callers repair by re-uploading.
pub async fn store_file<S>(path: &Path, mut stream: S) -> Result<StoreResult, StorageError>
where
    S: Stream<Item = Result<Bytes, io::Error>> + Unpin,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(path).await?;
    let mut bytes_written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            error!("Upload stream failed for {}: {}", path.display(), e);
            StorageError::Io(e)
        })?;

        file.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }

    file.flush().await?;

    info!("Stored {} ({} bytes)", path.display(), bytes_written);

    Ok(StoreResult {
        path: path.to_path_buf(),
        bytes_written,
    })
}

/// Moves the entry at `from` to `to` using the platform rename primitive.
///
/// An existing file at `to` is silently replaced where the platform's
/// rename does so (Unix does); that behavior is preserved rather than
/// guarded against.
pub async fn rename_entry(from: &Path, to: &Path) -> Result<(), StorageError> {
    if !fs::try_exists(from).await? {
        return Err(StorageError::FileNotFound(from.display().to_string()));
    }

    // The source was just checked, so a NotFound from the rename itself
    // points at the destination side (e.g. a missing parent directory).
    fs::rename(from, to)
        .await
        .map_err(|e| StorageError::from_io(e, to))?;

    info!("Renamed {} -> {}", from.display(), to.display());

    Ok(())
}

/// Opens the regular file at `path` for reading and reports its size.
///
/// Fails with `FileNotFound` when the entry is absent and `NotAFile` when
/// it is a directory or other non-regular object. The entry vanishing
/// between the check and the open surfaces as the same errors.
pub async fn open_file_stream(path: &Path) -> Result<RetrieveResult, StorageError> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::FileNotFound(path.display().to_string()));
        }
        Err(e) => return Err(StorageError::Io(e)),
    };

    if !metadata.is_file() {
        return Err(StorageError::NotAFile(path.display().to_string()));
    }

    let file = fs::File::open(path)
        .await
        .map_err(|e| StorageError::from_io(e, path))?;

    Ok(RetrieveResult {
        file,
        size: metadata.len(),
    })
}

/// Deletes the regular file at `path`.
///
/// Directories are never removed here; a directory target fails with
/// `NotAFile` so a generic delete endpoint cannot wipe out a subtree.
pub async fn delete_file(path: &Path) -> Result<(), StorageError> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::FileNotFound(path.display().to_string()));
        }
        Err(e) => return Err(StorageError::Io(e)),
    };

    if !metadata.is_file() {
        return Err(StorageError::NotAFile(path.display().to_string()));
    }

    fs::remove_file(path)
        .await
        .map_err(|e| StorageError::from_io(e, path))?;

    info!("Deleted {}", path.display());

    Ok(())
}
