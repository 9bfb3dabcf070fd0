//! Single-file copy, move and delete

use crate::error::{EngineError, Result};
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Copy `source` to `destination`, creating or truncating the destination and
/// syncing it to disk before returning
pub async fn copy_file(source: &Path, destination: &Path) -> Result<u64> {
    let mut input = File::open(source)
        .await
        .map_err(|e| EngineError::io("copy", source, e))?;
    let mut output = File::create(destination)
        .await
        .map_err(|e| EngineError::io("copy", destination, e))?;

    let copied = tokio::io::copy(&mut input, &mut output)
        .await
        .map_err(|e| EngineError::io("copy", destination, e))?;
    output
        .flush()
        .await
        .map_err(|e| EngineError::io("copy", destination, e))?;
    output
        .sync_all()
        .await
        .map_err(|e| EngineError::io("copy", destination, e))?;

    Ok(copied)
}

/// Remove a single file
pub async fn delete_file(path: &Path) -> Result<()> {
    fs::remove_file(path)
        .await
        .map_err(|e| EngineError::io("delete", path, e))
}

/// Copy then delete the source. Not a rename: if the delete fails the file
/// exists at both paths.
pub async fn move_file(source: &Path, destination: &Path) -> Result<()> {
    copy_file(source, destination).await?;
    delete_file(source).await
}
