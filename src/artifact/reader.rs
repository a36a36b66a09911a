use std::path::Path;

use serde_json::Value;

use crate::error::{AppError, Result};

/// Read and parse the whole snapshot document before any processing starts.
pub async fn read_snapshot_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await?;
    if raw.trim().is_empty() {
        return Err(AppError::Snapshot(format!("{} is empty", path.display())));
    }
    Ok(serde_json::from_str(&raw)?)
}
