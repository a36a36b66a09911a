use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::Result;

/// Serialize `value` and atomically replace `path` with it.
pub fn write_json_atomic<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    replace_atomic(path.as_ref(), &bytes)
}

pub fn write_text_atomic(path: impl AsRef<Path>, text: &str) -> Result<()> {
    replace_atomic(path.as_ref(), text.as_bytes())
}

/// Write into a temp file in the target's directory, then rename over the
/// target so readers only ever see the old or the new file whole.
fn replace_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
