//! Atomic output files: write next to the destination, then rename.

use std::io::Write;
use std::path::Path;

use convert_core::error::{ConvertError, Result};

/// Write `data` to `path` through a temp file in the same directory.
///
/// The destination only appears once every byte is on disk.
pub fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConvertError::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| ConvertError::FileOpen {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
