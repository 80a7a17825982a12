//! Atomic file replacement shared by the on-disk backends.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

/// Suffix of in-flight temporary files.
const TMP_SUFFIX: &str = ".tmp";

/// What: Path of the temporary sibling used while replacing `path`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}

/// What: Replace `path` with `contents` so readers see either the old or the new file.
///
/// Inputs:
/// - `path`: Target file
/// - `contents`: Full new content
///
/// Output:
/// - `Ok(())` once the rename completed
///
/// # Errors
/// - Any I/O error from creating, syncing or renaming the temporary file
///
/// Details:
/// - Writes `{name}.tmp`, syncs it, then renames over the target
/// - On unix the file is created with mode `0600`
pub async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp = tmp_path(path);
    let mut opts = tokio::fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(0o600);
    let mut file = opts.open(&tmp).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}
