//! Saving a downloaded file locally.

use std::path::{Path, PathBuf};

use lumen_core::errors::DownloadError;

/// Write `contents` to `<dir>/<filename>` via a `.part` file and a rename.
///
/// Only the final path component of `filename` is used. The partial file is
/// removed if any step fails.
pub async fn save_download(dir: &Path, filename: &str, contents: &[u8]) -> Result<PathBuf, DownloadError> {
    let name = Path::new(filename)
        .file_name()
        .filter(|n| !n.is_empty())
        .ok_or(DownloadError::NoFile)?;
    let target = dir.join(name);
    let mut part_name = name.to_os_string();
    part_name.push(".part");
    let part = dir.join(part_name);

    let write_err = |path: &Path, source: std::io::Error| DownloadError::Write {
        path: path.display().to_string(),
        source,
    };

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| write_err(dir, e))?;

    if let Err(e) = tokio::fs::write(&part, contents).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(write_err(&part, e));
    }
    if let Err(e) = tokio::fs::rename(&part, &target).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(write_err(&target, e));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_under_final_name_without_leftovers() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = save_download(dir.path(), "rooms.parquet", b"PAR1").await.unwrap();
        assert_eq!(path, dir.path().join("rooms.parquet"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PAR1");
        assert!(!dir.path().join("rooms.parquet.part").exists());
    }

    #[tokio::test]
    async fn directory_components_in_filename_are_dropped() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = save_download(dir.path(), "../../etc/rooms.parquet", b"x").await.unwrap();
        assert_eq!(path, dir.path().join("rooms.parquet"));
    }

    #[tokio::test]
    async fn empty_filename_is_no_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = save_download(dir.path(), "", b"x").await.unwrap_err();
        assert!(matches!(err, DownloadError::NoFile));
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_part_file() {
        let dir = tempfile::TempDir::new().unwrap();
        // A non-empty directory at the target path makes the rename fail.
        let blocker = dir.path().join("rooms.parquet");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();

        let err = save_download(dir.path(), "rooms.parquet", b"x").await.unwrap_err();
        assert!(matches!(err, DownloadError::Write { .. }));
        assert!(!dir.path().join("rooms.parquet.part").exists());
    }
}
