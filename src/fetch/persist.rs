//! Writing accepted images to the save directory.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use super::error::FetchError;

/// Writes `bytes` to `dir/filename`, creating `dir` if needed.
///
/// An existing file with the same name is replaced. If the write fails the
/// partial file is removed, so the caller sees either the whole file or none.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the directory cannot be created or the file
/// cannot be written.
pub async fn persist_image(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, FetchError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| FetchError::io(dir, e))?;

    let file_path = dir.join(filename);
    let file = File::create(&file_path)
        .await
        .map_err(|e| FetchError::io(file_path.clone(), e))?;

    if let Err(error) = write_all(file, bytes, &file_path).await {
        debug!(path = %file_path.display(), "cleaning up partial file after error");
        let _ = tokio::fs::remove_file(&file_path).await;
        return Err(error);
    }

    debug!(path = %file_path.display(), bytes = bytes.len(), "image written");
    Ok(file_path)
}

async fn write_all(file: File, bytes: &[u8], file_path: &Path) -> Result<(), FetchError> {
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .await
        .map_err(|e| FetchError::io(file_path.to_path_buf(), e))?;
    writer
        .flush()
        .await
        .map_err(|e| FetchError::io(file_path.to_path_buf(), e))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_persist_image_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("Fetched_Images").join("nested");

        let path = tokio_test::block_on(persist_image(&dir, "cat.png", b"\x89PNG")).unwrap();

        assert_eq!(path, dir.join("cat.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_persist_image_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("cat.png"), b"old bytes that are longer").unwrap();

        let path =
            tokio_test::block_on(persist_image(temp_dir.path(), "cat.png", b"new")).unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }

    #[test]
    fn test_persist_image_directory_is_a_file_returns_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"x").unwrap();

        let result = tokio_test::block_on(persist_image(&blocker, "cat.png", b"data"));

        assert!(matches!(result, Err(FetchError::Io { .. })), "{result:?}");
    }

    #[test]
    fn test_persist_image_empty_payload_writes_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = tokio_test::block_on(persist_image(temp_dir.path(), "empty.gif", b"")).unwrap();
        assert_eq!(std::fs::metadata(path).unwrap().len(), 0);
    }
}
