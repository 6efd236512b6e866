use reqwest::Url;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Size of `fpath` on disk, 0 when it can't be read
pub async fn file_size(fpath: &Path) -> u64 {
    tokio::fs::metadata(fpath)
        .await
        .map(|metadata| metadata.len())
        .unwrap_or(0)
}

/**
 * Parses the filename from the download URL
 * Returns None if there is no filename or if url.path_segments() fails
 */
pub fn parse_filename(url: &Url) -> Option<&str> {
    let segments = url.path_segments()?;
    let filename = segments.last()?;
    if filename.is_empty() {
        None
    } else {
        Some(filename)
    }
}

/// Sibling path a download is written to before it is moved onto `fpath`.
pub fn part_path(fpath: &Path) -> PathBuf {
    let mut name = fpath.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    fpath.with_file_name(name)
}

/**
 * Makes sure `path` is a directory, creating missing ancestors.
 * Losing the creation race to another task or process is not an error.
 */
pub async fn ensure_dir(path: &Path) -> tokio::io::Result<()> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(());
    }
    match tokio::fs::create_dir_all(path).await {
        Err(e) if e.kind() != ErrorKind::AlreadyExists => Err(e),
        _ => {
            log::debug!("Directory {} ready", path.to_string_lossy());
            Ok(())
        }
    }
}

pub fn mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

#[cfg(test)]
pub mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use test_log::test;
    use tokio::{fs::File, io::AsyncWriteExt};

    #[test]
    fn parse_filename_test() -> anyhow::Result<()> {
        let url = Url::parse("https://upiot.example.com/firmware/esp32/esp32-20190125-v1.10.bin")?;
        let filename = parse_filename(&url).unwrap();
        assert_eq!(filename, "esp32-20190125-v1.10.bin", "File name doesn't match!");
        // query strings are not part of the name
        let url = Url::parse("https://upiot.example.com/fw/esp8266.bin?channel=stable#top")?;
        assert_eq!(parse_filename(&url), Some("esp8266.bin"));
        let url = Url::parse("https://upiot.example.com/")?;
        assert!(parse_filename(&url).is_none());
        let url = Url::parse("https://upiot.example.com/firmware/")?;
        assert!(parse_filename(&url).is_none());
        Ok(())
    }

    #[test]
    fn part_path_test() {
        let fpath = Path::new("/tmp/firmware/esp32.bin");
        assert_eq!(part_path(fpath), PathBuf::from("/tmp/firmware/esp32.bin.part"));
    }

    #[test]
    fn size_units_test() {
        assert_eq!(mb(3 * 1024 * 1024), 3.0);
    }

    #[test(tokio::test)]
    async fn file_size_retrieval_test() -> anyhow::Result<()> {
        let tmp_dir = TempDir::new()?;
        let fpath = tmp_dir.path().join("esp32.bin");
        assert_eq!(file_size(&fpath).await, 0, "Missing file should report 0 Bytes!");
        let mut file_handler = File::create(&fpath).await?;
        assert_eq!(
            file_size(fpath.as_path()).await,
            0,
            "Newly created file should have 0 Bytes!"
        );
        file_handler.write_all(b"firmware").await?;
        file_handler.flush().await?;
        assert_eq!(
            file_size(&fpath).await,
            8,
            "File should have as many bytes as written in the buffer!"
        );
        Ok(())
    }

    #[test(tokio::test)]
    async fn ensure_dir_creates_ancestors_test() -> anyhow::Result<()> {
        let tmp_dir = TempDir::new()?;
        let path = tmp_dir.path().join("upiot").join("firmware").join("esp32");
        ensure_dir(&path).await?;
        assert!(path.is_dir());
        // second call is a no-op
        ensure_dir(&path).await?;
        assert!(path.is_dir());
        Ok(())
    }

    #[test(tokio::test)]
    async fn ensure_dir_leaves_existing_content_test() -> anyhow::Result<()> {
        let tmp_dir = TempDir::new()?;
        let fpath = tmp_dir.path().join("keep.bin");
        tokio::fs::write(&fpath, b"keep").await?;
        ensure_dir(tmp_dir.path()).await?;
        assert_eq!(tokio::fs::read(&fpath).await?, b"keep");
        Ok(())
    }

    #[test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
    async fn concurrent_ensure_dir_test() -> anyhow::Result<()> {
        let tmp_dir = TempDir::new()?;
        let path = tmp_dir.path().join("boards").join("esp32");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = path.clone();
                tokio::spawn(async move { ensure_dir(&path).await })
            })
            .collect();
        for handle in handles {
            handle.await??;
        }
        assert!(path.is_dir());
        Ok(())
    }

    #[test(tokio::test)]
    async fn ensure_dir_below_regular_file_fails_test() -> anyhow::Result<()> {
        let tmp_dir = TempDir::new()?;
        let fpath = tmp_dir.path().join("not-a-dir");
        tokio::fs::write(&fpath, b"").await?;
        let result = ensure_dir(&fpath.join("firmware")).await;
        assert!(result.is_err(), "Creating below a file has to fail");
        Ok(())
    }
}
