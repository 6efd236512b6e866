pub mod config;
pub mod progress;

use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode, Url};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::util::{file_size, mb, parse_filename, part_path};

use self::config::FetchConfig;
use self::progress::ProgressState;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File IO operation failed, error: '{0}'")]
    Io(#[from] tokio::io::Error),
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("No filename in url: '{0}'")]
    MissingFilename(Url),
    #[error("Invalid header value: '{0}'")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

type ProgressCallback<'a> = &'a mut (dyn FnMut(&str) + Send);

/// Downloads single files into a directory.
///
/// A file that is already present at the destination is never requested again.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    client: Client,
    pub config: FetchConfig,
}

impl Default for FileFetcher {
    fn default() -> Self {
        Self::new(Client::new(), None)
    }
}

impl FileFetcher {
    pub fn new(client: Client, config: Option<FetchConfig>) -> Self {
        // If no configuration is passed the default one is used
        Self {
            client,
            config: config.unwrap_or_default(),
        }
    }

    /**
    Downloads `url` into `dst_dir`, named after the last path segment of the url.
    * Ok(true) when the file is on disk, either freshly downloaded or already present
    * Ok(false) when the server did not answer with 200
    `dst_dir` has to exist, see [`crate::ensure_dir`].
     */
    pub async fn download(&self, url: &Url, dst_dir: &Path) -> Result<bool> {
        self.fetch(url, dst_dir, None).await
    }

    /// Same as [`FileFetcher::download`], `callback` receives the rendered progress
    /// line after every chunk when the server announces a content length.
    pub async fn download_with_progress<F>(
        &self,
        url: &Url,
        dst_dir: &Path,
        mut callback: F,
    ) -> Result<bool>
    where
        F: FnMut(&str) + Send,
    {
        self.fetch(url, dst_dir, Some(&mut callback)).await
    }

    /// Final location of the file downloaded from `url`.
    pub fn destination(&self, url: &Url, dst_dir: &Path) -> Result<PathBuf> {
        let filename = parse_filename(url).ok_or_else(|| Error::MissingFilename(url.clone()))?;
        Ok(dst_dir.join(filename))
    }

    async fn fetch(
        &self,
        url: &Url,
        dst_dir: &Path,
        callback: Option<ProgressCallback<'_>>,
    ) -> Result<bool> {
        let file_path = self.destination(url, dst_dir)?;
        if tokio::fs::try_exists(&file_path).await? {
            log::debug!(
                "{} already exists, skipping download of {}",
                file_path.to_string_lossy(),
                url
            );
            return Ok(true);
        }

        let mut request = self.client.get(url.as_ref()).headers(self.config.headers.clone());
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }
        let resp = request.send().await?;
        let status = resp.status();
        if status != StatusCode::OK {
            log::warn!("Download of {} did not yield 200, instead: {}", url, status);
            return Ok(false);
        }

        log::info!("Downloading {} to {}", url, file_path.to_string_lossy());
        let tmp_path = part_path(&file_path);
        let file_handler = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .await?;
        let downloaded_bytes = match resp.content_length() {
            None => self.write_whole(resp, file_handler).await?,
            Some(total) => self.progress(resp, file_handler, total, callback).await?,
        };
        tokio::fs::rename(&tmp_path, &file_path).await?;
        log::info!(
            "Download completed successfully: {}, {} bytes received, {:.2}MB on disk",
            url,
            downloaded_bytes,
            mb(file_size(&file_path).await)
        );
        Ok(true)
    }

    /// Without a content length there is nothing to report, the body goes out in one write.
    async fn write_whole(&self, resp: Response, mut file_handler: File) -> Result<u64> {
        let body = resp.bytes().await?;
        file_handler.write_all(&body).await?;
        file_handler.flush().await?;
        Ok(body.len() as u64)
    }

    async fn progress(
        &self,
        resp: Response,
        mut file_handler: File,
        total: u64,
        mut callback: Option<ProgressCallback<'_>>,
    ) -> Result<u64> {
        let chunk_size = self.config.chunk_size.max(1);
        let width = self.config.progress_width;
        let mut progress = ProgressState::new(total);
        let mut pending: Vec<u8> = Vec::with_capacity(chunk_size * 2);
        let mut stream = resp.bytes_stream();
        let mut finished = false;
        while !finished {
            match stream.next().await {
                Some(item) => pending.extend_from_slice(&item?),
                None => finished = true,
            }
            // Network frames are re-sliced so every report covers exactly one chunk,
            // only the tail of the body may be shorter.
            let ready = if finished {
                pending.len()
            } else {
                pending.len() - pending.len() % chunk_size
            };
            for chunk in pending[..ready].chunks(chunk_size) {
                file_handler.write_all(chunk).await?;
                progress.advance(chunk.len());
                if let Some(callback) = callback.as_deref_mut() {
                    callback(&progress.render(width));
                }
            }
            pending.drain(..ready);
        }
        file_handler.flush().await?;
        Ok(progress.downloaded)
    }
}
