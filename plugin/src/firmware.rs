use reqwest::Url;
use std::path::Path;
use upiot_fetch::{ensure_dir, FileFetcher};

use crate::status::{StatusBar, View};

/**
Downloads a firmware image into `dir`, showing progress on the status bar.
Returns the download's result: true when the image is on disk, false when
the server refused it.
 */
pub async fn install_firmware<V: View + Sync>(
    fetcher: &FileFetcher,
    url: &Url,
    dir: &Path,
    status: &StatusBar<V>,
) -> crate::Result<bool> {
    ensure_dir(dir).await?;
    let saved = fetcher
        .download_with_progress(url, dir, |line| status.set_status(line))
        .await;
    status.clear_status();
    let saved = saved?;
    if !saved {
        log::warn!("Firmware {} could not be downloaded", url);
    }
    Ok(saved)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::Client;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use test_log::test;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl View for Lines {
        fn set_status(&self, _key: &str, text: &str) {
            self.0.lock().unwrap().push(text.to_owned());
        }

        fn erase_status(&self, _key: &str) {
            self.0.lock().unwrap().push(String::new());
        }
    }

    #[test(tokio::test)]
    async fn install_firmware_reports_on_status_bar_test() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/esp8266/esp8266-20190125-v1.10.bin")
            .with_status(200)
            .with_body(vec![7u8; 2048])
            .create_async()
            .await;
        let tmp_dir = TempDir::new()?;
        let dir = tmp_dir.path().join("firmware").join("esp8266");
        let url = Url::parse(&format!(
            "{}/esp8266/esp8266-20190125-v1.10.bin",
            server.url()
        ))?;
        let mut status = StatusBar::new();
        status.attach(Lines::default());
        let fetcher = FileFetcher::new(Client::new(), None);

        let saved = install_firmware(&fetcher, &url, &dir, &status).await?;

        assert!(saved);
        assert!(dir.join("esp8266-20190125-v1.10.bin").is_file());
        let lines = status.detach().unwrap().0.into_inner().unwrap();
        assert_eq!(
            lines,
            vec![
                "Downloading Firmware 50% [■■         ]".to_owned(),
                "Downloading Firmware 100% [■■■■■]".to_owned(),
                String::new(),
            ]
        );
        Ok(())
    }

    #[test(tokio::test)]
    async fn refused_firmware_clears_status_test() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/esp32/missing.bin")
            .with_status(403)
            .create_async()
            .await;
        let tmp_dir = TempDir::new()?;
        let url = Url::parse(&format!("{}/esp32/missing.bin", server.url()))?;
        let mut status = StatusBar::new();
        status.attach(Lines::default());

        let saved = install_firmware(&FileFetcher::default(), &url, tmp_dir.path(), &status).await?;

        assert!(!saved);
        let lines = status.detach().unwrap().0.into_inner().unwrap();
        assert_eq!(lines, vec![String::new()]);
        Ok(())
    }
}
