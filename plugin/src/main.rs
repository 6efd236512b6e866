use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use reqwest::{Client, Url};
use upiot::{install_firmware, plugin_version, ConsoleView, Settings, StatusBar};
use upiot_fetch::FileFetcher;

/// Download a firmware image the way the uPIOT plugin does
#[derive(Debug, Parser)]
#[command(name = "upiot-fetch", version = plugin_version())]
struct Args {
    /// Firmware url, the file is named after its last path segment
    url: Url,
    /// Destination directory, defaults to the firmware directory of the settings
    #[arg(short, long)]
    dir: Option<PathBuf>,
    /// Settings file, defaults to ~/.upiot/settings.yaml
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Editor build reported in the User-Agent, overrides the settings
    #[arg(long)]
    host_version: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut settings = Settings::load(args.settings)
        .await
        .context("Couldn't load settings")?;
    if let Some(host_version) = args.host_version {
        settings.host_version = host_version;
    }
    let dir = args.dir.unwrap_or_else(|| settings.firmware_dir.clone());
    let fetcher = FileFetcher::new(Client::new(), Some(settings.fetch_config()?));
    let mut status = StatusBar::new();
    status.attach(ConsoleView::new(std::io::stderr()));

    if install_firmware(&fetcher, &args.url, &dir, &status).await? {
        let path = fetcher.destination(&args.url, &dir)?;
        println!("{}", path.to_string_lossy());
        Ok(())
    } else {
        anyhow::bail!("Server refused {}", args.url)
    }
}
