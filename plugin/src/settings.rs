use dirs::{data_dir, home_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use upiot_fetch::{ensure_dir, FetchConfig};

use crate::version::user_agent;

/// Name of the settings file inside the editor's packages folder.
pub const SETTINGS_NAME: &str = "upiot.sublime-settings";

fn default_firmware_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("upiot").join("firmware"))
        .unwrap_or_else(|| PathBuf::from("firmware"))
}

fn default_host_version() -> String {
    "4169".to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_firmware_dir")]
    pub firmware_dir: PathBuf,
    /// Editor build reported in the User-Agent
    #[serde(default = "default_host_version")]
    pub host_version: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            firmware_dir: default_firmware_dir(),
            host_version: default_host_version(),
            timeout_secs: None,
        }
    }
}

impl Settings {
    /**
    Loads the settings from `p`, ~/.upiot/settings.yaml when None.
    * A missing file is created with the default settings
    * The firmware directory of an existing file is created when missing
     */
    pub async fn load(p: Option<PathBuf>) -> crate::Result<Self> {
        let path = p.unwrap_or_else(default_settings_path);
        let settings = if tokio::fs::try_exists(&path).await? {
            log::info!("Found settings file at {}, reading...", path.to_string_lossy());
            let file = tokio::fs::read_to_string(&path).await?;
            let settings: Settings = serde_yaml::from_str(&file)?;
            log::info!("Settings loaded: {:?}", settings);
            if !tokio::fs::try_exists(&settings.firmware_dir).await? {
                log::info!("firmware directory pointed at by settings does not exist, creating...");
                ensure_dir(&settings.firmware_dir).await?;
            }
            settings
        } else {
            log::info!(
                "No settings file found at {}, creating...",
                path.to_string_lossy()
            );
            let settings = Settings::default();
            settings.write(&path).await?;
            settings
        };
        Ok(settings)
    }

    pub async fn write(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }
        let settings_str = serde_yaml::to_string(self)?;
        tokio::fs::write(path, settings_str).await?;
        log::info!("Settings file written to {}", path.to_string_lossy());
        Ok(())
    }

    /// Fetch configuration carrying the plugin User-Agent and the configured timeout.
    pub fn fetch_config(&self) -> crate::Result<FetchConfig> {
        let mut config = FetchConfig::default().with_user_agent(&user_agent(&self.host_version))?;
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

fn default_settings_path() -> PathBuf {
    let home_dir = home_dir().unwrap_or_default();

    home_dir.join(".upiot/settings.yaml")
}
