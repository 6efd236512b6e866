//! Editor-side glue of the uPIOT plugin: version and User-Agent, status bar
//! text, settings and the firmware install step built on [`upiot_fetch`].

pub mod firmware;
pub mod settings;
pub mod status;
pub mod version;

pub use firmware::install_firmware;
pub use settings::{Settings, SETTINGS_NAME};
pub use status::{show_console, ConsoleView, StatusBar, View, Window};
pub use version::{plugin_version, user_agent, versionize, Version, VERSION};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File IO operation failed, error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Fetch error: '{0}'")]
    Fetch(#[from] upiot_fetch::Error),
    #[error("Invalid settings file: '{0}'")]
    Settings(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
