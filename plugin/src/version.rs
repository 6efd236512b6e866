use std::fmt;

use upiot_fetch::UserAgent;

pub const VERSION: (u32, u32, u32) = (0, 0, 1);
pub const PRODUCT: &str = "uPIOT";
pub const HOST: &str = "Sublime-Text";

/// Plugin version, `major.minor.patch` followed by an optional pre-release tag
/// that is appended without a separator (`1.2.3rc1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub suffix: Option<String>,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(suffix) = &self.suffix {
            f.write_str(suffix)?;
        }
        Ok(())
    }
}

impl From<(u32, u32, u32)> for Version {
    fn from((major, minor, patch): (u32, u32, u32)) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: None,
        }
    }
}

impl<S: Into<String>> From<(u32, u32, u32, S)> for Version {
    fn from((major, minor, patch, suffix): (u32, u32, u32, S)) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: Some(suffix.into()),
        }
    }
}

/// Semantic version string of a raw version tuple.
pub fn versionize(raw: impl Into<Version>) -> String {
    raw.into().to_string()
}

pub fn plugin_version() -> String {
    versionize(VERSION)
}

/// `uPIOT/<plugin version> (Sublime-Text/<host_version>)`
pub fn user_agent(host_version: &str) -> UserAgent {
    UserAgent::new(PRODUCT, plugin_version(), HOST, host_version)
}
