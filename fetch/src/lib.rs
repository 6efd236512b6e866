//! Firmware downloads for the uPIOT plugin.
//!
//! [`FileFetcher`] pulls a single remote file into a directory, skipping the
//! transfer when the file is already there, and renders coarse progress text
//! for the editor status bar. [`ensure_dir`] prepares the destination.

pub mod download;
pub mod util;

pub use download::config::{FetchConfig, UserAgent};
pub use download::progress::ProgressState;
pub use download::{Error, FileFetcher, Result};
pub use util::ensure_dir;

pub const DEFAULT_USER_AGENT: &str = "upiot-fetch";
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
/// Number of glyph slots in the rendered progress bar.
pub const DEFAULT_PROGRESS_WIDTH: u64 = 5;
