use serde_json::json;
use std::io::Write;
use std::sync::Mutex;

/// Key the plugin's status text is registered under.
pub const STATUS_KEY: &str = "_upiot_";

/// Editor view able to show status bar text.
pub trait View {
    fn set_status(&self, key: &str, text: &str);
    fn erase_status(&self, key: &str);
}

/// Editor window able to run window commands.
pub trait Window {
    fn run_command(&self, name: &str, args: serde_json::Value);
}

/**
Holds the view status text goes to.
The view is attached by the plugin activation hook and detached on teardown,
until then every status call is a no-op.
 */
#[derive(Debug)]
pub struct StatusBar<V> {
    active_view: Option<V>,
}

impl<V> Default for StatusBar<V> {
    fn default() -> Self {
        Self { active_view: None }
    }
}

impl<V: View> StatusBar<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, view: V) {
        self.active_view = Some(view);
    }

    pub fn detach(&mut self) -> Option<V> {
        self.active_view.take()
    }

    pub fn active_view(&self) -> Option<&V> {
        self.active_view.as_ref()
    }

    pub fn set_status(&self, text: &str) {
        if let Some(view) = &self.active_view {
            view.set_status(STATUS_KEY, text);
        }
    }

    pub fn clear_status(&self) {
        if let Some(view) = &self.active_view {
            view.erase_status(STATUS_KEY);
        }
    }
}

/// Status bar stand-in that redraws a single terminal line.
/// Write failures are logged and the download goes on.
#[derive(Debug)]
pub struct ConsoleView<W> {
    out: Mutex<W>,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = write!(out, "{}", text).and_then(|_| out.flush()) {
            log::error!("Couldn't write status line: {}", e);
        }
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn set_status(&self, _key: &str, text: &str) {
        self.emit(&format!("\r{}", text));
    }

    fn erase_status(&self, _key: &str) {
        self.emit("\n");
    }
}

/// Toggles the console panel of `window`.
pub fn show_console<W: Window>(window: &W) {
    window.run_command("show_panel", json!({"panel": "console", "toggle": true}));
}
