const FILLED: &str = "■";
const BLANK: &str = "   ";

/// Bytes written so far against the advertised content length.
/// Lives only for the duration of one download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub downloaded: u64,
    pub total: u64,
}

impl ProgressState {
    pub fn new(total: u64) -> Self {
        Self {
            downloaded: 0,
            total,
        }
    }

    pub fn advance(&mut self, bytes: usize) {
        self.downloaded += bytes as u64;
    }

    /// Filled slots out of `width`, rounded down. Not clamped.
    /// An empty body never produces a chunk, a zero total only shows up here
    /// when called directly and counts as complete.
    pub fn done(&self, width: u64) -> u64 {
        (width as u128 * self.downloaded as u128)
            .checked_div(self.total as u128)
            .unwrap_or(width as u128) as u64
    }

    /// Integer numerator over a float denominator, so the value can exceed 100
    /// when the server sends more than it announced.
    pub fn percent(&self) -> f64 {
        (100 * self.downloaded as u128) as f64 / self.total as f64
    }

    pub fn render(&self, width: u64) -> String {
        let done = self.done(width);
        format!(
            "Downloading Firmware {:.0}% [{}{}]",
            self.percent(),
            FILLED.repeat(done as usize),
            BLANK.repeat(width.saturating_sub(done) as usize)
        )
    }
}
