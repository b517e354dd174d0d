//! Optional human-readable trace of the most recent event.

/// Text region mirroring the last interaction. Purely observational; when
/// disabled the text is blank and nothing is retained.
#[derive(Debug, Clone, Default)]
pub struct DebugTrace {
    enabled: bool,
    last: String,
}

impl DebugTrace {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.last.clear();
        }
    }

    pub fn record(&mut self, message: String) {
        if self.enabled {
            self.last = message;
        }
    }

    pub fn text(&self) -> &str {
        &self.last
    }
}
