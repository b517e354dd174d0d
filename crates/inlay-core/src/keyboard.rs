//! Global key capture.
//!
//! Keys are recorded for the engine's whole lifetime regardless of the
//! active mode; the engine gates host notification on keypress mode, so a
//! storm of unrelated keystrokes never reaches the host.

/// Records the most recently pressed key.
#[derive(Debug, Clone, Default)]
pub struct KeyCapture {
    pub last_key: Option<String>,
}

impl KeyCapture {
    pub fn record(&mut self, key: &str) {
        self.last_key = Some(key.to_string());
    }
}
