//! Clipboard integration for selection clicks.

/// Receives the id of a freshly selected element.
///
/// Hosts without a system clipboard (tests, servers) plug in [`NoClipboard`];
/// desktop hosts enable the `clipboard` feature and use [`SystemClipboard`].
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str);
}

/// Discards everything. The engine's default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl ClipboardSink for NoClipboard {
    fn copy_text(&mut self, _text: &str) {}
}

/// System clipboard via `arboard`. Failures are logged, never fatal: a
/// missing clipboard daemon must not break selection.
#[cfg(feature = "clipboard")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(err) = clipboard.set_text(text) {
                    log::warn!("failed to copy to clipboard: {err}");
                }
            }
            Err(err) => log::warn!("clipboard unavailable: {err}"),
        }
    }
}
