//! Inlay Core
//!
//! Headless, mode-driven interaction engine over embedded SVG markup.
//! The host mounts caller-supplied markup, forwards raw pointer/keyboard
//! events (with the hit element id resolved by its own renderer), and reads
//! an output snapshot whenever the engine requests a notification.

pub mod clipboard;
pub mod config;
pub mod debug;
pub mod drag;
pub mod engine;
pub mod events;
pub mod hover;
pub mod keyboard;
pub mod measure;
pub mod mount;
pub mod output;
pub mod selection;
pub mod session;

pub use clipboard::{ClipboardSink, NoClipboard};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use config::{EngineConfig, MeasureShape, OperationMode};
pub use engine::Engine;
pub use events::{ClickKind, ClickTracker, KeyEvent, PointerButton, PointerEvent};
pub use mount::GraphicMount;
pub use output::OutputSnapshot;
pub use session::ActiveSession;
