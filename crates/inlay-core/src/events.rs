//! Pointer and keyboard event model with click classification.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// A raw pointer event forwarded by the host.
///
/// `position` is in screen coordinates; `target` is the id of the element
/// under the pointer as resolved by the host's renderer, when any. The
/// engine never hit-tests: targets stand in for per-element listeners, and
/// the engine filters them against the current mode's element class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: PointerButton,
        target: Option<String>,
    },
    Move {
        position: Point,
        target: Option<String>,
    },
    Up {
        position: Point,
        button: PointerButton,
        target: Option<String>,
    },
    /// The pointer left the surface or was lost; live sessions must
    /// terminate rather than linger until a pointer-up that never comes.
    Cancel,
}

/// A keyboard event forwarded by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
}

/// How a selection click was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickKind {
    Single,
    Double,
    Right,
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const CLICK_SLOP: f64 = 5.0;

/// Classifies raw down/up pairs into single, double, and right clicks.
///
/// Right clicks and double clicks resolve on pointer-down; a single click
/// resolves on pointer-up near its down. The second click of a double
/// suppresses its own up so one gesture yields exactly one classification.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click_time: Option<Instant>,
    last_click_position: Option<Point>,
    pending_down: Option<Point>,
    suppress_next_up: bool,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a pointer-down.
    pub fn classify_down(&mut self, position: Point, button: PointerButton) -> Option<ClickKind> {
        match button {
            PointerButton::Right => Some(ClickKind::Right),
            PointerButton::Middle => None,
            PointerButton::Left => {
                let now = Instant::now();
                if let (Some(last_time), Some(last_pos)) =
                    (self.last_click_time, self.last_click_position)
                {
                    let elapsed = now.duration_since(last_time).as_millis();
                    if elapsed < DOUBLE_CLICK_TIME_MS && (position - last_pos).hypot() < CLICK_SLOP
                    {
                        // Reset so a triple click is not a second double.
                        self.last_click_time = None;
                        self.last_click_position = None;
                        self.pending_down = None;
                        self.suppress_next_up = true;
                        return Some(ClickKind::Double);
                    }
                }
                self.last_click_time = Some(now);
                self.last_click_position = Some(position);
                self.pending_down = Some(position);
                None
            }
        }
    }

    /// Classify a pointer-up.
    pub fn classify_up(&mut self, position: Point, button: PointerButton) -> Option<ClickKind> {
        if button != PointerButton::Left {
            return None;
        }
        if self.suppress_next_up {
            self.suppress_next_up = false;
            return None;
        }
        let down = self.pending_down.take()?;
        ((position - down).hypot() <= CLICK_SLOP).then_some(ClickKind::Single)
    }

    /// Forget any in-flight click (pointer loss or mode switch).
    pub fn reset(&mut self) {
        self.pending_down = None;
        self.suppress_next_up = false;
    }
}
