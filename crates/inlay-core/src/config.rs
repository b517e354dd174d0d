//! Engine configuration delivered by the host on every update cycle.

use serde::{Deserialize, Serialize};

/// Default fill for unselected selectable elements.
pub const DEFAULT_FILL: &str = "lightgray";
/// Default fill for the selected element.
pub const DEFAULT_FILL_SELECTED: &str = "green";

/// The single interaction behavior active for an update cycle.
///
/// Exactly one mode is active per cycle; it fully determines how pointer
/// and keyboard events are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationMode {
    /// Markup renders but gets no interactive wiring; native hover/title
    /// behavior still works in the host.
    #[default]
    None,
    /// A click anywhere reports one point in document coordinates.
    OnePoint,
    /// Pointer down/drag/up runs a two-point measurement session.
    TwoPoints,
    /// Clicks on selectable elements report ids and drive highlighting.
    Select,
    /// Select wiring plus pointer tracking over selectable elements.
    Hover,
    /// Draggable elements follow the pointer, clamped to the view box.
    Drag,
    /// Key presses are surfaced to the host.
    Keypress,
}

/// Transient overlay shape drawn during a two-point measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureShape {
    #[default]
    Line,
    Rect,
    Circle,
}

/// Host-supplied configuration, refreshed on every update cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Raw markup to mount.
    pub svg: String,
    /// Remount the markup on every update instead of only the first one.
    /// Off by default so an in-progress drag is not destroyed by re-renders.
    pub reload_on_every_update: bool,
    pub operation_mode: OperationMode,
    /// Overlay shape for two-points mode.
    pub measure_shape: MeasureShape,
    /// Whether selection repaints element fills.
    pub use_fill: bool,
    pub fill_color: String,
    pub fill_selected_color: String,
    pub show_debug: bool,
    /// Mount container size in pixels.
    pub container_width: f64,
    pub container_height: f64,
    /// Host-bound selection carried into the cycle, when provided.
    pub selected_id: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            svg: String::new(),
            reload_on_every_update: false,
            operation_mode: OperationMode::default(),
            measure_shape: MeasureShape::default(),
            use_fill: false,
            fill_color: DEFAULT_FILL.to_string(),
            fill_selected_color: DEFAULT_FILL_SELECTED.to_string(),
            show_debug: false,
            container_width: 0.0,
            container_height: 0.0,
            selected_id: None,
        }
    }
}
