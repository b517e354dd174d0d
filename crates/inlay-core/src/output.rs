//! Host-facing output snapshot.

use crate::events::ClickKind;
use serde::{Deserialize, Serialize};

/// Everything the engine reports back to the host.
///
/// The engine signals "outputs changed" by returning `true` from an event
/// handler; the host then reads a snapshot. Fields not touched by the
/// current mode keep their previous values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSnapshot {
    /// Id of the selected element (select and hover modes).
    pub selected_id: Option<String>,
    /// Id of the hovered element (hover mode).
    pub hover_id: Option<String>,
    /// How the last selection click was made.
    pub click_kind: Option<ClickKind>,
    /// First reported point, in document coordinates.
    pub x1: f64,
    pub y1: f64,
    /// Second reported point, in document coordinates.
    pub x2: f64,
    pub y2: f64,
    /// Most recently pressed key (keypress mode).
    pub last_key: Option<String>,
}
