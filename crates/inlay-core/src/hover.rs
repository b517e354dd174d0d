//! Hover tracking over selectable elements.

use kurbo::Point;

/// Moves that do not change the reported value are swallowed so the host
/// is not notified once per pixel of pointer travel.
const POINT_EPSILON: f64 = 1e-9;

/// Last hovered element id and pointer position in document space.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    pub hover_id: Option<String>,
    pub last_point: Point,
}

impl HoverTracker {
    /// Record a qualifying pointer move. Returns true when the logical
    /// value changed and the host should be notified.
    pub fn update(&mut self, id: &str, point: Point) -> bool {
        let id_changed = self.hover_id.as_deref() != Some(id);
        let moved = (point - self.last_point).hypot() > POINT_EPSILON;
        if !id_changed && !moved {
            return false;
        }
        self.hover_id = Some(id.to_string());
        self.last_point = point;
        true
    }
}
