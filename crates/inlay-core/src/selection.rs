//! Selection tracking and highlight painting over selectable elements.

use crate::events::ClickKind;
use inlay_svg::{Document, NodeId};

/// Class token marking elements eligible for selection and hover.
pub const SELECTABLE_CLASS: &str = "selectableObject";

/// Tracks the selected element id and keeps fills consistent with it.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    /// Id of the currently selected element.
    pub selected_id: Option<String>,
    /// How the last selection click was made.
    pub click_kind: Option<ClickKind>,
    use_fill: bool,
    fill_normal: String,
    fill_selected: String,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self {
            selected_id: None,
            click_kind: None,
            use_fill: false,
            fill_normal: crate::config::DEFAULT_FILL.to_string(),
            fill_selected: crate::config::DEFAULT_FILL_SELECTED.to_string(),
        }
    }

    /// Refresh fill configuration from the host's update cycle.
    pub fn configure(&mut self, use_fill: bool, fill_normal: &str, fill_selected: &str) {
        self.use_fill = use_fill;
        self.fill_normal = fill_normal.to_string();
        self.fill_selected = fill_selected.to_string();
    }

    /// Paint every selectable element: the selected one gets the selected
    /// fill, all others the normal fill. No-op unless fills are enabled.
    pub fn apply_fills(&self, doc: &mut Document) {
        if !self.use_fill {
            return;
        }
        for node in doc.elements_with_class(SELECTABLE_CLASS) {
            let selected = match (&self.selected_id, doc.element_id(node)) {
                (Some(selected_id), Some(id)) => selected_id == id,
                _ => false,
            };
            let fill = if selected {
                self.fill_selected.clone()
            } else {
                self.fill_normal.clone()
            };
            doc.set_attribute(node, "fill", &fill);
        }
    }

    /// Record a click on a selectable element and return its id.
    ///
    /// Only single clicks repaint fills; double and right clicks change the
    /// reported id and kind without touching highlights. Elements without
    /// an id are skipped silently.
    pub fn click(&mut self, doc: &mut Document, node: NodeId, kind: ClickKind) -> Option<String> {
        let id = doc.element_id(node)?.to_string();
        self.selected_id = Some(id.clone());
        self.click_kind = Some(kind);
        if kind == ClickKind::Single {
            self.apply_fills(doc);
        }
        Some(id)
    }
}
