//! Drag sessions over draggable elements.

use crate::mount::GraphicMount;
use kurbo::{Point, Vec2};

/// Class token marking elements eligible for dragging.
pub const DRAGGABLE_CLASS: &str = "draggableObject";

/// A live drag of one draggable element.
///
/// The session captures the mount generation at start; if the document is
/// replaced mid-drag the session goes inert and updates become no-ops.
#[derive(Debug, Clone)]
pub struct DragSession {
    element: inlay_svg::NodeId,
    pub element_id: String,
    generation: u64,
    /// Pointer position relative to the element's translation at grab time,
    /// so the element does not jump under the pointer.
    pointer_offset: Vec2,
    pub start_translate: Vec2,
    pub current_translate: Vec2,
}

impl DragSession {
    /// Begin dragging the element the host resolved under the pointer.
    ///
    /// Requires the draggable class and an existing `translate` in the
    /// element's transform; elements positioned any other way are not
    /// draggable and the press is ignored.
    pub fn start(mount: &GraphicMount, target_id: &str, pointer: Point) -> Option<Self> {
        let doc = mount.document()?;
        let element = doc.element_by_id(target_id)?;
        if !doc.has_class(element, DRAGGABLE_CLASS) {
            return None;
        }
        let Some((x, y)) = doc.translate(element) else {
            log::debug!("drag ignored, no translate on id={target_id}");
            return None;
        };
        let base = Vec2::new(x, y);
        Some(Self {
            element,
            element_id: target_id.to_string(),
            generation: mount.generation(),
            pointer_offset: pointer.to_vec2() - base,
            start_translate: base,
            current_translate: base,
        })
    }

    /// Move the element to follow the pointer, clamped so the grab offset
    /// stays inside the view box. Returns false when the session is stale.
    pub fn update(&mut self, mount: &mut GraphicMount, pointer: Point) -> bool {
        if mount.generation() != self.generation {
            return false;
        }
        let vb = mount.view_box();
        let raw = pointer.to_vec2() - self.pointer_offset;
        let translate = if vb.is_empty() {
            raw
        } else {
            Vec2::new(
                clamp_axis(raw.x, vb.width - self.pointer_offset.x),
                clamp_axis(raw.y, vb.height - self.pointer_offset.y),
            )
        };
        let Some(doc) = mount.document_mut() else {
            return false;
        };
        if !doc.set_translate(self.element, translate.x, translate.y) {
            return false;
        }
        self.current_translate = translate;
        true
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    value.clamp(0.0, max.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    const MARKUP: &str = r#"<svg viewBox="0 0 100 100"><circle id="c" class="draggableObject" transform="translate(5 5)" r="2"/><rect id="fixed" class="draggableObject"/></svg>"#;

    fn mounted() -> GraphicMount {
        let mut mount = GraphicMount::new();
        mount.set_container(Size::new(100.0, 100.0));
        assert!(mount.mount(MARKUP));
        mount
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut mount = mounted();
        // Grab at (7, 7): offset (2, 2) from translate(5 5).
        let mut session = DragSession::start(&mount, "c", Point::new(7.0, 7.0)).unwrap();
        assert_eq!(session.start_translate, Vec2::new(5.0, 5.0));

        assert!(session.update(&mut mount, Point::new(30.0, 40.0)));
        assert_eq!(session.current_translate, Vec2::new(28.0, 38.0));
        let doc = mount.document().unwrap();
        let node = doc.element_by_id("c").unwrap();
        assert_eq!(doc.translate(node), Some((28.0, 38.0)));
    }

    #[test]
    fn test_drag_clamps_to_view_box() {
        let mut mount = mounted();
        let mut session = DragSession::start(&mount, "c", Point::new(7.0, 7.0)).unwrap();

        // Far beyond the right edge: clamps to width minus grab offset.
        assert!(session.update(&mut mount, Point::new(150.0, 50.0)));
        assert_eq!(session.current_translate, Vec2::new(98.0, 48.0));

        // Past the top-left corner: clamps to zero.
        assert!(session.update(&mut mount, Point::new(-20.0, -20.0)));
        assert_eq!(session.current_translate, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_element_without_translate_is_not_draggable() {
        let mount = mounted();
        assert!(DragSession::start(&mount, "fixed", Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_non_draggable_target_is_ignored() {
        let mut mount = GraphicMount::new();
        assert!(mount.mount(r#"<svg viewBox="0 0 10 10"><rect id="r" transform="translate(1 1)"/></svg>"#));
        assert!(DragSession::start(&mount, "r", Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_stale_session_after_remount() {
        let mut mount = mounted();
        let mut session = DragSession::start(&mount, "c", Point::new(7.0, 7.0)).unwrap();
        assert!(mount.mount(MARKUP));

        assert!(!session.update(&mut mount, Point::new(50.0, 50.0)));
        let doc = mount.document().unwrap();
        let node = doc.element_by_id("c").unwrap();
        assert_eq!(doc.translate(node), Some((5.0, 5.0)));
    }
}
