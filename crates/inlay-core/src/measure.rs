//! Two-point measurement sessions with a transient overlay shape.

use crate::config::MeasureShape;
use crate::mount::GraphicMount;
use kurbo::Point;

const LINE_OVERLAY_ID: &str = "measureline";
const RECT_OVERLAY_ID: &str = "measurerect";
const CIRCLE_OVERLAY_ID: &str = "measurecircle";
const OVERLAY_STROKE: &str = "gray";
const OVERLAY_FILL: &str = "#aaaaaaaa";

/// A live two-point measurement anchored at the initial pointer-down.
///
/// An overlay element is appended to the document root for the session's
/// lifetime and removed when it finishes or aborts. Like drags, the session
/// captures the mount generation and goes inert across remounts.
#[derive(Debug, Clone)]
pub struct MeasureSession {
    pub shape: MeasureShape,
    pub anchor: Point,
    pub current: Point,
    overlay: inlay_svg::NodeId,
    generation: u64,
}

impl MeasureSession {
    /// Start measuring at `anchor` (document coordinates) and insert the
    /// overlay with zero extent.
    pub fn start(mount: &mut GraphicMount, shape: MeasureShape, anchor: Point) -> Option<Self> {
        let generation = mount.generation();
        let doc = mount.document_mut()?;
        let root = doc.root();
        let (tag, id) = match shape {
            MeasureShape::Line => ("line", LINE_OVERLAY_ID),
            MeasureShape::Rect => ("rect", RECT_OVERLAY_ID),
            MeasureShape::Circle => ("circle", CIRCLE_OVERLAY_ID),
        };
        let overlay = doc.append_child(root, tag)?;
        doc.set_attribute(overlay, "id", id);
        doc.set_attribute(overlay, "stroke", OVERLAY_STROKE);
        doc.set_attribute(overlay, "fill", OVERLAY_FILL);
        match shape {
            MeasureShape::Line => {
                doc.set_attribute(overlay, "x1", &format!("{}", anchor.x));
                doc.set_attribute(overlay, "y1", &format!("{}", anchor.y));
                doc.set_attribute(overlay, "x2", &format!("{}", anchor.x));
                doc.set_attribute(overlay, "y2", &format!("{}", anchor.y));
            }
            MeasureShape::Rect => {
                doc.set_attribute(overlay, "x", &format!("{}", anchor.x));
                doc.set_attribute(overlay, "y", &format!("{}", anchor.y));
                doc.set_attribute(overlay, "width", "0");
                doc.set_attribute(overlay, "height", "0");
            }
            MeasureShape::Circle => {
                doc.set_attribute(overlay, "cx", &format!("{}", anchor.x));
                doc.set_attribute(overlay, "cy", &format!("{}", anchor.y));
                doc.set_attribute(overlay, "r", "0");
            }
        }
        Some(Self {
            shape,
            anchor,
            current: anchor,
            overlay,
            generation,
        })
    }

    /// Stretch the overlay to `current`. Rect width/height track the raw
    /// deltas and may be negative when the pointer crosses back over the
    /// anchor. Returns false when the session is stale.
    pub fn update(&mut self, mount: &mut GraphicMount, current: Point) -> bool {
        if mount.generation() != self.generation {
            return false;
        }
        let Some(doc) = mount.document_mut() else {
            return false;
        };
        if !doc.contains(self.overlay) {
            return false;
        }
        match self.shape {
            MeasureShape::Line => {
                doc.set_attribute(self.overlay, "x2", &format!("{}", current.x));
                doc.set_attribute(self.overlay, "y2", &format!("{}", current.y));
            }
            MeasureShape::Rect => {
                let delta = current - self.anchor;
                doc.set_attribute(self.overlay, "width", &format!("{}", delta.x));
                doc.set_attribute(self.overlay, "height", &format!("{}", delta.y));
            }
            MeasureShape::Circle => {
                let radius = (current - self.anchor).hypot();
                doc.set_attribute(self.overlay, "r", &format!("{}", radius));
            }
        }
        self.current = current;
        true
    }

    /// End the session, remove the overlay, and yield both measured points.
    pub fn finish(self, mount: &mut GraphicMount) -> (Point, Point) {
        let points = (self.anchor, self.current);
        self.remove_overlay(mount);
        points
    }

    /// Tear the session down without emitting a measurement.
    pub fn abort(self, mount: &mut GraphicMount) {
        self.remove_overlay(mount);
    }

    fn remove_overlay(self, mount: &mut GraphicMount) {
        if mount.generation() != self.generation {
            return;
        }
        if let Some(doc) = mount.document_mut() {
            doc.remove(self.overlay);
        }
    }
}
