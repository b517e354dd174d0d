//! Graphic mount: owns the parsed document, its view box, and the
//! screen-to-document coordinate mapping.

use inlay_svg::{Document, ViewBox};
use kurbo::{Affine, Point, Size, Vec2};

/// Holds the currently mounted document and derives coordinate transforms.
///
/// Every remount bumps a generation counter; sessions capture the
/// generation at start so references into a replaced document go inert
/// instead of mutating a discarded tree.
#[derive(Debug, Clone, Default)]
pub struct GraphicMount {
    document: Option<Document>,
    view_box: ViewBox,
    container: Size,
    generation: u64,
}

impl GraphicMount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the mounted document with freshly parsed markup and
    /// recompute its view box. Malformed markup keeps the previous
    /// document in place (never fatal).
    pub fn mount(&mut self, markup: &str) -> bool {
        match Document::parse(markup) {
            Ok(doc) => {
                self.view_box = doc.view_box();
                self.document = Some(doc);
                self.generation += 1;
                true
            }
            Err(err) => {
                log::warn!("markup rejected, keeping previous document: {err}");
                false
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.document.is_some()
    }

    /// Current mount generation; bumped on every successful remount.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Pixel size of the mount container, set by the host.
    pub fn set_container(&mut self, size: Size) {
        self.container = size;
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    /// Document-space to screen transform, derived fresh from the current
    /// container size and view box (`xMidYMid meet` fitting, matching how
    /// browsers scale an SVG into its container). Not cached: container
    /// size may change between events.
    pub fn screen_transform(&self) -> Option<Affine> {
        self.document.as_ref()?;
        let vb = self.view_box;
        if vb.is_empty() || self.container.width <= 0.0 || self.container.height <= 0.0 {
            // Unscaled fallback: translate user space to the origin.
            return Some(Affine::translate(Vec2::new(-vb.min_x, -vb.min_y)));
        }
        let scale = (self.container.width / vb.width).min(self.container.height / vb.height);
        let offset_x = (self.container.width - scale * vb.width) / 2.0;
        let offset_y = (self.container.height - scale * vb.height) / 2.0;
        Some(Affine::new([
            scale,
            0.0,
            0.0,
            scale,
            offset_x - scale * vb.min_x,
            offset_y - scale * vb.min_y,
        ]))
    }

    /// Map a screen point into the document's user space. Fails when no
    /// document is mounted.
    pub fn to_document_space(&self, screen: Point) -> Option<Point> {
        let m = self.screen_transform()?.as_coeffs();
        Some(Point::new(
            (screen.x - m[4]) / m[0],
            (screen.y - m[5]) / m[3],
        ))
    }
}
