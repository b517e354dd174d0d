//! Inlay SVG Document Model
//!
//! A small mutable DOM over caller-supplied SVG markup. The interaction
//! engine mutates this model in place (selection fills, drag translates,
//! measurement overlays) and serializes it back for the host to render.

pub mod document;
pub mod error;
pub mod transform;
pub mod viewbox;

pub use document::{Document, NodeId};
pub use error::MarkupError;
pub use transform::{Transform, TransformList};
pub use viewbox::ViewBox;
