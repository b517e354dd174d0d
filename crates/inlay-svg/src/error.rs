//! Markup parsing errors.

use thiserror::Error;

/// Errors produced while parsing raw markup into a [`Document`](crate::Document).
///
/// The engine absorbs these: a rejected markup string keeps the previously
/// mounted document in place.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("malformed markup: {0}")]
    Parse(#[from] roxmltree::Error),
}
